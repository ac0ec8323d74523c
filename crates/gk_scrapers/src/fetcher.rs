use gk_core::{Config, Error, Result};
use reqwest::Client;
use scraper::Html;

/// Single-shot HTTP fetcher. No retries: every failure is returned to the
/// caller as-is.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> Result<Html> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Fetch {
                status: None,
                message: format!("failed to read body of {}: {}", url, e),
            })?;

        Ok(Html::parse_document(&body))
    }
}
