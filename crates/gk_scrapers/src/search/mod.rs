//! Search through a headless browser.
//!
//! The search page renders its results client-side, so a plain HTTP fetch
//! sees an empty shell. Each call launches its own Chromium session, waits
//! for the results region, gives the page a fixed settle period, runs
//! [`script::EXTRACTION_SCRIPT_VERSION`] of the in-page collector and
//! validates what comes back.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::Page;
use gk_core::logging::Logger;
use gk_core::{ArticleSearch, Config, Error, Result, SearchResult};
use tokio::sync::Semaphore;

mod results;
mod script;
mod session;

pub use results::{validate_results, RawSearchResult};
pub use script::{
    extraction_script, visibility_script, ScriptOutput, SearchSelectors,
    EXTRACTION_SCRIPT_VERSION, MAX_SNIPPET_CHARS, MIN_SNIPPET_CHARS,
};
pub use session::BrowserSession;

const VISIBILITY_POLL: Duration = Duration::from_millis(100);

pub struct SearchDriver {
    config: Arc<Config>,
    selectors: SearchSelectors,
    sessions: Arc<Semaphore>,
}

impl SearchDriver {
    pub fn new(config: Arc<Config>) -> Self {
        let sessions = Arc::new(Semaphore::new(config.max_browser_sessions));
        Self {
            config,
            selectors: SearchSelectors::default(),
            sessions,
        }
    }

    /// Runs one search under the configured deadline. Any failure, including
    /// the deadline, is an [`Error::Search`]; there are no partial results.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let logger = Logger::scoped("🔎", query);
        let deadline = self.config.search_timeout;

        let outcome = match tokio::time::timeout(deadline, self.run(query, &logger)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(Error::Search(format!(
                "deadline of {}s exceeded",
                deadline.as_secs()
            ))),
        };

        match outcome {
            Ok(results) => {
                logger.info(&format!("✨ Found {} search results", results.len()));
                Ok(results)
            }
            Err(e) => {
                logger.error(&format!("Headless browser error: {}", e));
                if matches!(e, Error::Search(_)) {
                    Err(e)
                } else {
                    Err(Error::Search(e.to_string()))
                }
            }
        }
    }

    async fn run(&self, query: &str, logger: &Logger) -> Result<Vec<SearchResult>> {
        let script = extraction_script(&self.selectors, &self.config)?;
        let visibility = visibility_script(&self.selectors.content_root)?;
        let url = self.config.search_url(query);

        let _permit = self
            .sessions
            .acquire()
            .await
            .map_err(|e| Error::Search(format!("Browser session limiter closed: {}", e)))?;

        logger.info("🚀 Starting headless browser search");
        let session = BrowserSession::launch(&self.config).await?;
        logger.debug(&format!("Navigating to: {}", url));

        let outcome = self.collect(&session, &url, &visibility, &script).await;
        session.close().await;

        let output = outcome?;
        if output.version != EXTRACTION_SCRIPT_VERSION {
            return Err(Error::Search(format!(
                "extraction script returned version {}, expected {}",
                output.version, EXTRACTION_SCRIPT_VERSION
            )));
        }
        logger.debug(&format!("Page reported {} raw results", output.results.len()));

        Ok(validate_results(output.results, &self.config))
    }

    async fn collect(
        &self,
        session: &BrowserSession,
        url: &str,
        visibility: &str,
        script: &str,
    ) -> Result<ScriptOutput> {
        let page = session.open(url).await?;
        wait_until_visible(&page, visibility).await?;
        tokio::time::sleep(self.config.render_settle).await;

        page.evaluate(script)
            .await
            .map_err(|e| Error::Search(format!("Failed to run extraction script: {}", e)))?
            .into_value::<ScriptOutput>()
            .map_err(|e| Error::Search(format!("Unexpected extraction result: {}", e)))
    }
}

/// Polls until the visibility check returns true. Bounded only by the
/// caller's deadline.
async fn wait_until_visible(page: &Page, visibility: &str) -> Result<()> {
    loop {
        let outcome = page
            .evaluate(visibility)
            .await
            .map_err(|e| Error::Search(format!("Failed to check visibility: {}", e)))?;
        if visibility_flag(outcome.value())? {
            return Ok(());
        }
        tokio::time::sleep(VISIBILITY_POLL).await;
    }
}

/// The check must answer a boolean; anything else is a script failure.
fn visibility_flag(value: Option<&serde_json::Value>) -> Result<bool> {
    match value {
        Some(serde_json::Value::Bool(visible)) => Ok(*visible),
        other => Err(Error::Search(format!(
            "Unexpected visibility result: {}",
            other.map_or_else(|| "undefined".to_string(), |v| v.to_string())
        ))),
    }
}

#[async_trait]
impl ArticleSearch for SearchDriver {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        SearchDriver::search(self, query).await
    }
}
