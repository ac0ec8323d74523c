use std::sync::Arc;

use async_trait::async_trait;
use gk_core::logging::Logger;
use gk_core::{Article, ArticleScraper, Config, Error, Result};

use crate::extractor::{ContentExtractor, ExtractionRules};
use crate::fetcher::PageFetcher;

pub struct GrokipediaScraper {
    config: Arc<Config>,
    fetcher: PageFetcher,
    extractor: ContentExtractor,
}

impl GrokipediaScraper {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        Self::with_rules(config, ExtractionRules::default())
    }

    pub fn with_rules(config: Arc<Config>, rules: ExtractionRules) -> Result<Self> {
        Ok(Self {
            fetcher: PageFetcher::new(&config)?,
            extractor: ContentExtractor::new(rules)?,
            config,
        })
    }
}

#[async_trait]
impl ArticleScraper for GrokipediaScraper {
    async fn scrape_article(&self, path: &str) -> Result<Article> {
        if path.trim().trim_matches('/').is_empty() {
            return Err(Error::Validation("Article path is required".to_string()));
        }

        let url = self.config.article_url(path.trim());
        let logger = Logger::scoped("📰", path.trim());
        logger.info(&format!("Fetching article from URL: {}", url));

        let document = self.fetcher.fetch(&url).await?;
        let article = self.extractor.extract(&document, &url);
        if article.content.is_empty() {
            logger.warn("No content blocks found on page");
        }

        logger.info(&format!(
            "✨ Extracted {:?} ({} chars of content)",
            article.title,
            article.content.chars().count()
        ));
        Ok(article)
    }
}
