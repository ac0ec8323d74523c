use async_trait::async_trait;

use crate::types::{Article, SearchResult};
use crate::Result;

#[async_trait]
pub trait ArticleScraper: Send + Sync {
    /// Fetches and extracts the article at `path`, relative to the configured
    /// base URL.
    async fn scrape_article(&self, path: &str) -> Result<Article>;
}

#[async_trait]
pub trait ArticleSearch: Send + Sync {
    /// Runs a free-text search. Results are unique by title, in page order.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
}
