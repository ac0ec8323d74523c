pub mod cli;
pub mod extractor;
pub mod fetcher;
pub mod scrapers;
pub mod search;

pub use cli::{handle_command, ScraperArgs, ScraperCommands};
pub use extractor::{ContentExtractor, ExtractionRules, NodeAction};
pub use fetcher::PageFetcher;
pub use scrapers::GrokipediaScraper;
pub use search::{SearchDriver, SearchSelectors};

pub mod prelude {
    pub use super::scrapers::GrokipediaScraper;
    pub use super::search::SearchDriver;
    pub use gk_core::{Article, ArticleScraper, ArticleSearch, Config, Error, Result, SearchResult};
}
