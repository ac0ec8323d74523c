pub mod config;
pub mod error;
pub mod logging;
pub mod sources;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use sources::{ArticleScraper, ArticleSearch};
pub use types::{Article, SearchResult, NO_DESCRIPTION};
