use std::sync::Arc;

use gk_core::{ArticleScraper, ArticleSearch, Config};

pub struct AppState {
    pub config: Arc<Config>,
    pub scraper: Arc<dyn ArticleScraper>,
    pub search: Arc<dyn ArticleSearch>,
}
