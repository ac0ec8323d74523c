use clap::{Args, Subcommand};
use gk_core::{ArticleScraper, ArticleSearch, Error, Result};
use serde_json::json;

#[derive(Args, Debug, Clone)]
pub struct ScraperArgs {
    #[command(subcommand)]
    pub command: ScraperCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ScraperCommands {
    /// Extract one article and print it as JSON
    Article {
        /// Article path relative to the base URL (e.g. page/Rust)
        path: String,
    },
    /// Run a search through the headless browser and print the results
    Search {
        query: String,
    },
}

/// Runs a one-shot command and returns the pretty-printed JSON output.
pub async fn handle_command(
    args: ScraperArgs,
    scraper: &dyn ArticleScraper,
    search: &dyn ArticleSearch,
) -> Result<String> {
    let value = match args.command {
        ScraperCommands::Article { path } => serde_json::to_value(scraper.scrape_article(&path).await?)?,
        ScraperCommands::Search { query } => {
            if query.trim().is_empty() {
                return Err(Error::Validation("Search query is required".to_string()));
            }
            let results = search.search(&query).await?;
            json!({
                "query": query,
                "count": results.len(),
                "results": results,
            })
        }
    };
    Ok(serde_json::to_string_pretty(&value)?)
}
