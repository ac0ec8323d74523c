use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use gk_core::logging::init_logging;
use gk_core::Config;
use gk_scrapers::{handle_command, GrokipediaScraper, ScraperArgs, ScraperCommands, SearchDriver};
use gk_web::AppState;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "Article and search extraction for grokipedia.com", long_about = None)]
pub struct Cli {
    /// Site to scrape. Overrides GROKIPEDIA_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Chromium binary for searches. Overrides GROKIPEDIA_CHROME_PATH.
    #[arg(long, global = true)]
    chrome: Option<PathBuf>,
    /// Upper bound on concurrent browser sessions.
    #[arg(long, global = true)]
    max_sessions: Option<usize>,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the JSON API
    Serve {
        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,
        #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
        host: IpAddr,
    },
    #[command(flatten)]
    Scrape(ScraperCommands),
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::from_env().context("Invalid environment configuration")?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    if cli.chrome.is_some() {
        config = config.with_chrome_executable(cli.chrome.clone());
    }
    if let Some(max) = cli.max_sessions {
        config = config.with_max_browser_sessions(max)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.verbose { Level::DEBUG } else { Level::INFO });

    let config = Arc::new(load_config(&cli)?);
    let scraper = Arc::new(GrokipediaScraper::new(config.clone())?);
    let search = Arc::new(SearchDriver::new(config.clone()));

    match cli.command {
        Commands::Serve { port, host } => {
            let state = AppState {
                config: config.clone(),
                scraper,
                search,
            };
            gk_web::serve(state, SocketAddr::new(host, port)).await?;
        }
        Commands::Scrape(command) => {
            info!("🦗 Using base URL {}", config.base_url());
            let output = handle_command(ScraperArgs { command }, scraper.as_ref(), search.as_ref()).await?;
            println!("{}", output);
        }
    }

    Ok(())
}
