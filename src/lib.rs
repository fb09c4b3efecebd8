pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod scraper;
pub mod summary;

use std::sync::Arc;

use config::Config;
use scraper::ProfileFetcher;
use summary::SummaryGenerator;
use tracing_subscriber::EnvFilter;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub fetcher: ProfileFetcher,
    pub generator: SummaryGenerator,
}

impl AppState {
    pub fn new(config: Config) -> error::Result<Self> {
        let fetcher = ProfileFetcher::new(&config)?;
        let generator = SummaryGenerator::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            fetcher,
            generator,
        })
    }
}

/// Logs go to stderr so stdout only carries program output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
