use tokio::net::TcpListener;
use tracing::{debug, info};

use profile_summary::{AppState, api::routes::create_router, config::Config, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;
    init_tracing();
    let server_addr = config.server_addr()?;

    let app_state = AppState::new(config)?;
    debug!(config = ?app_state.config, "Configuration loaded");
    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;
    info!(%server_addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
