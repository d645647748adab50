use tokio::net::TcpListener;
use tracing::{info, warn};
use invoice_extract::{build_state, config::Config, create_router, utils::init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?} {:?}", config.server, config.llm);
    if config.llm.google_api_key.is_empty() {
        warn!("GEMINI_API_KEY is not set; model calls will fail");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Create shared state
    let state = build_state(config)?;

    // Create router
    let app = create_router(state);

    // Start server
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
