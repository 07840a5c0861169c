use anyhow::{Context, Result};
use billboard_market::{build_app, config::Settings, AppState};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file first. Ignore errors (e.g., file not found)
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "billboard_market=info,tower_http=info".into()))
        .with(fmt::layer())
        .init();

    tracing::info!("Initializing billboard marketplace server...");

    let settings = match Settings::new() {
        Ok(s) => {
            tracing::info!("Configuration loaded successfully.");
            s
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let addr: SocketAddr = settings
        .server_address
        .parse()
        .with_context(|| format!("Invalid server address format: {}", settings.server_address))?;
    tracing::info!(
        "Session store at {}, simulated latency {} ms",
        settings.session_store_path,
        settings.simulated_latency_ms
    );

    let app_state = AppState::seeded(settings);
    let app = build_app(app_state);

    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => {
            tracing::info!("Server listening on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", addr, e);
            return Err(e.into());
        }
    };

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
