use anyhow::{Context, Result};
use launchpad_client::BackendClient;
use launchpad_server::{AppState, Config, CorsPolicy};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with INFO level by default
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::load_default()?.with_env_overrides()?;
    config.validate()?;

    tracing::info!("Launchpad proxy starting...");
    tracing::info!("Backend: {}", config.backend.base_url);
    tracing::info!("Allowed origins: {:?}", config.cors.allowed_origins);

    let client = BackendClient::new_with_config(&config.backend.base_url, config.client_config())
        .context("Failed to create backend client")?;
    let state = AppState::new(client, CorsPolicy::new(config.cors.allowed_origins.clone()));
    let app = launchpad_server::router(state);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Launchpad ready to accept requests on http://{}", addr);
    tracing::info!("Endpoints: /applications, /applications/{{id}}, /health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Launchpad stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Keep serving rather than shutting down straight away
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining in-flight requests");
}
