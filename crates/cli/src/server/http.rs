use dnscheck_api::{cors_layer, create_api_routes, AppState};
use dnscheck_domain::config::ServerConfig;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub async fn start_http_server(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let app = create_api_routes(state).layer(cors_layer(&config.cors_allowed_origins));

    let listen_addr = config.listen_addr();
    let listener = TcpListener::bind(&listen_addr).await?;
    info!(address = %listener.local_addr()?, "HTTP API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
