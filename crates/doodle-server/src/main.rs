use doodle_server::{Hub, RelayConfig, router};
use std::io;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doodle_server=info,tower_http=info".into()),
        )
        .init();

    let config =
        RelayConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let hub = Arc::new(Hub::new(config.channel_capacity));
    let app = router(hub, &config);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Doodle relay server listening on {}", addr);
    info!("WebSocket endpoint: ws://localhost:{}/ws", config.port);

    axum::serve(listener, app).await
}
