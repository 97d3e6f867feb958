//! Doodle WebSocket Relay Server
//!
//! Every text or binary frame a client sends on `/ws` is forwarded verbatim to
//! every other connected client. The relay keeps no history and never parses
//! payloads; clients agree on the format themselves:
//!
//! ```json
//! { "event": "drawing", "data": { "kind": "line", ... } }
//! ```
//!
//! Delivery is best effort. A client that falls too far behind skips frames.

mod config;
mod hub;

pub use config::{ConfigError, DEFAULT_CHANNEL_CAPACITY, DEFAULT_PORT, RelayConfig};
pub use hub::{Frame, Hub};

use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
    routing::get,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

/// Build the relay router. With a static directory configured its files are
/// served at `/`; otherwise `/` returns a short banner.
pub fn router(hub: Arc<Hub>, config: &RelayConfig) -> Router {
    let app = Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .with_state(hub);

    let app = match &config.static_dir {
        Some(dir) => {
            info!("Serving static files from {}", dir.display());
            app.fallback_service(ServeDir::new(dir))
        }
        None => app.route("/", get(index)),
    };

    app.layer(CorsLayer::permissive()).layer(TraceLayer::new_for_http())
}

/// Index page
async fn index() -> &'static str {
    "Doodle Relay Server - Connect via WebSocket at /ws"
}

/// Health check
async fn health() -> &'static str {
    "ok"
}

/// WebSocket upgrade handler
async fn ws_handler(ws: WebSocketUpgrade, State(hub): State<Arc<Hub>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

/// Relay frames between one client and the hub until either side goes away.
async fn handle_socket(socket: WebSocket, hub: Arc<Hub>) {
    let (peer_id, mut rx) = hub.join();
    info!("New connection: {} ({} connected)", peer_id, hub.peer_count());

    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            msg = receiver.next() => {
                match msg {
                    Some(Ok(message @ (Message::Text(_) | Message::Binary(_)))) => {
                        hub.publish(peer_id, message);
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {} // Ping/pong
                    Some(Err(e)) => {
                        warn!("WebSocket error for {}: {}", peer_id, e);
                        break;
                    }
                }
            }

            frame = rx.recv() => {
                match frame {
                    // Don't echo back to sender
                    Ok(frame) if frame.from == peer_id => {}
                    Ok(frame) => {
                        if sender.send(frame.message).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Peer {} fell behind; skipped {} frames", peer_id, skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }

    hub.leave(peer_id);
    info!("Connection closed: {} ({} connected)", peer_id, hub.peer_count());
}
