//! Relay endpoint resolution.
//!
//! The widget talks to the relay at `/ws`. By default that lives on the same
//! origin that served the page; a `?server=host:port` (or `#server=...`)
//! parameter points it elsewhere.

/// Path of the relay WebSocket endpoint.
pub const RELAY_PATH: &str = "/ws";

/// Relay URL for a page served from `protocol//host`.
pub fn relay_url_for_page(protocol: &str, host: &str) -> String {
    let ws_protocol = if protocol == "https:" { "wss:" } else { "ws:" };
    format!("{ws_protocol}//{host}{RELAY_PATH}")
}

/// Relay URL from an explicit server parameter.
///
/// Accepts `host:port`, `ws://host:port` or `wss://host/ws`. Plain hosts get
/// `ws://`.
pub fn relay_url_from_param(server: &str) -> String {
    let server = server.trim().trim_end_matches('/');
    let base = if server.starts_with("ws://") || server.starts_with("wss://") {
        server.to_string()
    } else {
        format!("ws://{server}")
    };
    if base.ends_with(RELAY_PATH) {
        base
    } else {
        format!("{base}{RELAY_PATH}")
    }
}

/// The `server` parameter of a query string or hash fragment.
pub fn server_param(query: &str) -> Option<String> {
    query
        .trim_start_matches(['?', '#'])
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, value)| *key == "server" && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Pick the relay URL: explicit parameter from `search` then `hash`, else the page origin.
pub fn resolve_relay_url(protocol: &str, host: &str, search: &str, hash: &str) -> String {
    match server_param(search).or_else(|| server_param(hash)) {
        Some(server) => relay_url_from_param(&server),
        None => relay_url_for_page(protocol, host),
    }
}
