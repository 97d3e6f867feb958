//! WebSocket connection to the relay server.

use log::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CloseEvent, ErrorEvent, MessageEvent, WebSocket};

/// An open relay connection.
///
/// Inbound text frames are handed to the callback given to [`RelaySocket::open`].
/// Dropping the socket closes it.
pub struct RelaySocket {
    ws: WebSocket,
    // Keep closures alive for as long as the socket holds references to them.
    _on_open: Closure<dyn Fn()>,
    _on_message: Closure<dyn Fn(MessageEvent)>,
    _on_close: Closure<dyn Fn(CloseEvent)>,
    _on_error: Closure<dyn Fn(ErrorEvent)>,
}

impl RelaySocket {
    pub fn open(url: &str, on_text: impl Fn(String) + 'static) -> Result<Self, JsError> {
        let ws = WebSocket::new(url)
            .map_err(|e| JsError::new(&format!("Failed to open relay socket: {e:?}")))?;
        ws.set_binary_type(web_sys::BinaryType::Arraybuffer);

        let url_open = url.to_string();
        let on_open = Closure::wrap(Box::new(move || {
            info!("Connected to relay at {url_open}");
        }) as Box<dyn Fn()>);
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));

        let on_message = Closure::wrap(Box::new(move |e: MessageEvent| {
            match e.data().dyn_into::<js_sys::JsString>() {
                Ok(text) => on_text(text.into()),
                Err(_) => warn!("Ignoring non-text relay frame"),
            }
        }) as Box<dyn Fn(MessageEvent)>);
        ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        let on_close = Closure::wrap(Box::new(move |e: CloseEvent| {
            info!("Relay connection closed ({})", e.code());
        }) as Box<dyn Fn(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        let on_error = Closure::wrap(Box::new(move |e: ErrorEvent| {
            warn!("Relay socket error: {}", e.message());
        }) as Box<dyn Fn(ErrorEvent)>);
        ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        Ok(Self {
            ws,
            _on_open: on_open,
            _on_message: on_message,
            _on_close: on_close,
            _on_error: on_error,
        })
    }

    pub fn is_open(&self) -> bool {
        self.ws.ready_state() == WebSocket::OPEN
    }

    /// Send a text frame. Frames sent before the socket opens are dropped.
    pub fn send(&self, text: &str) -> Result<(), JsValue> {
        if !self.is_open() {
            return Err(JsValue::from_str("relay socket is not open"));
        }
        self.ws.send_with_str(text)
    }
}

impl Drop for RelaySocket {
    fn drop(&mut self) {
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onclose(None);
        self.ws.set_onerror(None);
        let _ = self.ws.close();
    }
}
