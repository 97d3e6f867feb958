//! Doodle for the browser.
//!
//! Wraps the drawing engine in a `wasm-bindgen` widget that paints onto an
//! HTML `<canvas>` and exchanges committed shapes with the relay server.
//! Build with `wasm-pack build --target web crates/doodle-web`.

pub mod mouse;
pub mod path;
pub mod url;

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod relay;
#[cfg(target_arch = "wasm32")]
mod widget;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
#[cfg(target_arch = "wasm32")]
pub use relay::RelaySocket;
#[cfg(target_arch = "wasm32")]
pub use widget::WebPaint;
