//! CSS color strings to peniko colors.

use log::warn;
use peniko::Color;
use peniko::color::{Srgb, parse_color as parse_css};

/// Parse a CSS color (`"red"`, `"#00ff00"`, `"rgba(0, 0, 0, 0)"`).
///
/// Unrecognized strings fall back to opaque black, the default stroke color.
pub fn parse_color(css: &str) -> Color {
    match parse_css(css) {
        Ok(color) => color.to_alpha_color::<Srgb>(),
        Err(e) => {
            warn!("Unrecognized color {css:?}: {e}; using black");
            Color::BLACK
        }
    }
}
