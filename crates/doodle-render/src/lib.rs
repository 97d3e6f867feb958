//! Doodle Render Library
//!
//! A [`Surface`](doodle_core::Surface) that turns drawing calls into kurbo paths
//! with peniko colors. The resulting display list can be handed to any vector
//! renderer that consumes kurbo geometry.

mod color;
mod scene;

pub use color::parse_color;
pub use scene::{SceneItem, ScenePaint, SceneSurface};
