//! Doodle Core Library
//!
//! Platform-agnostic drawing engine: pointer gestures become shapes, shapes are
//! kept in an ordered history, and the history is replayed onto any [`Surface`].

pub mod config;
pub mod engine;
pub mod geometry;
pub mod history;
pub mod input;
pub mod protocol;
pub mod shapes;
pub mod surface;
pub mod throttle;
pub mod tools;

pub use config::EngineConfig;
pub use engine::Engine;
pub use geometry::{ARROW_EDGE_LENGTH, ArrowPolygon, arrow_polygon, polygon_path, rounded_rect_path};
pub use history::History;
pub use input::{PointerEvent, PointerSource, ScriptedInput};
pub use protocol::{DRAWING_EVENT, ProtocolError, RelayEnvelope, decode_shape, encode_shape};
pub use shapes::{Shape, ShapeStyle};
pub use surface::{DrawCommand, RecordingSurface, Surface, draw_shape};
pub use throttle::Throttle;
pub use tools::{ToolKind, UnknownTool};

pub use kurbo::Point;
