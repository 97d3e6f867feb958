//! Mouse-button bookkeeping for the DOM listeners.

use doodle_core::{Engine, Point, Surface};
use log::debug;
use std::time::Duration;

/// `MouseEvent.buttons` bit of the primary (left) button.
pub const PRIMARY_BUTTON: u16 = 1;

/// Route a `mousemove` to the engine.
///
/// A move that arrives with the primary button up while a gesture is open means
/// the release happened where no `mouseup` reached us (outside the window). The
/// gesture is finished at `pos` instead of being extended by hover moves.
pub fn route_mouse_move<S: Surface>(
    engine: &mut Engine<S>,
    pos: Point,
    time: Duration,
    buttons: u16,
) {
    if engine.is_gesturing() && buttons & PRIMARY_BUTTON == 0 {
        debug!("Primary button released unseen, finishing the gesture");
        engine.pointer_up(pos);
    } else {
        engine.pointer_move(pos, time);
    }
}
