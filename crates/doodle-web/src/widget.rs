//! The `WebPaint` widget exposed to JavaScript.

use crate::canvas::CanvasSurface;
use crate::mouse::route_mouse_move;
use crate::relay::RelaySocket;
use crate::url::resolve_relay_url;
use doodle_core::{
    Engine, EngineConfig, History, Point, ProtocolError, ToolKind, decode_shape, encode_shape,
};
use log::{error, info, warn};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, HtmlCanvasElement, MouseEvent};
use web_time::Instant;

/// Install the panic hook and route `log` output to the browser console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// State shared between the widget, its DOM listeners and its relay socket.
struct Shared {
    engine: RefCell<Engine<CanvasSurface>>,
    origin: Instant,
    /// Encoded commits waiting to be delivered once the engine is released.
    outbox: Rc<RefCell<Vec<String>>>,
    commit_callback: RefCell<Option<js_sys::Function>>,
    relay: RefCell<Option<RelaySocket>>,
}

impl Shared {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    /// Run `f` against the engine, then deliver any commits it produced.
    ///
    /// Delivery happens after the engine borrow ends so a JS callback may call
    /// back into the widget.
    fn with_engine<R>(&self, f: impl FnOnce(&mut Engine<CanvasSurface>) -> R) -> R {
        let result = f(&mut self.engine.borrow_mut());
        self.flush();
        result
    }

    fn flush(&self) {
        let pending = std::mem::take(&mut *self.outbox.borrow_mut());
        for text in pending {
            // Cloned so the callback may replace itself.
            let callback = self.commit_callback.borrow().clone();
            if let Some(callback) = callback {
                if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&text)) {
                    warn!("Commit callback threw: {e:?}");
                }
            }
            if let Some(socket) = self.relay.borrow().as_ref() {
                if let Err(e) = socket.send(&text) {
                    warn!("Could not relay commit: {e:?}");
                }
            }
        }
    }

    fn receive(&self, text: &str) -> Result<(), ProtocolError> {
        let shape = decode_shape(text)?;
        self.with_engine(|engine| engine.apply_remote(shape));
        Ok(())
    }

    /// Canvas-relative position of `e`, wherever on the page it was dispatched.
    fn mouse_position(&self, e: &MouseEvent) -> Point {
        let rect = self.engine.borrow().surface().canvas().get_bounding_client_rect();
        Point::new(
            f64::from(e.client_x()) - rect.left(),
            f64::from(e.client_y()) - rect.top(),
        )
    }
}

fn page_relay_url() -> Result<String, JsError> {
    let location = web_sys::window()
        .ok_or_else(|| JsError::new("no window to resolve the relay address from"))?
        .location();
    Ok(resolve_relay_url(
        &location.protocol().unwrap_or_default(),
        &location.host().unwrap_or_default(),
        &location.search().unwrap_or_default(),
        &location.hash().unwrap_or_default(),
    ))
}

type Listener = (EventTarget, &'static str, Closure<dyn FnMut(MouseEvent)>);

/// Freehand drawing widget bound to a `<canvas>`.
///
/// ```js
/// const paint = new WebPaint(canvas, { color: "red", lineWidth: 3, shape: "curve" });
/// paint.attach();
/// paint.connect();
/// ```
#[wasm_bindgen]
pub struct WebPaint {
    shared: Rc<Shared>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl WebPaint {
    /// Create a widget on `canvas`. `options` is an optional engine config object.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, options: JsValue) -> Result<WebPaint, JsError> {
        let config: EngineConfig = if options.is_undefined() || options.is_null() {
            EngineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };

        let outbox = Rc::new(RefCell::new(Vec::new()));
        let mut engine = Engine::new(CanvasSurface::new(canvas)?, config);
        let queue = Rc::clone(&outbox);
        engine.set_commit_listener(move |shape| match encode_shape(shape) {
            Ok(text) => queue.borrow_mut().push(text),
            Err(e) => error!("Failed to encode {}: {e}", shape.kind()),
        });
        engine.redraw();
        info!("Doodle ready with the {} tool", engine.tool());

        Ok(Self {
            shared: Rc::new(Shared {
                engine: RefCell::new(engine),
                origin: Instant::now(),
                outbox,
                commit_callback: RefCell::new(None),
                relay: RefCell::new(None),
            }),
            listeners: Vec::new(),
        })
    }

    /// Listen for mouse events. Presses and moves are taken from the canvas;
    /// releases from the whole window, so a drag may end off the canvas.
    /// Calling it twice is a no-op.
    pub fn attach(&mut self) -> Result<(), JsError> {
        if !self.listeners.is_empty() {
            return Ok(());
        }
        let canvas: EventTarget = self.shared.engine.borrow().surface().canvas().clone().into();
        let window: EventTarget = web_sys::window()
            .ok_or_else(|| JsError::new("no window to listen for mouseup on"))?
            .into();

        let handlers: [(&EventTarget, &'static str, fn(&Shared, &MouseEvent)); 3] = [
            (&canvas, "mousedown", |s, e| {
                let pos = s.mouse_position(e);
                s.with_engine(|engine| engine.pointer_down(pos));
            }),
            (&canvas, "mousemove", |s, e| {
                let (pos, time) = (s.mouse_position(e), s.now());
                s.with_engine(|engine| route_mouse_move(engine, pos, time, e.buttons()));
            }),
            (&window, "mouseup", |s, e| {
                let pos = s.mouse_position(e);
                s.with_engine(|engine| engine.pointer_up(pos));
            }),
        ];

        for (target, name, handler) in handlers {
            let shared = Rc::clone(&self.shared);
            let closure = Closure::wrap(
                Box::new(move |e: MouseEvent| handler(&shared, &e)) as Box<dyn FnMut(MouseEvent)>
            );
            target
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .map_err(|e| JsError::new(&format!("Failed to listen for {name}: {e:?}")))?;
            self.listeners.push((target.clone(), name, closure));
        }
        Ok(())
    }

    /// Connect to the relay. Without a URL the page's own origin (or its
    /// `server` query parameter) is used. Replaces any existing connection.
    pub fn connect(&mut self, url: Option<String>) -> Result<(), JsError> {
        let url = match url {
            Some(url) => url,
            None => page_relay_url()?,
        };
        let weak = Rc::downgrade(&self.shared);
        let socket = RelaySocket::open(&url, move |text| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            if let Err(e) = shared.receive(&text) {
                warn!("Dropping relay message: {e}");
            }
        })?;
        *self.shared.relay.borrow_mut() = Some(socket);
        Ok(())
    }

    pub fn disconnect(&self) {
        self.shared.relay.borrow_mut().take();
    }

    #[wasm_bindgen(getter)]
    pub fn connected(&self) -> bool {
        self.shared.relay.borrow().as_ref().is_some_and(RelaySocket::is_open)
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, x: f64, y: f64) {
        self.shared.with_engine(|engine| engine.pointer_down(Point::new(x, y)));
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, x: f64, y: f64) {
        let time = self.shared.now();
        self.shared.with_engine(|engine| engine.pointer_move(Point::new(x, y), time));
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&self, x: f64, y: f64) {
        self.shared.with_engine(|engine| engine.pointer_up(Point::new(x, y)));
    }

    pub fn cancel(&self) {
        self.shared.with_engine(|engine| engine.cancel());
    }

    #[wasm_bindgen(js_name = setTool)]
    pub fn set_tool(&self, name: &str) -> Result<(), JsError> {
        let tool: ToolKind = name.parse()?;
        self.shared.with_engine(|engine| engine.set_tool(tool));
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn tool(&self) -> String {
        self.shared.engine.borrow().tool().name().to_string()
    }

    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&self, color: &str) {
        self.shared.with_engine(|engine| engine.set_color(color));
    }

    #[wasm_bindgen(getter)]
    pub fn color(&self) -> String {
        self.shared.engine.borrow().color().to_string()
    }

    #[wasm_bindgen(js_name = setLineWidth)]
    pub fn set_line_width(&self, line_width: f64) {
        self.shared.with_engine(|engine| engine.set_line_width(line_width));
    }

    #[wasm_bindgen(js_name = setCornerRadius)]
    pub fn set_corner_radius(&self, radius: f64) {
        self.shared.with_engine(|engine| engine.set_corner_radius(radius));
    }

    /// Remove the last shape. Returns whether anything was removed.
    pub fn undo(&self) -> bool {
        self.shared.with_engine(|engine| engine.undo().is_some())
    }

    #[wasm_bindgen(js_name = clearAll)]
    pub fn clear_all(&self) {
        self.shared.with_engine(|engine| engine.clear_all());
    }

    pub fn redraw(&self) {
        self.shared.with_engine(|engine| engine.redraw());
    }

    #[wasm_bindgen(getter, js_name = shapeCount)]
    pub fn shape_count(&self) -> usize {
        self.shared.engine.borrow().history().len()
    }

    /// Register a callback that receives each committed shape as a relay
    /// message string. Pass `undefined` to remove it.
    #[wasm_bindgen(js_name = onCommit)]
    pub fn on_commit(&self, callback: Option<js_sys::Function>) {
        *self.shared.commit_callback.borrow_mut() = callback;
    }

    /// Apply a relay message received by the host page.
    pub fn receive(&self, message: &str) -> Result<(), JsError> {
        Ok(self.shared.receive(message)?)
    }

    /// Committed shapes as JSON, for handing to a late joiner.
    #[wasm_bindgen(js_name = historyJson)]
    pub fn history_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.shared.engine.borrow().history())?)
    }

    #[wasm_bindgen(js_name = loadHistoryJson)]
    pub fn load_history_json(&self, json: &str) -> Result<(), JsError> {
        let history: History = serde_json::from_str(json)?;
        self.shared.with_engine(|engine| engine.load_history(history));
        Ok(())
    }
}

impl Drop for WebPaint {
    fn drop(&mut self) {
        for (target, name, closure) in &self.listeners {
            let _ =
                target.remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
    }
}
