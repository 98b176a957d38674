//! JavaScript-facing handle for one scratch board.
//!
//! The host page constructs a [`ScratchBoard`] over its `<canvas>` element,
//! calls [`ScratchBoard::mount`] once the element is laid out, and forwards
//! pointer, touch, and toolbar events. Undo/redo shortcuts are bound to the
//! window only while the board is mounted and visible; dropping the handle
//! (`free()` from JS) or calling [`ScratchBoard::unmount`] removes them.

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::engine::{Action, Engine, EngineOptions};
use crate::error::CanvasError;
use crate::geom::Point;
use crate::input::{PointerSample, Theme, Tool, TouchPoint};
use crate::web::{self, KeyboardSubscription};

#[wasm_bindgen]
pub struct ScratchBoard {
    engine: Rc<RefCell<Engine>>,
    shortcuts: Option<KeyboardSubscription>,
}

#[wasm_bindgen]
impl ScratchBoard {
    /// Wrap `canvas`. Nothing is allocated until [`Self::mount`].
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, dark: bool, line_width: Option<f64>, history_limit: Option<u32>) -> Self {
        let defaults = EngineOptions::default();
        let options = EngineOptions {
            line_width: line_width.filter(|w| w.is_finite() && *w > 0.0).unwrap_or(defaults.line_width),
            history_limit: history_limit.map(|n| n as usize),
        };
        let engine = Engine::new(canvas, options, Theme::from_dark(dark));
        Self { engine: Rc::new(RefCell::new(engine)), shortcuts: None }
    }

    /// Size the surface to the element and start listening for shortcuts.
    pub fn mount(&mut self) {
        self.dispatch(Engine::initialize);
        self.sync_shortcuts();
    }

    /// Stop listening for shortcuts. The drawing is kept until the handle is freed.
    pub fn unmount(&mut self) {
        self.shortcuts = None;
    }

    /// Follow a container resize.
    pub fn resize(&mut self) {
        self.dispatch(Engine::resize);
        self.sync_shortcuts();
    }

    /// Collapse or expand the board; returns the new collapsed flag.
    ///
    /// Collapsing discards the drawing and its history. Expanding allocates a
    /// fresh surface at the element's current size.
    pub fn toggle(&mut self) -> bool {
        let collapsed = self
            .with_engine(|engine| {
                let collapsed = engine.toggle_collapsed();
                if !collapsed {
                    engine.initialize();
                }
                engine.render();
                collapsed
            })
            .unwrap_or(false);
        self.sync_shortcuts();
        collapsed
    }

    #[wasm_bindgen(js_name = setEraser)]
    pub fn set_eraser(&self, eraser: bool) {
        let tool = if eraser { Tool::Eraser } else { Tool::Pen };
        self.with_engine(|engine| engine.set_tool(tool));
    }

    #[wasm_bindgen(js_name = setDark)]
    pub fn set_dark(&self, dark: bool) {
        self.with_engine(|engine| engine.set_theme(Theme::from_dark(dark)));
    }

    /// Returns `true` when the event was consumed and its default should be prevented.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, offset_x: f64, offset_y: f64) -> bool {
        let sample = PointerSample::Pointer { offset_x, offset_y };
        self.dispatch(|engine| engine.on_pointer_down(&sample))
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, offset_x: f64, offset_y: f64) -> bool {
        let sample = PointerSample::Pointer { offset_x, offset_y };
        self.dispatch(|engine| engine.on_pointer_move(&sample))
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&self) -> bool {
        self.dispatch(Engine::on_pointer_up)
    }

    /// First active touch in client coordinates plus the element's client origin.
    #[wasm_bindgen(js_name = touchStart)]
    pub fn touch_start(&self, client_x: f64, client_y: f64, origin_x: f64, origin_y: f64) -> bool {
        let sample = touch(client_x, client_y, origin_x, origin_y);
        self.dispatch(|engine| engine.on_pointer_down(&sample))
    }

    #[wasm_bindgen(js_name = touchMove)]
    pub fn touch_move(&self, client_x: f64, client_y: f64, origin_x: f64, origin_y: f64) -> bool {
        let sample = touch(client_x, client_y, origin_x, origin_y);
        self.dispatch(|engine| engine.on_pointer_move(&sample))
    }

    pub fn clear(&self) {
        self.dispatch(Engine::clear);
    }

    pub fn undo(&self) {
        self.dispatch(Engine::undo);
    }

    pub fn redo(&self) {
        self.dispatch(Engine::redo);
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.with_engine(|engine| engine.core.can_undo()).unwrap_or(false)
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.with_engine(|engine| engine.core.can_redo()).unwrap_or(false)
    }

    /// Download the drawing as `drawing-<timestamp>.png`.
    pub fn export(&self) {
        self.with_engine(|engine| engine.export());
    }
}

impl ScratchBoard {
    fn with_engine<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> Option<R> {
        match self.engine.try_borrow_mut() {
            Ok(mut engine) => Some(f(&mut engine)),
            Err(_) => {
                log::warn!("scratch board is busy; call ignored");
                None
            }
        }
    }

    /// Run an engine operation and present the surface if it changed.
    fn dispatch(&self, f: impl FnOnce(&mut Engine) -> Vec<Action>) -> bool {
        self.with_engine(|engine| {
            let actions = f(engine);
            if actions.contains(&Action::RenderNeeded) {
                engine.render();
            }
            !actions.is_empty()
        })
        .unwrap_or(false)
    }

    fn sync_shortcuts(&mut self) {
        let active = self.with_engine(|engine| engine.core.is_active()).unwrap_or(false);
        let engine = Rc::clone(&self.engine);
        let synced = sync_listener(&mut self.shortcuts, active, || {
            let window = web_sys::window().ok_or_else(|| CanvasError::Browser("no window".into()))?;
            web::bind_shortcuts(engine, &window)
        });
        if let Err(e) = synced {
            log::warn!("failed to bind scratch board shortcuts: {e}");
        }
    }
}

fn touch(client_x: f64, client_y: f64, origin_x: f64, origin_y: f64) -> PointerSample {
    PointerSample::Touch { touches: vec![TouchPoint { client_x, client_y }], origin: Point::new(origin_x, origin_y) }
}

/// Make `slot` hold a listener exactly while `wanted`.
///
/// Attaches through `attach` when one is wanted and missing; drops the held
/// one (which unregisters it) when it is no longer wanted.
///
/// # Errors
///
/// Returns the error from `attach`; `slot` stays empty.
pub(crate) fn sync_listener<S>(
    slot: &mut Option<S>,
    wanted: bool,
    attach: impl FnOnce() -> Result<S, CanvasError>,
) -> Result<(), CanvasError> {
    match (wanted, slot.is_some()) {
        (true, false) => *slot = Some(attach()?),
        (false, true) => *slot = None,
        _ => {}
    }
    Ok(())
}
