//! Browser bridge: the only module that touches the DOM.
//!
//! Presents surface pixels on an `HtmlCanvasElement`, starts client-side
//! downloads for exports, and owns the global key-down listener. Everything
//! here is a thin shim over `web-sys`; the behavior lives in
//! [`crate::engine::EngineCore`].
//!
//! All fallible DOM calls propagate errors as [`CanvasError::Browser`].

use std::cell::RefCell;
use std::rc::Rc;

use time::OffsetDateTime;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{
    Blob, BlobPropertyBag, CanvasRenderingContext2d, EventTarget, HtmlAnchorElement, HtmlCanvasElement, ImageData,
    KeyboardEvent, Url,
};

use crate::consts::EXPORT_MIME;
use crate::engine::{Engine, KeyOutcome};
use crate::error::CanvasError;
use crate::export::ExportedImage;
use crate::input::{Key, Modifiers};
use crate::surface::Surface;

const KEYDOWN: &str = "keydown";

/// Wall-clock time from the browser.
///
/// # Errors
///
/// Returns [`CanvasError::Browser`] if the clock reading is out of range.
pub fn now() -> Result<OffsetDateTime, CanvasError> {
    let millis = js_sys::Date::now() as i64;
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .map_err(|e| CanvasError::Browser(e.to_string()))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, CanvasError> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| CanvasError::Browser("2d context unavailable".into()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| CanvasError::Browser("context is not a CanvasRenderingContext2d".into()))
}

/// Copy `surface` onto `canvas` at the origin. An uninitialized surface clears the element.
///
/// # Errors
///
/// Returns `Err` if the 2D context or `ImageData` cannot be created.
pub fn present(canvas: &HtmlCanvasElement, surface: &Surface) -> Result<(), CanvasError> {
    let ctx = context_2d(canvas)?;
    let Some(img) = surface.image() else {
        ctx.clear_rect(0.0, 0.0, f64::from(canvas.width()), f64::from(canvas.height()));
        return Ok(());
    };
    let data = ImageData::new_with_u8_clamped_array_and_sh(Clamped(img.as_raw().as_slice()), img.width(), img.height())?;
    ctx.put_image_data(&data, 0.0, 0.0)?;
    Ok(())
}

/// Hand `image` to the browser as a file download.
///
/// The object URL is released on the next task, after the click has been
/// handed off.
///
/// # Errors
///
/// Returns `Err` if there is no document or any blob/URL/anchor call fails.
pub fn download(image: &ExportedImage) -> Result<(), CanvasError> {
    let window = web_sys::window().ok_or_else(|| CanvasError::Browser("no window".into()))?;
    let document = window.document().ok_or_else(|| CanvasError::Browser("no document".into()))?;

    let bytes = js_sys::Uint8Array::from(image.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(EXPORT_MIME);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor = document
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| CanvasError::Browser("created element is not an anchor".into()))?;
    anchor.set_href(&url);
    anchor.set_download(&image.filename);
    anchor.click();

    // Revoking in the same task can cancel the download in some browsers.
    let revoke = Closure::once_into_js(move || {
        if let Err(e) = Url::revoke_object_url(&url) {
            log::warn!("failed to revoke export url: {e:?}");
        }
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(revoke.unchecked_ref(), 0)?;
    Ok(())
}

/// Modifier keys carried by a keyboard event.
#[must_use]
pub fn keyboard_modifiers(event: &KeyboardEvent) -> Modifiers {
    Modifiers { shift: event.shift_key(), ctrl: event.ctrl_key(), alt: event.alt_key(), meta: event.meta_key() }
}

/// A registered `keydown` listener. Dropping it removes the listener.
pub struct KeyboardSubscription {
    target: EventTarget,
    callback: Closure<dyn FnMut(KeyboardEvent)>,
}

impl KeyboardSubscription {
    /// Register `handler` for `keydown` on `target`. When the handler returns
    /// `true` the event's default action is prevented.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the listener cannot be added.
    pub fn attach<F>(target: &EventTarget, mut handler: F) -> Result<Self, CanvasError>
    where
        F: FnMut(&KeyboardEvent) -> bool + 'static,
    {
        let callback = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if handler(&event) {
                event.prevent_default();
            }
        });
        target.add_event_listener_with_callback(KEYDOWN, callback.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), callback })
    }
}

impl Drop for KeyboardSubscription {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(KEYDOWN, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove keydown listener: {e:?}");
        }
    }
}

/// Route undo/redo shortcuts on `target` to `engine` for as long as the
/// returned subscription lives.
///
/// A key press that arrives while the engine is already borrowed (for
/// example mid-stroke inside another handler) is ignored.
///
/// # Errors
///
/// Returns `Err` if the listener cannot be added.
pub fn bind_shortcuts(engine: Rc<RefCell<Engine>>, target: &EventTarget) -> Result<KeyboardSubscription, CanvasError> {
    KeyboardSubscription::attach(target, move |event| {
        let Ok(mut engine) = engine.try_borrow_mut() else {
            return false;
        };
        let outcome = KeyOutcome::from_actions(&engine.on_key_down(&Key(event.key()), keyboard_modifiers(event)));
        if outcome.render {
            engine.render();
        }
        outcome.prevent_default
    })
}
