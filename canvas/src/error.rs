//! Error type shared by the surface, exporter, and browser bridge.

use crate::geom::Size;

/// Failure inside the annotation subsystem.
///
/// None of these escape the engine's public operations: callers in
/// [`crate::engine`] log them and carry on with a best-effort state.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// An operation needed pixels but the surface has not been initialized.
    #[error("surface is not initialized")]
    Uninitialized,
    /// A snapshot's byte length does not match its recorded dimensions.
    #[error("snapshot holds {actual} bytes, expected {expected} for {size:?}")]
    SnapshotMismatch { size: Size, expected: usize, actual: usize },
    /// PNG encoding failed.
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    /// The export timestamp could not be formatted.
    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
    /// A browser API call failed; the inner string is the stringified `JsValue`.
    #[error("browser call failed: {0}")]
    Browser(String),
}

impl From<wasm_bindgen::JsValue> for CanvasError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Browser(format!("{value:?}"))
    }
}
