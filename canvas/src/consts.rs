//! Shared constants for the canvas crate.

// ── Stroke style ────────────────────────────────────────────────

/// Default pen and eraser line width in pixels.
pub const DEFAULT_LINE_WIDTH: f64 = 3.0;

// ── Theme colors (RGBA) ─────────────────────────────────────────

/// Pen color on the light theme.
pub const LIGHT_FOREGROUND: [u8; 4] = [0x00, 0x00, 0x00, 0xFF];

/// Eraser color on the light theme.
pub const LIGHT_BACKGROUND: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

/// Pen color on the dark theme.
pub const DARK_FOREGROUND: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

/// Eraser color on the dark theme.
pub const DARK_BACKGROUND: [u8; 4] = [0x1E, 0x1E, 0x1E, 0xFF];

/// A never-drawn pixel.
pub const BLANK: [u8; 4] = [0, 0, 0, 0];

// ── Export ──────────────────────────────────────────────────────

/// Prefix of every exported file name.
pub const EXPORT_PREFIX: &str = "drawing-";

/// MIME type attached to the downloaded blob.
pub const EXPORT_MIME: &str = "image/png";
