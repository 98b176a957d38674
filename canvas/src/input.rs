//! Input model: tools, theme, modifier keys, pointer samples, and the stroke
//! state machine.
//!
//! `Tool` and `Theme` together decide what color the next stroke paints.
//! `PointerSample` is a host-neutral description of a pointer or touch event;
//! the surface turns it into local coordinates. `StrokeState` tracks the one
//! gesture this engine understands, a freehand stroke, between pointer-down
//! and pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DARK_BACKGROUND, DARK_FOREGROUND, LIGHT_BACKGROUND, LIGHT_FOREGROUND};
use crate::geom::Point;

/// Which drawing tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Paint with the theme's foreground color (default).
    #[default]
    Pen,
    /// Paint with the theme's background color.
    Eraser,
}

/// Ambient color theme, supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Build from the host's dark-mode flag.
    #[must_use]
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    /// Ink color for the pen.
    #[must_use]
    pub fn foreground(self) -> [u8; 4] {
        match self {
            Self::Light => LIGHT_FOREGROUND,
            Self::Dark => DARK_FOREGROUND,
        }
    }

    /// Paper color, used by the eraser.
    #[must_use]
    pub fn background(self) -> [u8; 4] {
        match self {
            Self::Light => LIGHT_BACKGROUND,
            Self::Dark => DARK_BACKGROUND,
        }
    }
}

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"z"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Case-insensitive match against a single-character key name.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

/// Keyboard shortcuts bound by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
}

impl Shortcut {
    /// Resolve a key-down into a shortcut, if it is one.
    #[must_use]
    pub fn resolve(key: &Key, modifiers: Modifiers) -> Option<Self> {
        if !modifiers.command() {
            return None;
        }
        if key.is("z") {
            Some(Self::Undo)
        } else if key.is("y") {
            Some(Self::Redo)
        } else {
            None
        }
    }
}

/// One active touch contact in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub client_x: f64,
    pub client_y: f64,
}

/// A pointer or touch event as seen by the board.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerSample {
    /// Mouse or pen input; the host reports offsets relative to the surface directly.
    Pointer { offset_x: f64, offset_y: f64 },
    /// Touch input; `origin` is the surface's top-left corner in client coordinates.
    Touch { touches: Vec<TouchPoint>, origin: Point },
}

/// Stroke gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    /// No stroke in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A stroke is being drawn.
    Drawing {
        /// End of the most recently drawn segment; the next segment starts here.
        last: Point,
    },
}

impl StrokeState {
    #[must_use]
    pub fn is_drawing(self) -> bool {
        matches!(self, Self::Drawing { .. })
    }
}

/// Per-instance UI state visible to the host.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active drawing tool.
    pub tool: Tool,
    /// Theme the stroke color is derived from.
    pub theme: Theme,
    /// Whether the board is folded away. A collapsed board has no surface.
    pub collapsed: bool,
    /// Last pointer position seen during a stroke.
    pub cursor: Option<Point>,
}
