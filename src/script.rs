//! Interaction scripts: a recorded scratch board session as JSON.
//!
//! A script is an array of ops tagged by `"op"`:
//!
//! ```json
//! [
//!   { "op": "stroke", "points": [[10, 10], [40, 25], [80, 30]] },
//!   { "op": "tool", "tool": "eraser" },
//!   { "op": "key", "key": "z", "ctrl": true },
//!   { "op": "resize", "width": 1024, "height": 768 }
//! ]
//! ```
//!
//! Replaying drives [`EngineCore`] exactly the way the browser host would.

use canvas::engine::EngineCore;
use canvas::geom::{Point, Size};
use canvas::input::{Key, Modifiers, Theme, Tool};
use serde::Deserialize;

/// One recorded interaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    /// Press at the first point, drag through the rest, release.
    Stroke { points: Vec<[f64; 2]> },
    /// Press and release without moving.
    Tap { x: f64, y: f64 },
    Tool { tool: Tool },
    Theme { theme: Theme },
    Undo,
    Redo,
    Clear,
    /// The container changed size.
    Resize { width: u32, height: u32 },
    Collapse,
    /// Unfold and re-initialize at the current container size.
    Expand,
    /// A key-down, routed through the shortcut bindings.
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        meta: bool,
    },
}

/// Counters reported after a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub ops: usize,
    pub strokes: usize,
    pub renders: usize,
    pub undo_depth: usize,
    pub redo_depth: usize,
}

/// Decode a script.
///
/// # Errors
///
/// Returns the JSON error if the text is not an array of known ops.
pub fn parse(json: &str) -> Result<Vec<Op>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Apply `ops` in order to `core`, acting as a host whose container is `container`.
pub fn replay(core: &mut EngineCore, container: Size, ops: &[Op]) -> ReplaySummary {
    let mut container = container;
    let mut summary = ReplaySummary::default();

    for op in ops {
        tracing::debug!(board = %core.id, ?op, "replaying op");
        let actions = match op {
            Op::Stroke { points } => {
                summary.strokes += 1;
                let mut actions = Vec::new();
                let mut points = points.iter().map(|[x, y]| Point::new(*x, *y));
                if let Some(first) = points.next() {
                    actions.extend(core.on_stroke_start(first));
                    for p in points {
                        actions.extend(core.on_stroke_move(p));
                    }
                    actions.extend(core.on_stroke_end());
                }
                actions
            }
            Op::Tap { x, y } => {
                summary.strokes += 1;
                let mut actions = core.on_stroke_start(Point::new(*x, *y));
                actions.extend(core.on_stroke_end());
                actions
            }
            Op::Tool { tool } => {
                core.set_tool(*tool);
                Vec::new()
            }
            Op::Theme { theme } => {
                core.set_theme(*theme);
                Vec::new()
            }
            Op::Undo => core.undo(),
            Op::Redo => core.redo(),
            Op::Clear => core.clear(),
            Op::Resize { width, height } => {
                container = Size::new(*width, *height);
                core.resize(container)
            }
            Op::Collapse => {
                core.set_collapsed(true);
                Vec::new()
            }
            Op::Expand => {
                core.set_collapsed(false);
                core.initialize(container)
            }
            Op::Key { key, ctrl, meta } => {
                let modifiers = Modifiers { ctrl: *ctrl, meta: *meta, ..Modifiers::default() };
                core.on_key_down(&Key(key.clone()), modifiers)
            }
        };
        summary.ops += 1;
        summary.renders += actions.iter().filter(|a| matches!(a, canvas::engine::Action::RenderNeeded)).count();
    }

    summary.undo_depth = core.history.undo_len();
    summary.redo_depth = core.history.redo_len();
    summary
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
