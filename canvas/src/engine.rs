use time::OffsetDateTime;
use uuid::Uuid;
use web_sys::HtmlCanvasElement;

use crate::consts::DEFAULT_LINE_WIDTH;
use crate::export::{self, ExportedImage};
use crate::geom::{Point, Size};
use crate::history::History;
use crate::input::{Key, Modifiers, PointerSample, Shortcut, StrokeState, Theme, Tool, UiState};
use crate::stroke::{self, StrokeStyle};
use crate::surface::{Snapshot, Surface};
use crate::web;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Surface pixels changed; the host should present them.
    RenderNeeded,
    /// The triggering browser event must not run its default behavior.
    PreventDefault,
    /// The pointer moved while drawing.
    CursorMoved(Point),
}

/// What a key-down listener must do with the browser event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    pub prevent_default: bool,
    pub render: bool,
}

impl KeyOutcome {
    #[must_use]
    pub fn from_actions(actions: &[Action]) -> Self {
        Self {
            prevent_default: actions.contains(&Action::PreventDefault),
            render: actions.contains(&Action::RenderNeeded),
        }
    }
}

/// Tunables fixed for the life of an engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    /// Stroke width in pixels for both pen and eraser.
    pub line_width: f64,
    /// Maximum number of undo states kept; `None` keeps everything.
    pub history_limit: Option<usize>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self { line_width: DEFAULT_LINE_WIDTH, history_limit: None }
    }
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Every instance owns its own surface, history, and UI state.
pub struct EngineCore {
    pub id: Uuid,
    pub surface: Surface,
    pub history: History,
    pub ui: UiState,
    pub stroke: StrokeState,
    options: EngineOptions,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_options(EngineOptions::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: EngineOptions) -> Self {
        Self {
            id: Uuid::new_v4(),
            surface: Surface::new(),
            history: History::with_limit(options.history_limit),
            ui: UiState::default(),
            stroke: StrokeState::Idle,
            options,
        }
    }

    /// Start with the given theme instead of the light default.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.ui.theme = theme;
        self
    }

    #[must_use]
    pub fn options(&self) -> EngineOptions {
        self.options
    }

    // --- Surface lifecycle ---

    /// Allocate the surface to match the measured container.
    ///
    /// Must be called again after every collapse → expand transition. Does
    /// nothing while collapsed or for an empty container.
    pub fn initialize(&mut self, container: Size) -> Vec<Action> {
        if self.ui.collapsed {
            return Vec::new();
        }
        self.stroke = StrokeState::Idle;
        if self.surface.initialize(container) {
            log::debug!("board {} initialized at {}x{}", self.id, container.width, container.height);
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Follow a container resize, keeping what fits of the current drawing.
    pub fn resize(&mut self, container: Size) -> Vec<Action> {
        if self.ui.collapsed || container.is_empty() || container == self.surface.size() {
            return Vec::new();
        }
        self.surface.resize(container);
        vec![Action::RenderNeeded]
    }

    /// Surface-local coordinates for a pointer or touch sample.
    #[must_use]
    pub fn map_event(&self, sample: &PointerSample) -> Point {
        self.surface.map_event(sample)
    }

    /// Whether the board is visible with a live surface.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.ui.collapsed && self.surface.is_initialized()
    }

    // --- Visibility ---

    /// Flip the collapsed flag and return the new value.
    ///
    /// Collapsing drops the surface and its history. Expanding leaves the
    /// surface uninitialized until the host calls [`Self::initialize`].
    pub fn toggle_collapsed(&mut self) -> bool {
        self.set_collapsed(!self.ui.collapsed);
        self.ui.collapsed
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        if collapsed == self.ui.collapsed {
            return;
        }
        self.ui.collapsed = collapsed;
        if collapsed {
            self.surface.reset();
            self.history.clear();
            self.stroke = StrokeState::Idle;
            self.ui.cursor = None;
            log::debug!("board {} collapsed", self.id);
        }
    }

    // --- Tool / theme ---

    /// Set the active tool. Only future strokes are affected.
    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
    }

    /// Follow an ambient theme change. Only future strokes are affected.
    pub fn set_theme(&mut self, theme: Theme) {
        self.ui.theme = theme;
    }

    /// Paint the next segment will use.
    #[must_use]
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle::new(self.ui.tool, self.ui.theme, self.options.line_width)
    }

    // --- Strokes ---

    /// Begin a stroke at `point`.
    ///
    /// Records the current surface for undo before anything is painted, so
    /// even a stroke that never moves can be undone.
    pub fn on_stroke_start(&mut self, point: Point) -> Vec<Action> {
        if !self.is_active() {
            return Vec::new();
        }
        self.record_before_mutation();
        self.stroke = StrokeState::Drawing { last: point };
        self.ui.cursor = Some(point);
        vec![Action::CursorMoved(point)]
    }

    /// Extend the current stroke to `point`. Ignored when no stroke is in progress.
    pub fn on_stroke_move(&mut self, point: Point) -> Vec<Action> {
        let StrokeState::Drawing { last } = self.stroke else {
            return Vec::new();
        };
        let style = self.stroke_style();
        stroke::draw_segment(&mut self.surface, last, point, style);
        self.stroke = StrokeState::Drawing { last: point };
        self.ui.cursor = Some(point);
        vec![Action::CursorMoved(point), Action::RenderNeeded]
    }

    /// Finish the current stroke.
    pub fn on_stroke_end(&mut self) -> Vec<Action> {
        self.stroke = StrokeState::Idle;
        Vec::new()
    }

    pub fn on_pointer_down(&mut self, sample: &PointerSample) -> Vec<Action> {
        let point = self.map_event(sample);
        self.on_stroke_start(point)
    }

    pub fn on_pointer_move(&mut self, sample: &PointerSample) -> Vec<Action> {
        let point = self.map_event(sample);
        self.on_stroke_move(point)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.on_stroke_end()
    }

    // --- History ---

    /// Blank the surface, recording its prior content for undo.
    pub fn clear(&mut self) -> Vec<Action> {
        if !self.is_active() {
            return Vec::new();
        }
        self.record_before_mutation();
        self.surface.clear();
        vec![Action::RenderNeeded]
    }

    /// Step back one state. No-op when there is nothing to undo.
    ///
    /// The stacks only move once the target has been put on the surface.
    pub fn undo(&mut self) -> Vec<Action> {
        if !self.history.can_undo() {
            return Vec::new();
        }
        let Some(current) = self.surface.snapshot() else {
            return Vec::new();
        };
        let Some(target) = self.history.peek_undo() else {
            return Vec::new();
        };
        if !restore_logged(&mut self.surface, self.id, target) {
            return Vec::new();
        }
        self.history.undo(current);
        vec![Action::RenderNeeded]
    }

    /// Step forward one state. No-op when there is nothing to redo.
    pub fn redo(&mut self) -> Vec<Action> {
        if !self.history.can_redo() {
            return Vec::new();
        }
        let Some(current) = self.surface.snapshot() else {
            return Vec::new();
        };
        let Some(target) = self.history.peek_redo() else {
            return Vec::new();
        };
        if !restore_logged(&mut self.surface, self.id, target) {
            return Vec::new();
        }
        self.history.redo(current);
        vec![Action::RenderNeeded]
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn record_before_mutation(&mut self) {
        if let Some(before) = self.surface.snapshot() {
            self.history.record(before);
        }
    }

    // --- Keyboard ---

    /// Handle a key-down. Ctrl/Cmd+Z undoes and Ctrl/Cmd+Y redoes while the
    /// board is visible; both suppress the browser default.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if !self.is_active() {
            return Vec::new();
        }
        let Some(shortcut) = Shortcut::resolve(key, modifiers) else {
            return Vec::new();
        };
        let mut actions = vec![Action::PreventDefault];
        actions.extend(match shortcut {
            Shortcut::Undo => self.undo(),
            Shortcut::Redo => self.redo(),
        });
        actions
    }

    // --- Export ---

    /// Encode the surface as a PNG named for `at`.
    ///
    /// Failures are logged and yield `None`.
    #[must_use]
    pub fn export_image(&self, at: OffsetDateTime) -> Option<ExportedImage> {
        match export::export_image(&self.surface, at) {
            Ok(image) => {
                log::info!("board {} exported {} ({} bytes)", self.id, image.filename, image.bytes.len());
                Some(image)
            }
            Err(e) => {
                log::error!("board {} export failed: {e}", self.id);
                None
            }
        }
    }
}

fn restore_logged(surface: &mut Surface, id: Uuid, target: &Snapshot) -> bool {
    match surface.restore(target) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("board {id} could not restore history state: {e}");
            false
        }
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, options: EngineOptions, theme: Theme) -> Self {
        Self { canvas, core: EngineCore::with_options(options).with_theme(theme) }
    }

    // --- Surface lifecycle ---

    /// Measure the canvas element and allocate a matching surface.
    pub fn initialize(&mut self) -> Vec<Action> {
        let size = self.measure();
        self.sync_element_size(size);
        self.core.initialize(size)
    }

    /// Re-measure after a container resize.
    pub fn resize(&mut self) -> Vec<Action> {
        let size = self.measure();
        let actions = self.core.resize(size);
        if !actions.is_empty() {
            self.sync_element_size(size);
        }
        actions
    }

    pub fn toggle_collapsed(&mut self) -> bool {
        self.core.toggle_collapsed()
    }

    fn measure(&self) -> Size {
        Size::from_css(f64::from(self.canvas.client_width()), f64::from(self.canvas.client_height()))
    }

    fn sync_element_size(&self, size: Size) {
        if !size.is_empty() {
            self.canvas.set_width(size.width);
            self.canvas.set_height(size.height);
        }
    }

    // --- Delegated inputs ---

    pub fn set_tool(&mut self, tool: Tool) {
        self.core.set_tool(tool);
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.core.set_theme(theme);
    }

    pub fn on_pointer_down(&mut self, sample: &PointerSample) -> Vec<Action> {
        self.core.on_pointer_down(sample)
    }

    pub fn on_pointer_move(&mut self, sample: &PointerSample) -> Vec<Action> {
        self.core.on_pointer_move(sample)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.core.on_pointer_up()
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn clear(&mut self) -> Vec<Action> {
        self.core.clear()
    }

    pub fn undo(&mut self) -> Vec<Action> {
        self.core.undo()
    }

    pub fn redo(&mut self) -> Vec<Action> {
        self.core.redo()
    }

    // --- Render ---

    /// Copy the surface onto the canvas element. Failures are logged.
    pub fn render(&self) {
        if let Err(e) = web::present(&self.canvas, &self.core.surface) {
            log::warn!("board {} render failed: {e}", self.core.id);
        }
    }

    // --- Export ---

    /// Encode the surface and start a client-side download. Failures are logged.
    pub fn export(&self) {
        let at = match web::now() {
            Ok(at) => at,
            Err(e) => {
                log::error!("board {} export failed: {e}", self.core.id);
                return;
            }
        };
        let Some(image) = self.core.export_image(at) else {
            return;
        };
        if let Err(e) = web::download(&image) {
            log::error!("board {} download failed: {e}", self.core.id);
        }
    }
}
