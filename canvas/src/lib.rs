//! Scratch board engine for the practice arena.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns a
//! freehand drawing surface: translating pointer and keyboard input into
//! strokes, keeping a linear undo/redo history of full-surface snapshots,
//! preserving the drawing across container resizes, and exporting it as a
//! PNG. The host UI only measures the container, forwards DOM events, and
//! supplies the current theme.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`host`] | [`host::ScratchBoard`], the handle exported to JavaScript |
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`surface`] | Pixel buffer, snapshots, event coordinate mapping |
//! | [`stroke`] | Segment rasterization and stroke color selection |
//! | [`history`] | Linear undo/redo stacks |
//! | [`export`] | PNG encoding and download file names |
//! | [`input`] | Tools, theme, keys, pointer samples, stroke state machine |
//! | [`geom`] | `Point` and `Size` |
//! | [`web`] | DOM bridge: presenting, downloading, keyboard listeners |
//! | [`error`] | [`error::CanvasError`] |
//! | [`consts`] | Defaults (line width, theme colors, export naming) |

pub mod consts;
pub mod engine;
pub mod error;
pub mod export;
pub mod geom;
pub mod history;
pub mod host;
pub mod input;
pub mod stroke;
pub mod surface;
pub mod web;
