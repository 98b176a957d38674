//! Replay configuration from command-line flags and `SCRATCHBOARD_*` env vars.

use std::path::PathBuf;

use canvas::engine::EngineOptions;
use canvas::geom::Size;
use canvas::input::Theme;
use clap::Parser;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_LINE_WIDTH: f64 = canvas::consts::DEFAULT_LINE_WIDTH;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("board dimensions must be non-zero, got {width}x{height}")]
    EmptyBoard { width: u32, height: u32 },
    #[error("line width must be a positive number, got {0}")]
    LineWidth(f64),
}

#[derive(Parser, Debug)]
#[command(name = "scratchboard", about = "Replay a scratch board session headlessly and export it as PNG")]
pub struct Cli {
    /// JSON file holding the interaction script.
    #[arg(long, env = "SCRATCHBOARD_SCRIPT")]
    pub script: PathBuf,

    /// Directory the exported PNG is written to.
    #[arg(long, env = "SCRATCHBOARD_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    #[arg(long, env = "SCRATCHBOARD_WIDTH", default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    #[arg(long, env = "SCRATCHBOARD_HEIGHT", default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// `light` or `dark`.
    #[arg(long, env = "SCRATCHBOARD_THEME", default_value = "light", value_parser = parse_theme)]
    pub theme: Theme,

    #[arg(long, env = "SCRATCHBOARD_LINE_WIDTH", default_value_t = DEFAULT_LINE_WIDTH)]
    pub line_width: f64,

    /// Cap on retained undo states; unbounded when absent.
    #[arg(long, env = "SCRATCHBOARD_HISTORY_LIMIT")]
    pub history_limit: Option<usize>,
}

/// Validated settings for one replay run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayConfig {
    pub script: PathBuf,
    pub out_dir: PathBuf,
    pub size: Size,
    pub theme: Theme,
    pub engine: EngineOptions,
}

impl TryFrom<Cli> for ReplayConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let size = Size::new(cli.width, cli.height);
        if size.is_empty() {
            return Err(ConfigError::EmptyBoard { width: cli.width, height: cli.height });
        }
        if !cli.line_width.is_finite() || cli.line_width <= 0.0 {
            return Err(ConfigError::LineWidth(cli.line_width));
        }
        Ok(Self {
            script: cli.script,
            out_dir: cli.out_dir,
            size,
            theme: cli.theme,
            engine: EngineOptions { line_width: cli.line_width, history_limit: cli.history_limit },
        })
    }
}

fn parse_theme(raw: &str) -> Result<Theme, String> {
    match raw.to_ascii_lowercase().as_str() {
        "light" => Ok(Theme::Light),
        "dark" => Ok(Theme::Dark),
        other => Err(format!("unknown theme '{other}' (expected 'light' or 'dark')")),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
