mod config;
mod script;

use std::path::PathBuf;
use std::process::ExitCode;
use std::{fs, io};

use canvas::engine::EngineCore;
use clap::Parser;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, ConfigError, ReplayConfig};

#[derive(Debug, thiserror::Error)]
enum ReplayError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("i/o error on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("export produced no image")]
    Export,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Cli::parse()) {
        Ok(path) => {
            tracing::info!(path = %path.display(), "drawing exported");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "replay failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<PathBuf, ReplayError> {
    let config = ReplayConfig::try_from(cli)?;

    let json = fs::read_to_string(&config.script).map_err(|source| ReplayError::Io { path: config.script.clone(), source })?;
    let ops = script::parse(&json)?;
    tracing::info!(script = %config.script.display(), ops = ops.len(), "script loaded");

    let mut core = EngineCore::with_options(config.engine).with_theme(config.theme);
    core.initialize(config.size);
    let summary = script::replay(&mut core, config.size, &ops);
    tracing::info!(
        board = %core.id,
        ops = summary.ops,
        strokes = summary.strokes,
        renders = summary.renders,
        undo_depth = summary.undo_depth,
        redo_depth = summary.redo_depth,
        history_bytes = core.history.byte_len(),
        "replay finished"
    );

    let image = core.export_image(OffsetDateTime::now_utc()).ok_or(ReplayError::Export)?;
    fs::create_dir_all(&config.out_dir).map_err(|source| ReplayError::Io { path: config.out_dir.clone(), source })?;
    let path = config.out_dir.join(&image.filename);
    fs::write(&path, &image.bytes).map_err(|source| ReplayError::Io { path: path.clone(), source })?;
    Ok(path)
}
