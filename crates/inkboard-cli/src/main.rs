//! Command-line replay of canvas action scripts.
//!
//! A script is a JSON array of steps. Each step is either a canvas
//! [`Action`], a `key` press, or an `insert_image_file` that reads the image
//! from disk to learn its size before placing it.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use inkboard_core::{
    Action, Canvas, ConfigError, EngineConfig, KeyInput, Modifiers, ShortcutRegistry,
};
use kurbo::Point;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("no script given; pass a script path or --shortcuts")]
    MissingScript,
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("unsupported image format: {0}")]
    UnsupportedImage(PathBuf),
    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
}

#[derive(Parser, Debug)]
#[command(name = "inkboard", about = "Replay whiteboard action scripts")]
struct Cli {
    /// Engine config (JSON).
    #[arg(long, env = "INKBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Print the keyboard shortcuts and exit.
    #[arg(long)]
    shortcuts: bool,

    /// Script to replay (JSON array of steps).
    script: Option<PathBuf>,
}

/// Steps handled here rather than by the canvas.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum HostStep {
    InsertImageFile {
        path: PathBuf,
        point: Point,
    },
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
        #[serde(default)]
        in_text_input: bool,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScriptStep {
    Canvas(Action),
    Host(HostStep),
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Place an image file at its intrinsic size (scaled by the canvas).
fn insert_image_file(canvas: &mut Canvas, path: &Path, point: Point) -> Result<(), CliError> {
    let data = fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let format = image::guess_format(&data)
        .map_err(|_| CliError::UnsupportedImage(path.to_path_buf()))?;
    let decoded =
        image::load_from_memory_with_format(&data, format).map_err(|source| CliError::Image {
            path: path.to_path_buf(),
            source,
        })?;

    log::debug!(
        "Inserting {} ({}, {}x{})",
        path.display(),
        format.to_mime_type(),
        decoded.width(),
        decoded.height()
    );
    canvas.add_image(
        point,
        path.display().to_string(),
        f64::from(decoded.width()),
        f64::from(decoded.height()),
    );
    Ok(())
}

/// Replay a script against a fresh canvas and return the final render state.
fn run_script(config: EngineConfig, script: &Path) -> Result<String, CliError> {
    let steps: Vec<ScriptStep> = serde_json::from_str(&read(script)?)?;
    let base = script.parent().unwrap_or_else(|| Path::new("."));
    let mut canvas = Canvas::with_config(config)?;

    log::info!("Replaying {} steps from {}", steps.len(), script.display());
    for step in steps {
        match step {
            ScriptStep::Canvas(action) => canvas.dispatch(action),
            ScriptStep::Host(HostStep::InsertImageFile { path, point }) => {
                insert_image_file(&mut canvas, &base.join(path), point)?;
            }
            ScriptStep::Host(HostStep::Key {
                key,
                modifiers,
                in_text_input,
            }) => {
                let input = KeyInput {
                    key,
                    modifiers,
                    in_text_input,
                };
                canvas.handle_key(&input);
            }
        }
    }

    Ok(serde_json::to_string_pretty(&canvas.render_state())?)
}

fn run(cli: Cli) -> Result<String, CliError> {
    if cli.shortcuts {
        let lines: Vec<String> = ShortcutRegistry::all()
            .iter()
            .map(|s| format!("  {:10} {}", s.format(), s.description))
            .collect();
        return Ok(lines.join("\n"));
    }

    let script = cli.script.ok_or(CliError::MissingScript)?;
    let config = match cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    run_script(config, &script)
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
