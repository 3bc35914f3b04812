//! # Shape Editor
//!
//! Line-oriented host for the shape editor core. Reads one command per line
//! from stdin and drives a single editor session over a headless scene,
//! standing in for the toolbar buttons, file picker and key bindings of a
//! graphical front end.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p shape-editor -- --data-dir scenes --seed 7
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `HostConfig` - Data directory, startup import, and session settings
//! - `EditorHost` - Owns the session and executes parsed `Command`s

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
mod host;

pub use command::{Command, CommandError};
pub use host::{EditorHost, Flow};

use std::path::PathBuf;

use clap::Parser;
use shape_core::EditorConfig;

/// Command-line arguments for shape-editor.
#[derive(Debug, Clone, Parser)]
#[command(name = "shape-editor")]
#[command(about = "Interactive shape editor with JSON scene export/import")]
#[command(version)]
pub struct CliArgs {
    /// Directory exports are saved to and imports are read from
    #[arg(long, env = "SHAPE_EDITOR_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Scene document to import on startup
    #[arg(long)]
    pub import: Option<PathBuf>,

    /// Seed for random placement (reproducible sessions)
    #[arg(long, env = "SHAPE_EDITOR_SEED")]
    pub seed: Option<u64>,

    /// Half-width of the square random shapes are placed in
    #[arg(long, default_value = "5.0")]
    pub extent: f64,

    /// Write exports without indentation
    #[arg(long)]
    pub compact: bool,

    /// Maximum number of live visuals before adding fails
    #[arg(long)]
    pub max_visuals: Option<usize>,
}

/// Host configuration.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Directory for saved and opened documents.
    pub data_dir: PathBuf,
    /// Document imported before reading commands.
    pub import: Option<PathBuf>,
    /// Placement seed; entropy when absent.
    pub seed: Option<u64>,
    /// Visual capacity of the headless scene.
    pub max_visuals: Option<usize>,
    /// Editor session settings.
    pub editor: EditorConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl HostConfig {
    /// Create a host configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            import: None,
            seed: None,
            max_visuals: None,
            editor: EditorConfig::default(),
        }
    }
}

impl From<CliArgs> for HostConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            data_dir: args.data_dir,
            import: args.import,
            seed: args.seed,
            max_visuals: args.max_visuals,
            editor: EditorConfig::default()
                .with_placement_extent(args.extent)
                .with_pretty_export(!args.compact),
        }
    }
}
