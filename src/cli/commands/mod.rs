//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `view`: Render a saved analysis result
//! - `probe`: Load local audio through the playback controller
//! - `analyze`: Upload audio and render the service's analysis
//! - `results`: Render a result the service already stored
//! - `render`: Shared text output for view models

mod analyze;
mod probe;
mod render;
mod results;
mod view;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

use crate::analysis::AnalysisType;
use crate::config;
use crate::error::ResultExt;
use crate::player::AudioBlob;

pub use analyze::cmd_analyze;
pub use probe::cmd_probe;
pub use results::cmd_results;
pub use view::cmd_view;

/// Audio Insight CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Render a saved analysis result
    View {
        /// Path to the raw result JSON
        path: PathBuf,
        /// Analysis type the result was produced for
        #[arg(short = 't', long = "type", default_value = "general")]
        analysis_type: AnalysisType,
        /// Track length in seconds (overrides the downbeat estimate)
        #[arg(long)]
        duration: Option<f64>,
        /// Print the view model as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load an audio file and report its playable resource
    Probe {
        /// Path to the audio file
        path: PathBuf,
    },
    /// Upload an audio file and show its analysis
    Analyze {
        /// Path to the audio file
        path: PathBuf,
        /// Analysis type to request
        #[arg(short = 't', long = "type", default_value = "general")]
        analysis_type: AnalysisType,
        /// Service base URL (or set AUDIO_INSIGHT_SERVER env var)
        #[arg(long, env = "AUDIO_INSIGHT_SERVER")]
        server: Option<String>,
        /// Print the view model as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a stored analysis of an uploaded file
    Results {
        /// Server-side file id returned by the upload
        file_id: String,
        /// Analysis type the result was produced for
        #[arg(short = 't', long = "type", default_value = "general")]
        analysis_type: AnalysisType,
        /// Service base URL (or set AUDIO_INSIGHT_SERVER env var)
        #[arg(long, env = "AUDIO_INSIGHT_SERVER")]
        server: Option<String>,
        /// Print the view model as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

/// Run the specified CLI command.
///
/// Returns `Ok(true)` if a command was run, `Ok(false)` if no command was specified.
pub fn run_command(cli: &Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Some(Commands::View {
            path,
            analysis_type,
            duration,
            json,
        }) => {
            cmd_view(path, *analysis_type, *duration, *json)?;
            Ok(true)
        }
        Some(Commands::Probe { path }) => {
            cmd_probe(path)?;
            Ok(true)
        }
        Some(Commands::Analyze {
            path,
            analysis_type,
            server,
            json,
        }) => {
            let rt = Runtime::new()?;
            cmd_analyze(&rt, path, *analysis_type, server.as_deref(), *json)?;
            Ok(true)
        }
        Some(Commands::Results {
            file_id,
            analysis_type,
            server,
            json,
        }) => {
            let rt = Runtime::new()?;
            cmd_results(&rt, file_id, *analysis_type, server.as_deref(), *json)?;
            Ok(true)
        }
        Some(Commands::Config { init }) => {
            cmd_config(*init)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Print the config path and effective settings
///
/// With `init`, the effective settings (defaults filled in) are also written
/// back to the config file.
pub fn cmd_config(init: bool) -> anyhow::Result<()> {
    let Some(path) = config::config_path() else {
        println!("# (no config directory available)");
        print!("{}", toml::to_string_pretty(&config::Config::default())?);
        return Ok(());
    };

    println!("# {}", path.display());
    let config = if init {
        init_config(&path)?
    } else {
        config::load_from(&path)
    };
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

/// Load the config at `path` and save it back with every field present.
pub(crate) fn init_config(path: &Path) -> crate::error::Result<config::Config> {
    let config = config::load_from(path);
    config::save_to(&config, path)?;
    Ok(config)
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Read an audio file into a blob, tagging it with a MIME type when the
/// extension is recognized.
pub(crate) fn load_blob(path: &Path) -> crate::error::Result<AudioBlob> {
    let blob = AudioBlob::from_path(path).with_context(format!("reading {}", path.display()))?;
    Ok(match mime_for_extension(blob.extension().as_deref()) {
        Some(mime) => blob.with_mime_type(mime),
        None => blob,
    })
}

/// MIME type for an audio file extension
pub(crate) fn mime_for_extension(ext: Option<&str>) -> Option<&'static str> {
    match ext? {
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        "flac" => Some("audio/flac"),
        "ogg" | "oga" => Some("audio/ogg"),
        "m4a" | "aac" => Some("audio/aac"),
        _ => None,
    }
}
