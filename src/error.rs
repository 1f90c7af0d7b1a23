//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level error enum
//! - Module-specific errors ([`PlayerError`], [`AnalysisError`],
//!   [`ApiError`], [`ConfigError`]) for detailed handling
//!
//! # Example
//!
//! ```ignore
//! use audio_insight::error::{Result, ResultExt};
//!
//! fn load(path: &Path) -> Result<AudioBlob> {
//!     let blob = AudioBlob::from_path(path).with_context("reading input")?;
//!     Ok(blob)
//! }
//! ```

use crate::analysis::AnalysisError;
use crate::api::ApiError;
use crate::config::ConfigError;
use crate::player::PlayerError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Playback or resource error
    #[error("Playback error: {0}")]
    Player(#[from] PlayerError),

    /// Analysis result could not be turned into a view model
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Analysis service request failed
    #[error("Service error: {0}")]
    Api(#[from] ApiError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().context(ctx))
    }
}
