//! Command-line interface for audio-insight.
//!
//! This module provides CLI commands for rendering analysis results,
//! probing local audio and running analyses against the service.

mod commands;

pub use commands::{Cli, Commands, run_command};
