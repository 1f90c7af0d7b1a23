//! Audio Insight - playback and analysis view models for uploaded audio.
//!
//! - [`player`]: the playback controller and its playable resources
//! - [`analysis`]: conversion of raw analysis results into view models
//! - [`api`]: client for the upload/analysis service

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod player;
#[cfg(test)]
pub mod test_utils;
