//! Client for the remote upload/analysis service.
//!
//! - **DTOs** (`dto.rs`) - upload response and request envelopes
//! - **Client** (`client.rs`) - reqwest implementation of the endpoints
//! - **Traits** (`traits.rs`) - [`AnalysisApi`] seam for mocking
//!
//! Analysis responses are returned raw; turn them into view models with
//! [`crate::analysis::build`].

pub mod client;
pub mod dto;
pub mod traits;

pub use client::AnalysisClient;
pub use dto::UploadResponse;
pub use traits::{AnalysisApi, upload_and_analyze};

/// Errors talking to the analysis service
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
