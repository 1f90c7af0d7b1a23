//! Analysis service request/response DTOs.
//!
//! Analysis responses themselves use
//! [`RawAnalysisResult`](crate::analysis::RawAnalysisResult); this file only
//! carries the upload and request envelopes.

use serde::{Deserialize, Serialize};

/// Response to `POST /audio/upload`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UploadResponse {
    pub file_id: String,
    pub filename: String,
    /// Server-side storage path (not always returned)
    #[serde(default)]
    pub file_path: Option<String>,
}

/// Body of `POST /audio/analyze/{file_id}`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub analysis_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_service: Option<&'a str>,
}
