//! Trait definition for the analysis service.
//!
//! Production code uses [`AnalysisClient`](super::AnalysisClient); tests
//! substitute [`mocks::MockAnalysisApi`].

use async_trait::async_trait;

use super::ApiError;
use super::dto::UploadResponse;
use crate::analysis::{AnalysisType, RawAnalysisResult};
use crate::player::AudioBlob;

/// Upload and analysis operations of the remote service.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Upload audio and return the server-side file id.
    async fn upload_audio(&self, blob: &AudioBlob) -> Result<UploadResponse, ApiError>;

    /// Run an analysis on an uploaded file.
    async fn analyze_audio(
        &self,
        file_id: &str,
        analysis_type: AnalysisType,
    ) -> Result<RawAnalysisResult, ApiError>;

    /// Fetch the stored result of an earlier analysis.
    async fn get_analysis_results(&self, file_id: &str) -> Result<RawAnalysisResult, ApiError>;
}

#[async_trait]
impl AnalysisApi for super::AnalysisClient {
    async fn upload_audio(&self, blob: &AudioBlob) -> Result<UploadResponse, ApiError> {
        self.upload_audio(blob).await
    }

    async fn analyze_audio(
        &self,
        file_id: &str,
        analysis_type: AnalysisType,
    ) -> Result<RawAnalysisResult, ApiError> {
        self.analyze_audio(file_id, analysis_type).await
    }

    async fn get_analysis_results(&self, file_id: &str) -> Result<RawAnalysisResult, ApiError> {
        self.get_analysis_results(file_id).await
    }
}

/// Upload `blob`, then request `analysis_type` for it.
pub async fn upload_and_analyze<A: AnalysisApi + ?Sized>(
    api: &A,
    blob: &AudioBlob,
    analysis_type: AnalysisType,
) -> Result<(UploadResponse, RawAnalysisResult), ApiError> {
    let upload = api.upload_audio(blob).await?;
    tracing::debug!("Uploaded {} as {}", upload.filename, upload.file_id);
    let raw = api.analyze_audio(&upload.file_id, analysis_type).await?;
    Ok((upload, raw))
}
