//! Analysis service HTTP client
//!
//! ## Endpoints
//!
//! | operation | request |
//! |---|---|
//! | upload | `POST /audio/upload` (multipart, field `file`) |
//! | general analysis | `POST /audio/analyze/{id}` with `{"analysis_type": ...}` |
//! | music theory | `POST /audio/analyze/music-theory/{id}` |
//! | production | `POST /audio/analyze/production/{id}` |
//! | arrangement | `POST /audio/analyze/arrangement/{id}` |
//! | stored results | `GET /audio/analysis/{id}` |
//!
//! The type-specific endpoints take the AI backend as an `ai_service` query
//! parameter; the general endpoint takes it in the JSON body.
//!
//! The client never retries. A failed request is returned to the caller.

use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use super::ApiError;
use super::dto::{AnalyzeRequest, UploadResponse};
use crate::analysis::{AnalysisType, RawAnalysisResult};
use crate::config::ServiceConfig;
use crate::player::AudioBlob;

/// Analysis service client
pub struct AnalysisClient {
    http_client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    ai_service: Option<String>,
}

impl AnalysisClient {
    /// Create a client from service settings
    ///
    /// The client is configured to:
    /// - Accept gzip-compressed responses
    /// - Send User-Agent header identifying the application
    /// - Give up after the configured timeout
    pub fn new(config: &ServiceConfig) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.is_empty()),
            ai_service: config.ai_service.clone().filter(|s| !s.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload a blob and return its server-side id
    pub async fn upload_audio(&self, blob: &AudioBlob) -> Result<UploadResponse, ApiError> {
        let mut part =
            reqwest::multipart::Part::bytes(blob.bytes().to_vec()).file_name(blob.name.clone());
        if let Some(mime) = &blob.mime_type {
            part = part
                .mime_str(mime)
                .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        }
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = format!("{}/audio/upload", self.base_url);
        tracing::info!("Uploading {} ({} bytes)", blob.name, blob.len());
        self.send(self.http_client.post(&url).multipart(form)).await
    }

    /// Request an analysis of an uploaded file
    pub async fn analyze_audio(
        &self,
        file_id: &str,
        analysis_type: AnalysisType,
    ) -> Result<RawAnalysisResult, ApiError> {
        let url = self.analyze_url(file_id, analysis_type);
        tracing::info!("Requesting {} analysis for {}", analysis_type, file_id);

        let request = match analysis_type {
            AnalysisType::General => self.http_client.post(&url).json(&AnalyzeRequest {
                analysis_type: analysis_type.as_str(),
                ai_service: self.ai_service.as_deref(),
            }),
            _ => {
                let mut request = self
                    .http_client
                    .post(&url)
                    .json(&serde_json::Value::Object(Default::default()));
                if let Some(service) = &self.ai_service {
                    request = request.query(&[("ai_service", service)]);
                }
                request
            }
        };

        self.send(request).await
    }

    /// Fetch previously computed results for a file
    pub async fn get_analysis_results(&self, file_id: &str) -> Result<RawAnalysisResult, ApiError> {
        let url = self.results_url(file_id);
        tracing::info!("Fetching stored analysis for {}", file_id);
        self.send(self.http_client.get(&url)).await
    }

    /// Endpoint for stored results
    pub(crate) fn results_url(&self, file_id: &str) -> String {
        format!(
            "{}/audio/analysis/{}",
            self.base_url,
            urlencoding::encode(file_id)
        )
    }

    /// Endpoint for an analysis request
    pub(crate) fn analyze_url(&self, file_id: &str, analysis_type: AnalysisType) -> String {
        let route = match analysis_type {
            AnalysisType::General => "analyze",
            AnalysisType::MusicTheory => "analyze/music-theory",
            AnalysisType::ProductionFeedback => "analyze/production",
            AnalysisType::ArrangementAnalysis => "analyze/arrangement",
        };
        format!(
            "{}/audio/{}/{}",
            self.base_url,
            route,
            urlencoding::encode(file_id)
        )
    }

    /// Send the request and parse the JSON response
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> AnalysisClient {
        AnalysisClient::new(&ServiceConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = client("http://localhost:8000/api/v1/");
        assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
        assert!(client.token.is_none());
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let client = AnalysisClient::new(&ServiceConfig {
            token: Some(String::new()),
            ..Default::default()
        })
        .unwrap();
        assert!(client.token.is_none());
    }

    #[test]
    fn test_analyze_routes() {
        let client = client("http://svc/api/v1");
        assert_eq!(
            client.analyze_url("f1", AnalysisType::General),
            "http://svc/api/v1/audio/analyze/f1"
        );
        assert_eq!(
            client.analyze_url("f1", AnalysisType::MusicTheory),
            "http://svc/api/v1/audio/analyze/music-theory/f1"
        );
        assert_eq!(
            client.analyze_url("f1", AnalysisType::ProductionFeedback),
            "http://svc/api/v1/audio/analyze/production/f1"
        );
        assert_eq!(
            client.analyze_url("f1", AnalysisType::ArrangementAnalysis),
            "http://svc/api/v1/audio/analyze/arrangement/f1"
        );
    }

    #[test]
    fn test_results_route() {
        let client = client("http://svc/api/v1");
        assert_eq!(
            client.results_url("f1"),
            "http://svc/api/v1/audio/analysis/f1"
        );
        assert_eq!(
            client.results_url("a b"),
            "http://svc/api/v1/audio/analysis/a%20b"
        );
    }

    #[test]
    fn test_file_id_is_encoded() {
        let client = client("http://svc");
        assert_eq!(
            client.analyze_url("a b/c", AnalysisType::General),
            "http://svc/audio/analyze/a%20b%2Fc"
        );
    }
}
