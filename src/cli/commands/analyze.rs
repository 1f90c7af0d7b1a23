//! Upload audio and render the service's analysis.

use std::path::Path;
use tokio::runtime::Runtime;

use super::load_blob;
use super::render::render_view_model;
use crate::analysis::{AnalysisType, AnalysisViewModel, AnalysisViewModelBuilder, DurationSource};
use crate::api::{AnalysisApi, AnalysisClient, upload_and_analyze};
use crate::config::{self, AnalysisConfig};
use crate::player::{AudioBlob, probe_duration};

/// Upload a file, request an analysis and print the result
pub fn cmd_analyze(
    rt: &Runtime,
    path: &Path,
    analysis_type: AnalysisType,
    server: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = config::load();
    if let Some(url) = server {
        config.service.base_url = url.to_string();
    }

    let blob = load_blob(path)?;
    let client = AnalysisClient::new(&config.service)?;
    println!(
        "Analyzing {} via {} ({})",
        blob.name,
        client.base_url(),
        analysis_type.label()
    );

    let view = rt.block_on(analyze(&client, &blob, analysis_type, &config.analysis))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!();
        print!("{}", render_view_model(&view));
    }
    Ok(())
}

/// Upload, analyze and build the view model for one blob.
pub(crate) async fn analyze<A: AnalysisApi + ?Sized>(
    api: &A,
    blob: &AudioBlob,
    analysis_type: AnalysisType,
    config: &AnalysisConfig,
) -> crate::error::Result<AnalysisViewModel> {
    let (upload, raw) = upload_and_analyze(api, blob, analysis_type).await?;
    tracing::info!("Received {} analysis for {}", analysis_type, upload.file_id);

    let mut builder = AnalysisViewModelBuilder::new(config.timeline_options());
    if config.duration_source == DurationSource::Decoded {
        match probe_duration(blob) {
            Ok(seconds) => builder = builder.with_decoded_duration(seconds),
            Err(e) => tracing::warn!("Falling back to downbeat duration: {}", e),
        }
    }

    Ok(builder.build(&raw, analysis_type)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::api::traits::mocks::MockAnalysisApi;
    use crate::error::Error;
    use crate::test_utils::{mock_blob, mock_general_result, wav_bytes};

    #[tokio::test]
    async fn test_analyze_builds_view_model() {
        let api = MockAnalysisApi::returning(mock_general_result());
        let view = analyze(
            &api,
            &mock_blob("song.mp3"),
            AnalysisType::General,
            &AnalysisConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(view.analysis_type(), AnalysisType::General);
        assert_eq!(view.total_duration(), 120.0);
    }

    #[tokio::test]
    async fn test_decoded_duration_source_probes_blob() {
        let api = MockAnalysisApi::returning(mock_general_result());
        let config = AnalysisConfig {
            duration_source: DurationSource::Decoded,
            ..Default::default()
        };
        let blob = AudioBlob::new("tone.wav", wav_bytes(8000, 8000 * 90));

        let view = analyze(&api, &blob, AnalysisType::General, &config)
            .await
            .unwrap();
        assert!((view.total_duration() - 90.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_malformed_result_is_reported() {
        let mut raw = mock_general_result();
        raw.tempo = None;
        let api = MockAnalysisApi::returning(raw);

        let err = analyze(
            &api,
            &mock_blob("song.mp3"),
            AnalysisType::General,
            &AnalysisConfig::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Analysis(_)));
    }

    #[tokio::test]
    async fn test_upload_error_is_reported() {
        let api = MockAnalysisApi::failing_upload(ApiError::Network("refused".to_string()));
        let err = analyze(
            &api,
            &mock_blob("song.mp3"),
            AnalysisType::General,
            &AnalysisConfig::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::Network(_))));
    }
}
