//! Render a saved analysis result.

use std::path::Path;

use super::render::render_view_model;
use crate::analysis::{
    AnalysisType, AnalysisViewModel, AnalysisViewModelBuilder, DurationSource, RawAnalysisResult,
};
use crate::config;
use crate::error::ResultExt;

/// Build and print the view model for a raw result file
pub fn cmd_view(
    path: &Path,
    analysis_type: AnalysisType,
    duration: Option<f64>,
    json: bool,
) -> anyhow::Result<()> {
    let contents =
        std::fs::read_to_string(path).with_context(format!("reading {}", path.display()))?;
    let config = config::load();
    let view = build_view(
        &contents,
        analysis_type,
        builder_for(&config.analysis, duration),
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_view_model(&view));
    }
    Ok(())
}

/// Builder from config, with an explicit track length taking precedence.
fn builder_for(config: &config::AnalysisConfig, duration: Option<f64>) -> AnalysisViewModelBuilder {
    let mut options = config.timeline_options();
    match duration {
        Some(seconds) => {
            options.source = DurationSource::Decoded;
            AnalysisViewModelBuilder::new(options).with_decoded_duration(seconds)
        }
        None => AnalysisViewModelBuilder::new(options),
    }
}

fn build_view(
    contents: &str,
    analysis_type: AnalysisType,
    builder: AnalysisViewModelBuilder,
) -> crate::error::Result<AnalysisViewModel> {
    let raw = RawAnalysisResult::from_json(contents)?;
    tracing::debug!("Building {} view model", analysis_type);
    Ok(builder.build(&raw, analysis_type)?)
}
