//! Render a result the service already stored.

use tokio::runtime::Runtime;

use super::render::render_view_model;
use crate::analysis::{AnalysisType, AnalysisViewModel, AnalysisViewModelBuilder};
use crate::api::{AnalysisApi, AnalysisClient};
use crate::config::{self, AnalysisConfig};

/// Fetch the stored analysis for an uploaded file and print it
pub fn cmd_results(
    rt: &Runtime,
    file_id: &str,
    analysis_type: AnalysisType,
    server: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = config::load();
    if let Some(url) = server {
        config.service.base_url = url.to_string();
    }

    let client = AnalysisClient::new(&config.service)?;
    let view = rt.block_on(fetch_view(&client, file_id, analysis_type, &config.analysis))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_view_model(&view));
    }
    Ok(())
}

/// Fetch a stored result and build its view model.
pub(crate) async fn fetch_view<A: AnalysisApi + ?Sized>(
    api: &A,
    file_id: &str,
    analysis_type: AnalysisType,
    config: &AnalysisConfig,
) -> crate::error::Result<AnalysisViewModel> {
    let raw = api.get_analysis_results(file_id).await?;
    let builder = AnalysisViewModelBuilder::new(config.timeline_options());
    Ok(builder.build(&raw, analysis_type)?)
}
