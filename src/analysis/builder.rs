//! Adapter layer: convert raw analysis results to view models.
//!
//! This is the ONLY place where [`RawAnalysisResult`] is converted to
//! [`AnalysisViewModel`]. Conversion is a pure function of the raw result,
//! the requested analysis type and the timeline options, so identical
//! inputs always produce equal view models.

use super::domain::{
    AnalysisError, AnalysisType, AnalysisViewModel, ArrangementReport, GeneralReport,
    ProductionReport, TheoryReport, ThematicReport,
};
use super::dto::RawAnalysisResult;
use super::insight::{self, InsightParts};
use super::timeline::{self, TimelineOptions};

/// Shown when no instruments were detected.
pub const UNKNOWN_INSTRUMENT: &str = "Unknown";

/// Builds view models with a fixed set of timeline options.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisViewModelBuilder {
    timeline: TimelineOptions,
}

impl AnalysisViewModelBuilder {
    pub fn new(timeline: TimelineOptions) -> Self {
        Self { timeline }
    }

    /// Supply the decoded length of the local audio.
    ///
    /// Only used when the timeline source is
    /// [`DurationSource::Decoded`](super::DurationSource::Decoded).
    pub fn with_decoded_duration(mut self, seconds: f64) -> Self {
        self.timeline.decoded_duration_secs = Some(seconds);
        self
    }

    pub fn timeline(&self) -> &TimelineOptions {
        &self.timeline
    }

    /// Convert `raw` into a view model for `analysis_type`.
    ///
    /// Fails with [`AnalysisError::MalformedResult`] when `tempo` or
    /// `time_signature` is missing; nothing is built in that case.
    pub fn build(
        &self,
        raw: &RawAnalysisResult,
        analysis_type: AnalysisType,
    ) -> Result<AnalysisViewModel, AnalysisError> {
        let tempo = raw
            .tempo
            .filter(|t| t.is_finite())
            .ok_or(AnalysisError::MalformedResult { field: "tempo" })?;
        let time_signature = non_blank(&raw.time_signature).ok_or(
            AnalysisError::MalformedResult {
                field: "time_signature",
            },
        )?;

        let detected = non_empty(&raw.instruments).unwrap_or_default();
        let instruments = if detected.is_empty() {
            tracing::debug!("No instruments reported, showing placeholder");
            vec![UNKNOWN_INSTRUMENT.to_string()]
        } else {
            detected.clone()
        };

        let sections = timeline::synthesize_sections(
            raw.structure.as_deref(),
            raw.downbeats.as_deref(),
            &self.timeline,
        );
        let report = thematic_report(raw, analysis_type);
        let key = non_blank(&raw.key);

        let (chord_progression, harmonic_analysis) = match &report {
            ThematicReport::MusicTheory(theory) => (
                theory.chord_progression.as_deref(),
                theory.harmonic_analysis.as_deref(),
            ),
            _ => (None, None),
        };
        let insight = insight::compose(&InsightParts {
            key: key.as_deref(),
            tempo,
            time_signature: &time_signature,
            sections: &sections,
            instruments: &detected,
            chord_progression,
            harmonic_analysis,
        });

        Ok(AnalysisViewModel {
            key,
            tempo,
            time_signature,
            instruments,
            sections,
            report,
            suggestions: non_empty(&raw.suggestions),
            insight,
        })
    }
}

/// Build with default timeline options.
pub fn build(
    raw: &RawAnalysisResult,
    analysis_type: AnalysisType,
) -> Result<AnalysisViewModel, AnalysisError> {
    AnalysisViewModelBuilder::default().build(raw, analysis_type)
}

/// Pick the fields `analysis_type` produces; everything else is ignored.
fn thematic_report(raw: &RawAnalysisResult, analysis_type: AnalysisType) -> ThematicReport {
    match analysis_type {
        AnalysisType::General => ThematicReport::General(GeneralReport {
            genre: non_blank(&raw.genre),
            sound_quality: non_blank(&raw.sound_quality),
        }),
        AnalysisType::MusicTheory => ThematicReport::MusicTheory(TheoryReport {
            scale: non_empty(&raw.scale),
            chord_progression: non_empty(&raw.chord_progression),
            harmonic_analysis: non_blank(&raw.harmonic_analysis),
        }),
        AnalysisType::ProductionFeedback => ThematicReport::ProductionFeedback(ProductionReport {
            mix_balance: non_blank(&raw.mix_balance),
            eq_recommendations: non_empty(&raw.eq_recommendations),
            dynamics_suggestions: non_empty(&raw.dynamics_suggestions),
            spatial_recommendations: non_empty(&raw.spatial_recommendations),
        }),
        AnalysisType::ArrangementAnalysis => {
            ThematicReport::ArrangementAnalysis(ArrangementReport {
                instrumentation: non_blank(&raw.instrumentation),
                energy_flow: non_blank(&raw.energy_flow),
            })
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn non_empty(list: &Option<Vec<String>>) -> Option<Vec<String>> {
    list.as_ref().filter(|l| !l.is_empty()).cloned()
}
