//! Normalized analysis view model.
//!
//! These types are what the host renders. They do not change when the
//! service response changes; [`RawAnalysisResult`](super::RawAnalysisResult)
//! is converted into them by the builder.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of analysis requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    #[default]
    General,
    MusicTheory,
    ProductionFeedback,
    ArrangementAnalysis,
}

impl AnalysisType {
    pub const ALL: [AnalysisType; 4] = [
        AnalysisType::General,
        AnalysisType::MusicTheory,
        AnalysisType::ProductionFeedback,
        AnalysisType::ArrangementAnalysis,
    ];

    /// Wire name, e.g. `music_theory`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisType::General => "general",
            AnalysisType::MusicTheory => "music_theory",
            AnalysisType::ProductionFeedback => "production_feedback",
            AnalysisType::ArrangementAnalysis => "arrangement_analysis",
        }
    }

    /// Display label for headings.
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisType::General => "General",
            AnalysisType::MusicTheory => "Music Theory",
            AnalysisType::ProductionFeedback => "Production",
            AnalysisType::ArrangementAnalysis => "Arrangement",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisType {
    type Err = AnalysisError;

    /// Accepts wire names and their hyphenated forms (`music-theory`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        AnalysisType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| AnalysisError::UnknownAnalysisType(s.to_string()))
    }
}

/// A named, time-bounded part of the track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub name: String,
    /// Start offset in seconds
    pub start: f64,
    /// End offset in seconds
    pub end: f64,
}

impl Section {
    pub fn new(name: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Share of a timeline of length `total` taken by this section.
    pub fn width_fraction(&self, total: f64) -> f64 {
        if total > 0.0 {
            self.duration() / total
        } else {
            0.0
        }
    }
}

/// Music theory findings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TheoryReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chord_progression: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harmonic_analysis: Option<String>,
}

/// Mix and mastering feedback.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mix_balance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eq_recommendations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamics_suggestions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spatial_recommendations: Option<Vec<String>>,
}

/// Arrangement commentary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrangementReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrumentation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_flow: Option<String>,
}

/// Overall impression from a general analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound_quality: Option<String>,
}

/// Type-specific part of a view model; one variant per analysis type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "analysisType", rename_all = "snake_case")]
pub enum ThematicReport {
    General(GeneralReport),
    MusicTheory(TheoryReport),
    ProductionFeedback(ProductionReport),
    ArrangementAnalysis(ArrangementReport),
}

impl ThematicReport {
    pub fn analysis_type(&self) -> AnalysisType {
        match self {
            ThematicReport::General(_) => AnalysisType::General,
            ThematicReport::MusicTheory(_) => AnalysisType::MusicTheory,
            ThematicReport::ProductionFeedback(_) => AnalysisType::ProductionFeedback,
            ThematicReport::ArrangementAnalysis(_) => AnalysisType::ArrangementAnalysis,
        }
    }

    /// Whether the report carries anything beyond its type tag.
    pub fn is_empty(&self) -> bool {
        match self {
            ThematicReport::General(r) => r.genre.is_none() && r.sound_quality.is_none(),
            ThematicReport::MusicTheory(r) => {
                r.scale.is_none() && r.chord_progression.is_none() && r.harmonic_analysis.is_none()
            }
            ThematicReport::ProductionFeedback(r) => {
                r.mix_balance.is_none()
                    && r.eq_recommendations.is_none()
                    && r.dynamics_suggestions.is_none()
                    && r.spatial_recommendations.is_none()
            }
            ThematicReport::ArrangementAnalysis(r) => {
                r.instrumentation.is_none() && r.energy_flow.is_none()
            }
        }
    }
}

/// Renderable analysis of one track. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisViewModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Beats per minute
    pub tempo: f64,
    pub time_signature: String,
    /// Never empty; `["Unknown"]` when nothing was detected
    pub instruments: Vec<String>,
    /// Contiguous sections covering the whole track
    pub sections: Vec<Section>,
    #[serde(flatten)]
    pub report: ThematicReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    /// Prose summary of the fields above
    pub insight: String,
}

impl AnalysisViewModel {
    pub fn analysis_type(&self) -> AnalysisType {
        self.report.analysis_type()
    }

    /// End of the final section.
    pub fn total_duration(&self) -> f64 {
        self.sections.last().map(|s| s.end).unwrap_or(0.0)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }
}

/// Errors raised while turning a raw result into a view model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Malformed analysis result: missing or invalid `{field}`")]
    MalformedResult { field: &'static str },

    #[error("Unknown analysis type: {0}")]
    UnknownAnalysisType(String),

    #[error("Failed to parse analysis result: {0}")]
    Parse(String),
}
