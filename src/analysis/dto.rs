//! Analysis service response shape.
//!
//! This type matches what the analysis endpoints return. Every analysis
//! type shares one response shape and populates a different subset of it,
//! so every field is optional here; requiredness is enforced when the
//! result is converted into an [`AnalysisViewModel`](super::AnalysisViewModel).
//!
//! Example `music_theory` response:
//! ```json
//! {
//!   "key": "C Major",
//!   "tempo": 120,
//!   "time_signature": "4/4",
//!   "scale": ["C", "D", "E", "F", "G", "A", "B"],
//!   "chord_progression": ["C", "Am", "F", "G"],
//!   "harmonic_analysis": "The progression follows a I-vi-IV-V pattern...",
//!   "suggestions": ["Try adding a secondary dominant..."]
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::domain::AnalysisError;

/// Raw analysis result as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawAnalysisResult {
    /// Uploaded file this result belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    pub key: Option<String>,
    /// Beats per minute (required by every analysis type)
    pub tempo: Option<f64>,
    /// e.g. "4/4" (required by every analysis type)
    pub time_signature: Option<String>,
    pub instruments: Option<Vec<String>>,
    /// Ordered section labels, e.g. ["Intro", "Verse", "Chorus"]
    pub structure: Option<Vec<String>>,
    /// Beat timestamps in seconds
    pub downbeats: Option<Vec<f64>>,

    // music_theory
    pub scale: Option<Vec<String>>,
    pub chord_progression: Option<Vec<String>>,
    pub harmonic_analysis: Option<String>,

    // production_feedback
    pub mix_balance: Option<String>,
    pub eq_recommendations: Option<Vec<String>>,
    pub dynamics_suggestions: Option<Vec<String>>,
    pub spatial_recommendations: Option<Vec<String>>,

    // arrangement_analysis
    pub instrumentation: Option<String>,
    pub energy_flow: Option<String>,

    // general
    pub genre: Option<String>,
    pub sound_quality: Option<String>,
    pub suggestions: Option<Vec<String>>,
}

impl RawAnalysisResult {
    /// Parse a result from JSON text.
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        serde_json::from_str(json).map_err(|e| AnalysisError::Parse(e.to_string()))
    }
}

// ============================================================================
// CONTRACT TESTS
// These verify the DTO accepts what the analysis service actually returns.
// If these fail, the service has changed and the DTO needs updating.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_general_response() {
        let json = r#"{
            "key": "C Major",
            "tempo": 120,
            "time_signature": "4/4",
            "genre": "Pop/Rock",
            "sound_quality": "Good overall balance with some issues in...",
            "suggestions": ["Consider adjusting the levels of...", "The rhythm section could benefit from..."]
        }"#;

        let raw = RawAnalysisResult::from_json(json).expect("Should parse general response");

        assert_eq!(raw.key.as_deref(), Some("C Major"));
        assert_eq!(raw.tempo, Some(120.0));
        assert_eq!(raw.time_signature.as_deref(), Some("4/4"));
        assert_eq!(raw.genre.as_deref(), Some("Pop/Rock"));
        assert_eq!(raw.suggestions.as_ref().map(Vec::len), Some(2));
        assert!(raw.scale.is_none());
        assert!(raw.structure.is_none());
    }

    #[test]
    fn test_parse_music_theory_response() {
        let json = r#"{
            "key": "C Major",
            "tempo": 96.5,
            "time_signature": "3/4",
            "scale": ["C", "D", "E", "F", "G", "A", "B"],
            "chord_progression": ["C", "Am", "F", "G"],
            "harmonic_analysis": "The progression follows a I-vi-IV-V pattern..."
        }"#;

        let raw = RawAnalysisResult::from_json(json).expect("Should parse theory response");

        assert_eq!(raw.tempo, Some(96.5));
        assert_eq!(raw.scale.as_ref().map(Vec::len), Some(7));
        assert_eq!(
            raw.chord_progression,
            Some(vec![
                "C".to_string(),
                "Am".to_string(),
                "F".to_string(),
                "G".to_string()
            ])
        );
        assert!(raw.harmonic_analysis.is_some());
    }

    #[test]
    fn test_parse_production_response() {
        let json = r#"{
            "tempo": 128,
            "time_signature": "4/4",
            "mix_balance": "The low-end is slightly overpowering...",
            "eq_recommendations": ["Cut around 200Hz to reduce muddiness", "Boost at 3kHz for clarity"],
            "dynamics_suggestions": ["Apply more compression to the bass"],
            "spatial_recommendations": ["Add a short room reverb"]
        }"#;

        let raw = RawAnalysisResult::from_json(json).expect("Should parse production response");

        assert!(raw.key.is_none());
        assert!(raw.mix_balance.is_some());
        assert_eq!(raw.eq_recommendations.as_ref().map(Vec::len), Some(2));
        assert_eq!(raw.dynamics_suggestions.as_ref().map(Vec::len), Some(1));
        assert_eq!(raw.spatial_recommendations.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_parse_arrangement_response() {
        let json = r#"{
            "tempo": 110,
            "time_signature": "4/4",
            "structure": ["Intro", "Verse", "Chorus", "Verse", "Chorus", "Bridge", "Chorus", "Outro"],
            "instrumentation": "The arrangement uses a standard rock band setup with...",
            "energy_flow": "The energy builds gradually through the verses and peaks at...",
            "suggestions": ["Consider adding a pre-chorus to build tension"]
        }"#;

        let raw = RawAnalysisResult::from_json(json).expect("Should parse arrangement response");

        assert_eq!(raw.structure.as_ref().map(Vec::len), Some(8));
        assert!(raw.instrumentation.is_some());
        assert!(raw.energy_flow.is_some());
    }

    #[test]
    fn test_parse_feature_extraction_response() {
        let json = r#"{
            "file_id": "3f2a",
            "key": "A minor",
            "tempo": 87.2,
            "time_signature": "4/4",
            "downbeats": [0.52, 3.27, 6.03, 8.78]
        }"#;

        let raw = RawAnalysisResult::from_json(json).expect("Should parse feature response");

        assert_eq!(raw.file_id.as_deref(), Some("3f2a"));
        assert_eq!(raw.downbeats.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{"tempo": 100, "time_signature": "6/8", "mood": "bright", "stems": ["vocals"]}"#;
        let raw = RawAnalysisResult::from_json(json).expect("Should ignore unknown fields");
        assert_eq!(raw.time_signature.as_deref(), Some("6/8"));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = RawAnalysisResult::from_json("{not json").unwrap_err();
        assert!(matches!(err, AnalysisError::Parse(_)));
    }
}
