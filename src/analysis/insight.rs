//! Prose summary of an analysis.
//!
//! Clauses appear in a fixed order; optional ones are dropped whole so no
//! stray separators are left behind.

use super::domain::Section;

/// Inputs to the insight paragraph.
#[derive(Debug, Clone, Copy)]
pub struct InsightParts<'a> {
    pub key: Option<&'a str>,
    pub tempo: f64,
    pub time_signature: &'a str,
    pub sections: &'a [Section],
    /// Detected instruments only; the display placeholder is not included
    pub instruments: &'a [String],
    pub chord_progression: Option<&'a [String]>,
    pub harmonic_analysis: Option<&'a str>,
}

const SECTION_SEPARATOR: &str = ", ";
const INSTRUMENT_SEPARATOR: &str = ", ";
const CHORD_SEPARATOR: &str = " - ";

/// Compose the insight paragraph.
pub fn compose(parts: &InsightParts<'_>) -> String {
    let mut sentences = Vec::with_capacity(5);

    sentences.push(match parts.key {
        Some(key) => format!("This track is in {} at {} BPM.", key, parts.tempo),
        None => format!("This track runs at {} BPM.", parts.tempo),
    });

    let names: Vec<&str> = parts.sections.iter().map(|s| s.name.as_str()).collect();
    if names.is_empty() {
        sentences.push(format!("It is in {} time.", parts.time_signature));
    } else {
        sentences.push(format!(
            "It is in {} time with a structure of {}.",
            parts.time_signature,
            names.join(SECTION_SEPARATOR)
        ));
    }

    if !parts.instruments.is_empty() {
        sentences.push(format!(
            "The main instruments are {}.",
            parts.instruments.join(INSTRUMENT_SEPARATOR)
        ));
    }

    if let Some(chords) = parts.chord_progression.filter(|c| !c.is_empty()) {
        sentences.push(format!(
            "The chord progression is {}.",
            chords.join(CHORD_SEPARATOR)
        ));
    }

    if let Some(text) = parts.harmonic_analysis.map(str::trim).filter(|t| !t.is_empty()) {
        sentences.push(text.to_string());
    }

    sentences.join(" ")
}
