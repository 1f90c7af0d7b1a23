//! Section timeline synthesis.
//!
//! The service reports structure as an ordered list of labels without
//! timestamps. Sections are laid out as equal contiguous slices of an
//! estimated total duration.
//!
//! With [`DurationSource::Downbeats`] the estimate is `downbeats × 4`
//! (four beats per measure assumed), which is NOT the true audio length.
//! [`DurationSource::Decoded`] substitutes the decoded length of the local
//! audio when the host supplies it.

use serde::{Deserialize, Serialize};

use super::domain::Section;

/// Placeholder track length when nothing better is known.
pub const DEFAULT_TRACK_DURATION_SECS: f64 = 180.0;

/// Beats per measure assumed by the downbeat estimate.
pub const BEATS_PER_MEASURE: f64 = 4.0;

/// Name of the single section used when no structure is reported.
pub const FULL_TRACK: &str = "Full Track";

/// Where the timeline's total duration comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationSource {
    /// `downbeats.len() × 4`, else the fallback
    #[default]
    Downbeats,
    /// Decoded audio length when known, else as `Downbeats`
    Decoded,
}

/// Inputs to duration estimation other than the raw result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineOptions {
    pub fallback_duration_secs: f64,
    pub source: DurationSource,
    /// Length of the locally loaded audio, if probed
    pub decoded_duration_secs: Option<f64>,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            fallback_duration_secs: DEFAULT_TRACK_DURATION_SECS,
            source: DurationSource::Downbeats,
            decoded_duration_secs: None,
        }
    }
}

impl TimelineOptions {
    fn decoded(&self) -> Option<f64> {
        match self.source {
            DurationSource::Decoded => self
                .decoded_duration_secs
                .filter(|d| d.is_finite() && *d > 0.0),
            DurationSource::Downbeats => None,
        }
    }

    /// Total duration used to lay out a reported structure.
    pub fn total_duration(&self, downbeats: Option<&[f64]>) -> f64 {
        if let Some(decoded) = self.decoded() {
            return decoded;
        }
        match downbeats {
            Some(beats) if !beats.is_empty() => beats.len() as f64 * BEATS_PER_MEASURE,
            _ => self.fallback_duration_secs,
        }
    }

    /// Length of the placeholder section when no structure is reported.
    pub fn placeholder_duration(&self) -> f64 {
        self.decoded().unwrap_or(self.fallback_duration_secs)
    }
}

/// Lay out `structure` as contiguous equal sections.
///
/// Section `i` spans `[i·d/n, (i+1)·d/n]`; adjacent sections share the
/// same boundary value and the last one ends at exactly `d`.
pub fn synthesize_sections(
    structure: Option<&[String]>,
    downbeats: Option<&[f64]>,
    options: &TimelineOptions,
) -> Vec<Section> {
    let labels = match structure {
        Some(labels) if !labels.is_empty() => labels,
        _ => {
            let end = options.placeholder_duration();
            tracing::debug!("No structure reported, using {} placeholder", FULL_TRACK);
            return vec![Section::new(FULL_TRACK, 0.0, end)];
        }
    };

    let total = options.total_duration(downbeats);
    let n = labels.len();
    let segment = total / n as f64;
    let boundary = |i: usize| if i == n { total } else { i as f64 * segment };

    labels
        .iter()
        .enumerate()
        .map(|(i, name)| Section::new(name.clone(), boundary(i), boundary(i + 1)))
        .collect()
}
