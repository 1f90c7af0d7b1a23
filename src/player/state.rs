//! Playback state, media events and time formatting.

use super::resource::ResourceId;

/// Observable transport state owned by the controller.
///
/// `duration_secs == 0.0` means the media subsystem has not reported
/// metadata yet; seeking is a no-op until it does.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackState {
    /// Whether a play command is in effect
    pub is_playing: bool,
    /// Current position in seconds (>= 0)
    pub position_secs: f64,
    /// Total duration in seconds (0 = unknown)
    pub duration_secs: f64,
}

impl PlaybackState {
    /// Whether the media subsystem has reported a duration.
    pub fn has_duration(&self) -> bool {
        self.duration_secs > 0.0
    }

    /// Get position as a fraction (0.0 - 1.0).
    pub fn position_fraction(&self) -> f64 {
        if self.has_duration() {
            (self.position_secs / self.duration_secs).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Format position as M:SS.
    pub fn position_label(&self) -> String {
        format_time(self.position_secs)
    }

    /// Format duration as M:SS.
    pub fn duration_label(&self) -> String {
        format_time(self.duration_secs)
    }

    /// Clamp a seek target into the playable range.
    pub(crate) fn clamp_position(&self, seconds: f64) -> f64 {
        if !seconds.is_finite() {
            return 0.0;
        }
        seconds.clamp(0.0, self.duration_secs.max(0.0))
    }
}

/// Format seconds as `M:SS`.
///
/// Whole seconds only, no hour component: an hour-long position renders as
/// `60:00`. Negative and non-finite inputs render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Notification delivered by the media subsystem.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEventKind {
    /// Playback position advanced (seconds)
    PositionAdvanced(f64),
    /// Metadata loaded, carrying the duration (seconds)
    MetadataReady(f64),
    /// Playback reached the end of the media
    Ended,
    /// An earlier play command was refused asynchronously
    PlayRejected(String),
}

/// A media notification tagged with the resource it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    pub resource: ResourceId,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    pub fn new(resource: ResourceId, kind: MediaEventKind) -> Self {
        Self { resource, kind }
    }
}
