//! The media element seam.
//!
//! [`MediaElement`] is the one native playback element a controller drives.
//! Browser hosts back it with an `<audio>` element; [`HeadlessMedia`] backs
//! it with plain bookkeeping for the CLI and tests.

use super::resource::Locator;

/// Transport commands accepted by a native media element.
pub trait MediaElement {
    /// Point the element at a new source, or detach it.
    fn set_source(&mut self, locator: Option<&Locator>);

    /// Start or resume playback.
    ///
    /// An `Err` is an immediate refusal (autoplay policy, decode failure).
    /// Refusals discovered later arrive as a `PlayRejected` media event.
    fn play(&mut self) -> Result<(), String>;

    fn pause(&mut self);

    /// Move the playback position (seconds).
    fn set_current_time(&mut self, seconds: f64);
}

/// Media element without audio output.
#[derive(Debug, Default, Clone)]
pub struct HeadlessMedia {
    source: Option<Locator>,
    playing: bool,
    current_time: f64,
    reject_play: Option<String>,
    /// Every source the element has been pointed at, in order
    pub source_history: Vec<Option<Locator>>,
}

impl HeadlessMedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every play command with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            reject_play: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn source(&self) -> Option<&Locator> {
        self.source.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }
}

impl MediaElement for HeadlessMedia {
    fn set_source(&mut self, locator: Option<&Locator>) {
        self.source = locator.cloned();
        self.source_history.push(self.source.clone());
        self.playing = false;
        self.current_time = 0.0;
    }

    fn play(&mut self) -> Result<(), String> {
        if let Some(reason) = &self.reject_play {
            return Err(reason.clone());
        }
        if self.source.is_none() {
            return Err("no source attached".to_string());
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds;
    }
}
