//! Playback controller over a single native media element.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   Host UI (event loop thread)                   │
//! │   attach / toggle_play_pause / seek / dispose, reads state()    │
//! └────────────────────────────┬────────────────────────────────────┘
//!                              │ &mut PlaybackController
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      PlaybackController                         │
//! │  owns PlaybackState, the AudioResource and its locator handle   │
//! └───────────────┬─────────────────────────────▲───────────────────┘
//!                 │ MediaElement commands       │ crossbeam channel
//!                 ▼                             │ (MediaEvent)
//! ┌─────────────────────────────────────────────┴───────────────────┐
//! │                 Media subsystem (<audio>, headless)             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The controller is the only writer of [`PlaybackState`]. Media
//! notifications either go through the `on_*` methods directly or are
//! queued on the event channel and applied by
//! [`PlaybackController::process_events`]; both paths need `&mut self`.

mod media;
mod probe;
mod resource;
mod state;

pub use media::{HeadlessMedia, MediaElement};
pub use probe::probe_duration;
pub use resource::{
    AudioBlob, AudioResource, Locator, LocatorHandle, LocatorProvider, ObjectUrlRegistry,
    ResourceId,
};
pub use state::{MediaEvent, MediaEventKind, PlaybackState, format_time};

use crossbeam_channel::{Receiver, Sender, unbounded};
use std::sync::Arc;

/// Transport controller for one media element and its current resource.
pub struct PlaybackController<M: MediaElement> {
    media: M,
    provider: Arc<dyn LocatorProvider>,
    resource: Option<AudioResource>,
    state: PlaybackState,
    next_id: u64,
    event_tx: Sender<MediaEvent>,
    event_rx: Receiver<MediaEvent>,
}

impl<M: MediaElement> PlaybackController<M> {
    /// Create a controller with nothing attached.
    pub fn new(media: M, provider: Arc<dyn LocatorProvider>) -> Self {
        let (event_tx, event_rx) = unbounded();
        Self {
            media,
            provider,
            resource: None,
            state: PlaybackState::default(),
            next_id: 0,
            event_tx,
            event_rx,
        }
    }

    /// Attach a new blob, replacing (and revoking) the current resource.
    ///
    /// The new locator is minted first. If that fails, the current resource
    /// and state are left exactly as they were. On success the previous
    /// locator is revoked as the new resource is installed, so at most one
    /// is live between calls.
    pub fn attach(&mut self, blob: AudioBlob) -> Result<&AudioResource, PlayerError> {
        if blob.is_empty() {
            return Err(PlayerError::ResourceAcquisition(format!(
                "{} is empty",
                blob.name
            )));
        }

        let handle = LocatorHandle::acquire(Arc::clone(&self.provider), &blob).inspect_err(|e| {
            tracing::warn!("Failed to attach {}: {}", blob.name, e);
        })?;

        self.next_id += 1;
        let id = ResourceId(self.next_id);
        self.media.set_source(Some(handle.locator()));
        self.state = PlaybackState::default();
        tracing::info!(
            "Attached {} ({} bytes) as {} at {}",
            blob.name,
            blob.len(),
            id,
            handle.locator()
        );

        if let Some(mut previous) = self.resource.take() {
            previous.release();
            tracing::debug!("Released resource {} for replacement", previous.id());
        }
        Ok(&*self.resource.insert(AudioResource::new(id, blob, handle)))
    }

    /// Play if paused, pause if playing.
    ///
    /// A refused play command rolls `is_playing` back and is returned as
    /// [`PlayerError::Rejected`]. Does nothing when no resource is attached.
    pub fn toggle_play_pause(&mut self) -> Result<(), PlayerError> {
        if self.resource.is_none() {
            tracing::debug!("Toggle ignored: nothing attached");
            return Ok(());
        }

        if self.state.is_playing {
            self.media.pause();
            self.state.is_playing = false;
            return Ok(());
        }

        self.state.is_playing = true;
        if let Err(reason) = self.media.play() {
            self.state.is_playing = false;
            tracing::warn!("Play rejected: {}", reason);
            return Err(PlayerError::Rejected(reason));
        }
        Ok(())
    }

    /// Seek to `target_secs`, clamped to `[0, duration]`.
    ///
    /// The reported position changes immediately; the media element follows.
    /// Returns the applied position.
    pub fn seek(&mut self, target_secs: f64) -> f64 {
        let position = self.state.clamp_position(target_secs);
        self.state.position_secs = position;
        if self.resource.is_some() {
            self.media.set_current_time(position);
        }
        position
    }

    /// Authoritative position report from the media subsystem.
    pub fn on_position_advance(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        let mut position = seconds.max(0.0);
        if self.state.has_duration() {
            position = position.min(self.state.duration_secs);
        }
        self.state.position_secs = position;
    }

    /// Metadata loaded; a non-finite or non-positive duration means unknown.
    pub fn on_metadata_ready(&mut self, duration_secs: f64) {
        self.state.duration_secs = if duration_secs.is_finite() && duration_secs > 0.0 {
            duration_secs
        } else {
            0.0
        };
        if self.state.has_duration() {
            self.state.position_secs = self.state.position_secs.min(self.state.duration_secs);
        }
    }

    /// End of media: stop playing, keep the last reported position.
    pub fn on_playback_ended(&mut self) {
        self.state.is_playing = false;
    }

    /// Asynchronous play refusal: roll back and surface the failure.
    pub fn on_play_rejected(&mut self, reason: impl Into<String>) -> PlayerError {
        let reason = reason.into();
        self.state.is_playing = false;
        tracing::warn!("Play rejected asynchronously: {}", reason);
        PlayerError::Rejected(reason)
    }

    /// Sender the media subsystem uses to queue notifications.
    pub fn event_sender(&self) -> Sender<MediaEvent> {
        self.event_tx.clone()
    }

    /// Apply one media event. Events for a resource other than the one
    /// currently attached are dropped.
    pub fn handle_event(&mut self, event: MediaEvent) -> Result<(), PlayerError> {
        let current = self.resource.as_ref().map(AudioResource::id);
        if current != Some(event.resource) {
            tracing::debug!("Dropping stale media event for {}", event.resource);
            return Ok(());
        }

        match event.kind {
            MediaEventKind::PositionAdvanced(secs) => self.on_position_advance(secs),
            MediaEventKind::MetadataReady(secs) => self.on_metadata_ready(secs),
            MediaEventKind::Ended => self.on_playback_ended(),
            MediaEventKind::PlayRejected(reason) => return Err(self.on_play_rejected(reason)),
        }
        Ok(())
    }

    /// Drain and apply every queued media event.
    ///
    /// All queued events are applied; the first rejection (if any) is
    /// returned after draining. On success returns the number processed.
    pub fn process_events(&mut self) -> Result<usize, PlayerError> {
        let mut processed = 0;
        let mut first_error = None;
        while let Ok(event) = self.event_rx.try_recv() {
            processed += 1;
            if let Err(e) = self.handle_event(event) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(processed),
        }
    }

    /// Release the current resource. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        let Some(mut resource) = self.resource.take() else {
            return;
        };
        resource.release();
        self.media.set_source(None);
        self.state = PlaybackState::default();
        tracing::info!("Disposed resource {}", resource.id());
    }

    /// Get current playback state snapshot.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// The attached resource, if any.
    pub fn resource(&self) -> Option<&AudioResource> {
        self.resource.as_ref()
    }

    /// The media element being driven.
    pub fn media(&self) -> &M {
        &self.media
    }
}

/// Player errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlayerError {
    #[error("Playback rejected: {0}")]
    Rejected(String),

    #[error("Could not create playable resource: {0}")]
    ResourceAcquisition(String),

    #[error("Failed to decode audio: {0}")]
    Decode(String),

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use crate::test_utils::{CountingProvider, mock_blob};
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Attach,
        AttachEmpty,
        Dispose,
        Toggle,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => Just(Op::Attach),
            1 => Just(Op::AttachEmpty),
            2 => Just(Op::Dispose),
            2 => Just(Op::Toggle),
        ]
    }

    proptest! {
        /// Seeking always lands on clamp(x, 0, duration)
        #[test]
        fn seek_matches_clamp(duration in 0.0f64..10_000.0, target in -1_000.0f64..20_000.0) {
            let registry = Arc::new(ObjectUrlRegistry::new());
            let mut player = PlaybackController::new(HeadlessMedia::new(), registry);
            player.attach(mock_blob("a.mp3")).unwrap();
            player.on_metadata_ready(duration);

            player.seek(target);
            let expected = target.clamp(0.0, player.state().duration_secs);
            prop_assert_eq!(player.state().position_secs, expected);
        }

        /// No sequence of operations ever has two live locators
        #[test]
        fn at_most_one_live_locator(ops in prop::collection::vec(op(), 1..40)) {
            let provider = Arc::new(CountingProvider::default());
            let mut player = PlaybackController::new(HeadlessMedia::new(), provider.clone());

            for op in ops {
                match op {
                    Op::Attach => { player.attach(mock_blob("x.mp3")).unwrap(); }
                    Op::AttachEmpty => {
                        let before = player.state();
                        let _ = player.attach(AudioBlob::new("e.mp3", Vec::<u8>::new()));
                        prop_assert_eq!(player.state(), before);
                    }
                    Op::Dispose => player.dispose(),
                    Op::Toggle => { player.toggle_play_pause().unwrap(); }
                }
                prop_assert!(provider.live() <= 1);
                prop_assert_eq!(provider.live() == 1, player.resource().is_some());
            }

            player.dispose();
            prop_assert_eq!(provider.live(), 0);
            prop_assert!(provider.max_live() <= 2);
        }
    }
}
