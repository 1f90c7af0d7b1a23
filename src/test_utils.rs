//! Test utilities and fixtures for audio-insight tests.
//!
//! This module provides blob factories, an auditing locator provider and
//! raw analysis payloads shaped like the ones the analysis service returns
//! for each analysis type.
//!
//! # Example
//!
//! ```ignore
//! use audio_insight::test_utils::{mock_blob, CountingProvider};
//!
//! let provider = Arc::new(CountingProvider::default());
//! let mut player = PlaybackController::new(HeadlessMedia::new(), provider.clone());
//! player.attach(mock_blob("song.mp3"))?;
//! assert_eq!(provider.live(), 1);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::analysis::RawAnalysisResult;
use crate::player::{AudioBlob, Locator, LocatorProvider, ObjectUrlRegistry, PlayerError};

/// Creates a small non-empty blob with the given file name.
pub fn mock_blob(name: &str) -> AudioBlob {
    AudioBlob::new(name, vec![0x49u8, 0x44, 0x33, 0x04, 0x00])
}

/// Builds a mono 16-bit PCM WAV file in memory.
///
/// `frames` samples at `sample_rate` Hz, all silent.
pub fn wav_bytes(sample_rate: u32, frames: u32) -> Vec<u8> {
    let channels: u16 = 1;
    let bits: u16 = 16;
    let block_align = channels * bits / 8;
    let data_len = frames * block_align as u32;

    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * block_align as u32).to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&bits.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.resize(44 + data_len as usize, 0);
    out
}

/// Locator provider that records how many locators were ever live at once.
#[derive(Debug, Default)]
pub struct CountingProvider {
    inner: ObjectUrlRegistry,
    max_live: AtomicUsize,
    created: AtomicUsize,
    /// Refuse every `create` once this many locators have been minted
    fail_after: Option<usize>,
}

impl CountingProvider {
    /// Provider that mints `count` locators and refuses the rest.
    pub fn failing_after(count: usize) -> Self {
        Self {
            fail_after: Some(count),
            ..Self::default()
        }
    }

    pub fn live(&self) -> usize {
        self.inner.live_count()
    }

    pub fn max_live(&self) -> usize {
        self.max_live.load(Ordering::Relaxed)
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }
}

impl LocatorProvider for CountingProvider {
    fn create(&self, blob: &AudioBlob) -> Result<Locator, PlayerError> {
        if self.fail_after.is_some_and(|limit| self.created() >= limit) {
            return Err(PlayerError::ResourceAcquisition("corrupt".to_string()));
        }
        let locator = self.inner.create(blob)?;
        self.created.fetch_add(1, Ordering::Relaxed);
        self.max_live
            .fetch_max(self.inner.live_count(), Ordering::Relaxed);
        Ok(locator)
    }

    fn revoke(&self, locator: &Locator) {
        self.inner.revoke(locator);
    }
}

/// Raw `general` payload with every base field set.
pub fn mock_general_result() -> RawAnalysisResult {
    RawAnalysisResult {
        key: Some("C Major".to_string()),
        tempo: Some(120.0),
        time_signature: Some("4/4".to_string()),
        instruments: Some(vec![
            "Piano".to_string(),
            "Guitar".to_string(),
            "Drums".to_string(),
        ]),
        structure: Some(vec![
            "Intro".to_string(),
            "Verse".to_string(),
            "Chorus".to_string(),
        ]),
        downbeats: Some((0..30).map(|i| i as f64 * 2.0).collect()),
        genre: Some("Pop/Rock".to_string()),
        sound_quality: Some("Good overall balance".to_string()),
        suggestions: Some(vec!["Tighten the low end".to_string()]),
        ..Default::default()
    }
}

/// Raw `music_theory` payload.
pub fn mock_theory_result() -> RawAnalysisResult {
    RawAnalysisResult {
        scale: Some(
            ["C", "D", "E", "F", "G", "A", "B"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        ),
        chord_progression: Some(
            ["C", "Am", "F", "G"].iter().map(|s| s.to_string()).collect(),
        ),
        harmonic_analysis: Some("The progression follows a I-vi-IV-V pattern.".to_string()),
        ..mock_general_result()
    }
}
