//! Load local audio through the playback controller.

use std::path::Path;
use std::sync::Arc;

use super::load_blob;
use crate::player::{
    AudioBlob, HeadlessMedia, ObjectUrlRegistry, PlaybackController, probe_duration,
};

/// What `probe` found out about a file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReport {
    pub name: String,
    pub size_label: String,
    pub locator: String,
    pub duration_secs: f64,
    pub duration_label: String,
    /// Decoder error, if the duration could not be read
    pub warning: Option<String>,
}

/// Attach a file to a headless controller and report what it sees
pub fn cmd_probe(path: &Path) -> anyhow::Result<()> {
    let blob = load_blob(path)?;
    let report = probe_blob(blob)?;

    println!("File:     {}", report.name);
    println!("Size:     {}", report.size_label);
    println!("Locator:  {}", report.locator);
    println!("Duration: {}", report.duration_label);
    if let Some(warning) = report.warning {
        eprintln!("Warning: {}", warning);
    }
    Ok(())
}

pub(crate) fn probe_blob(blob: AudioBlob) -> crate::error::Result<ProbeReport> {
    let registry = Arc::new(ObjectUrlRegistry::new());
    let mut player = PlaybackController::new(HeadlessMedia::new(), registry.clone());

    let resource = player.attach(blob)?;
    let name = resource.blob().name.clone();
    let size_label = resource.size_label();
    let locator = resource.locator().to_string();
    let probed = probe_duration(resource.blob());

    // The decoder plays the part of the element's metadata callback
    let warning = match probed {
        Ok(seconds) => {
            player.on_metadata_ready(seconds);
            None
        }
        Err(e) => {
            tracing::warn!("Could not read duration of {}: {}", name, e);
            Some(e.to_string())
        }
    };

    let report = ProbeReport {
        name,
        size_label,
        locator,
        duration_secs: player.state().duration_secs,
        duration_label: player.state().duration_label(),
        warning,
    };

    player.dispose();
    debug_assert_eq!(registry.live_count(), 0);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::wav_bytes;

    #[test]
    fn test_probe_wav() {
        let blob = AudioBlob::new("tone.wav", wav_bytes(8000, 8000 * 65)).with_mime_type("audio/wav");
        let report = probe_blob(blob).unwrap();

        assert_eq!(report.name, "tone.wav");
        assert_eq!(report.duration_label, "1:05");
        assert!(report.locator.starts_with("blob:"));
        assert!(report.warning.is_none());
    }

    #[test]
    fn test_probe_duration_reaches_state() {
        let blob = AudioBlob::new("half.wav", wav_bytes(8000, 8000 * 5 / 2));
        let report = probe_blob(blob).unwrap();

        assert!((report.duration_secs - 2.5).abs() < 1e-6, "got {}", report.duration_secs);
        assert_eq!(report.duration_label, "0:02");
    }

    #[test]
    fn test_probe_undecodable_still_reports() {
        let report = probe_blob(AudioBlob::new("mystery.bin", vec![0x42u8; 64])).unwrap();

        assert_eq!(report.duration_secs, 0.0);
        assert_eq!(report.duration_label, "0:00");
        assert!(report.warning.is_some());
    }

    #[test]
    fn test_probe_empty_file_fails() {
        let result = probe_blob(AudioBlob::new("empty.mp3", Vec::<u8>::new()));
        assert!(result.is_err());
    }
}
