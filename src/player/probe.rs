//! Track length from container headers, using symphonia.
//!
//! Only the container is probed; no samples are decoded. Used as the
//! authoritative duration when the host opts into the decoded-duration
//! timeline policy, and by the headless host to emulate metadata loading.

use std::io::Cursor;

use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::PlayerError;
use super::resource::AudioBlob;

/// Probe the duration of `blob` in seconds.
pub fn probe_duration(blob: &AudioBlob) -> Result<f64, PlayerError> {
    let cursor = Cursor::new(blob.shared_bytes());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = blob.extension() {
        hint.with_extension(&ext);
    }
    if let Some(mime) = &blob.mime_type {
        hint.mime_type(mime);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| PlayerError::UnsupportedFormat(e.to_string()))?;

    let track = probed
        .format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| PlayerError::UnsupportedFormat("No audio track found".to_string()))?;

    let params = &track.codec_params;
    let n_frames = params
        .n_frames
        .ok_or_else(|| PlayerError::Decode("Frame count unavailable".to_string()))?;

    let seconds = if let Some(tb) = params.time_base {
        let time = tb.calc_time(n_frames);
        time.seconds as f64 + time.frac
    } else if let Some(rate) = params.sample_rate {
        n_frames as f64 / rate as f64
    } else {
        return Err(PlayerError::Decode("Unknown sample rate".to_string()));
    };

    tracing::debug!("Probed {}: {:.3}s", blob.name, seconds);
    Ok(seconds)
}
