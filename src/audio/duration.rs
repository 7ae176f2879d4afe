use tracing::warn;

use crate::audio::media::MediaProbe;
use crate::audio::segment::AudioSegment;

/// Estimated speaking rate used when no audio is available to probe.
const ESTIMATE_CHARS_PER_SEC: f64 = 15.0;
/// Floor for estimated durations, seconds.
const ESTIMATE_MIN_SECS: f64 = 2.0;

/// Deterministic text-length duration estimate: `max(2.0, len/15.0)`.
pub fn estimate_duration_secs(text: &str) -> f64 {
    (text.len() as f64 / ESTIMATE_CHARS_PER_SEC).max(ESTIMATE_MIN_SECS)
}

/// Resolve every segment's playback duration in place.
///
/// Probes the audio handle when it resolves; otherwise falls back to the
/// text-length estimate. Missing or unreadable audio is non-fatal and logs a
/// degraded-mode warning so caption/overlay timing stays usable.
pub fn resolve_durations(segments: &mut [AudioSegment], probe: &dyn MediaProbe) {
    for seg in segments.iter_mut() {
        let probed = seg
            .playback_path()
            .filter(|p| p.exists())
            .and_then(|path| match probe.audio_duration_secs(path) {
                Ok(d) => Some(d),
                Err(err) => {
                    warn!(
                        index = seg.dialogue.index,
                        %err,
                        "audio duration probe failed, falling back to estimate"
                    );
                    None
                }
            });

        let duration = match probed {
            Some(d) => d,
            None => {
                let est = estimate_duration_secs(&seg.dialogue.text);
                warn!(
                    index = seg.dialogue.index,
                    duration = format!("{est:.2}"),
                    "using estimated duration for segment without readable audio"
                );
                est
            }
        };
        seg.duration_secs = Some(duration);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/duration.rs"]
mod tests;
