use std::path::Path;

use tracing::{debug, warn};

use crate::audio::media::AudioCodec;
use crate::audio::segment::AudioSegment;

/// Normalize per-segment loudness against the loudest segment in the batch.
///
/// Measures each segment's peak amplitude, then boosts quieter segments with
/// `gain = max_peak / peak` and writes a gain-adjusted re-encode next to the
/// original. Segments that are silent (`peak == 0`), already at the max, or
/// missing/unreadable pass through unchanged with `gain == 1.0`. A decode
/// failure on one segment never aborts the batch.
pub fn normalize_volumes(segments: &mut [AudioSegment], codec: &dyn AudioCodec, work_dir: &Path) {
    // Pass 1: measure peaks. Unreadable segments stay at None.
    for seg in segments.iter_mut() {
        let Some(path) = seg.audio_path.as_deref() else {
            continue;
        };
        match codec.peak_amplitude(path) {
            Ok(peak) => {
                debug!(index = seg.dialogue.index, peak, "measured segment peak");
                seg.peak_amplitude = Some(peak);
            }
            Err(err) => {
                warn!(
                    index = seg.dialogue.index,
                    %err,
                    "peak analysis failed, segment passes through unnormalized"
                );
            }
        }
    }

    let max_peak = segments
        .iter()
        .filter_map(|s| s.peak_amplitude)
        .fold(0.0f32, f32::max);
    if max_peak <= 0.0 {
        // All silent or nothing measurable. Gains stay at 1.0; no division.
        return;
    }

    // Pass 2: re-encode the quieter segments.
    for seg in segments.iter_mut() {
        let (Some(peak), Some(path)) = (seg.peak_amplitude, seg.audio_path.clone()) else {
            continue;
        };
        if peak <= 0.0 || peak >= max_peak {
            seg.gain = 1.0;
            continue;
        }

        let gain = f64::from(max_peak) / f64::from(peak);
        let out_path = work_dir.join(format!("normalized_{}.mp3", seg.dialogue.index));
        match codec.write_gain_adjusted(&path, gain, &out_path) {
            Ok(()) => {
                debug!(
                    index = seg.dialogue.index,
                    gain = format!("{gain:.2}"),
                    "boosted segment to batch peak"
                );
                seg.gain = gain;
                seg.normalized_path = Some(out_path);
            }
            Err(err) => {
                warn!(
                    index = seg.dialogue.index,
                    %err,
                    "gain re-encode failed, keeping original audio"
                );
                seg.gain = 1.0;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/normalize.rs"]
mod tests;
