use std::path::{Path, PathBuf};

use crate::script::parse::DialogueSegment;

/// A dialogue segment plus its synthesized audio and loudness state.
///
/// Created by the synthesis step; only the normalizer mutates it afterwards
/// (gain + normalized handle). The original audio path is retained for
/// traceability even when a normalized re-encode exists.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct AudioSegment {
    /// The parsed dialogue line this audio belongs to.
    pub dialogue: DialogueSegment,
    /// Synthesized audio file, when synthesis produced one.
    pub audio_path: Option<PathBuf>,
    /// Playback duration in seconds, once resolved.
    pub duration_secs: Option<f64>,
    /// Max absolute sample value of the decoded waveform, once measured.
    pub peak_amplitude: Option<f32>,
    /// Gain multiplier derived by the normalizer. Applied at most once.
    pub gain: f64,
    /// Gain-adjusted re-encode, present only when `gain != 1.0`.
    pub normalized_path: Option<PathBuf>,
}

impl AudioSegment {
    /// Wrap a dialogue segment with its (possibly missing) synthesis output.
    pub fn new(dialogue: DialogueSegment, audio_path: Option<PathBuf>) -> Self {
        Self {
            dialogue,
            audio_path,
            duration_secs: None,
            peak_amplitude: None,
            gain: 1.0,
            normalized_path: None,
        }
    }

    /// Audio file to play back: the normalized re-encode when present,
    /// otherwise the original synthesis output.
    pub fn playback_path(&self) -> Option<&Path> {
        self.normalized_path
            .as_deref()
            .or(self.audio_path.as_deref())
    }
}
