use std::path::{Path, PathBuf};

use crate::compose::assemble::{CaptionStyle, CaptionWindow, RenderSpec};
use crate::foundation::error::StoryreelResult;

/// Synthesis output for one dialogue segment.
#[derive(Clone, Debug)]
pub struct SynthesizedAudio {
    /// Generated audio file.
    pub path: PathBuf,
    /// Reported playback duration, seconds.
    pub duration_secs: f64,
}

/// External text-to-speech collaborator.
///
/// A failure propagates as missing audio on the segment (the duration
/// resolver's estimate keeps the timeline usable); only a fully-failed batch
/// aborts the job.
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` with `voice` into `out_path`.
    fn synthesize(&self, text: &str, voice: &str, out_path: &Path)
    -> StoryreelResult<SynthesizedAudio>;
}

/// External speech-to-text captioning collaborator.
///
/// Returns ordered caption windows over the supplied audio track,
/// shape-compatible with the image/avatar overlay windows. A failure is a
/// hard job failure; retry policy, if any, lives behind this boundary.
pub trait Captioner: Send + Sync {
    /// Produce caption windows for an audio track.
    fn captions(&self, audio: &Path, style: &CaptionStyle)
    -> StoryreelResult<Vec<CaptionWindow>>;
}

/// Final render boundary, separated out so the pipeline can be exercised
/// without a system ffmpeg.
pub trait VideoRenderer: Send + Sync {
    /// Render a spec into `out_path`.
    fn render(&self, spec: &RenderSpec, out_path: &Path) -> StoryreelResult<PathBuf>;
}

/// [`VideoRenderer`] backed by the system ffmpeg.
#[derive(Clone, Copy, Debug, Default)]
pub struct FfmpegRenderer;

impl VideoRenderer for FfmpegRenderer {
    fn render(&self, spec: &RenderSpec, out_path: &Path) -> StoryreelResult<PathBuf> {
        crate::compose::render::render_spec_to_mp4(spec, out_path)
    }
}
