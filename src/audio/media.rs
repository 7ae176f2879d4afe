use std::path::Path;
use std::process::Command;

use crate::foundation::error::{StoryreelError, StoryreelResult};

/// Sample rate used for silence gaps and peak analysis decodes.
pub const ANALYSIS_SAMPLE_RATE: u32 = 44_100;

/// Duration probe over audio files. Separated out so the duration resolver
/// can be exercised without a system ffprobe.
pub trait MediaProbe {
    /// Exact playback duration of `path` in seconds.
    fn audio_duration_secs(&self, path: &Path) -> StoryreelResult<f64>;
}

/// Decode/re-encode operations the volume normalizer needs.
pub trait AudioCodec {
    /// Max absolute sample value of the decoded waveform, in `[0, 1]` for
    /// well-formed sources.
    fn peak_amplitude(&self, path: &Path) -> StoryreelResult<f32>;

    /// Re-encode `path` with a constant gain multiplier applied.
    fn write_gain_adjusted(&self, path: &Path, gain: f64, out_path: &Path) -> StoryreelResult<()>;
}

/// One slot of a concatenated audio track.
///
/// Silence slots carry speaker-change gaps and stand-ins for segments whose
/// synthesis produced no audio, keeping the track aligned with the timeline.
#[derive(Clone, Debug)]
pub enum ConcatPart {
    /// Generated silence of the given duration, seconds.
    Silence(f64),
    /// An audio file to append.
    Audio(std::path::PathBuf),
}

/// Everything the pipeline needs from the audio toolchain in one bound:
/// probing, peak/gain work, and track concatenation.
pub trait AudioToolkit: MediaProbe + AudioCodec {
    /// Concatenate parts into one audio track in order.
    fn concat_with_gaps(&self, parts: &[ConcatPart], out_path: &Path) -> StoryreelResult<()>;
}

/// System `ffmpeg`/`ffprobe` backed implementation of the media traits.
#[derive(Clone, Copy, Debug, Default)]
pub struct FfmpegMedia;

impl MediaProbe for FfmpegMedia {
    fn audio_duration_secs(&self, path: &Path) -> StoryreelResult<f64> {
        #[derive(serde::Deserialize)]
        struct ProbeFormat {
            duration: Option<String>,
        }
        #[derive(serde::Deserialize)]
        struct ProbeOut {
            format: Option<ProbeFormat>,
        }

        let out = Command::new("ffprobe")
            .args(["-v", "error", "-print_format", "json", "-show_format"])
            .arg(path)
            .output()
            .map_err(|e| StoryreelError::collaborator(format!("failed to run ffprobe: {e}")))?;
        if !out.status.success() {
            return Err(StoryreelError::collaborator(format!(
                "ffprobe failed for '{}': {}",
                path.display(),
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }

        let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
            .map_err(|e| StoryreelError::collaborator(format!("ffprobe json parse failed: {e}")))?;
        parsed
            .format
            .and_then(|f| f.duration)
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|d| d.is_finite() && *d > 0.0)
            .ok_or_else(|| {
                StoryreelError::collaborator(format!(
                    "ffprobe reported no duration for '{}'",
                    path.display()
                ))
            })
    }
}

impl AudioCodec for FfmpegMedia {
    fn peak_amplitude(&self, path: &Path) -> StoryreelResult<f32> {
        let pcm = decode_audio_f32(path, ANALYSIS_SAMPLE_RATE)?;
        Ok(pcm.iter().fold(0.0f32, |acc, s| acc.max(s.abs())))
    }

    fn write_gain_adjusted(&self, path: &Path, gain: f64, out_path: &Path) -> StoryreelResult<()> {
        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoryreelError::collaborator(format!(
                    "failed to create audio output directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }
        let out = Command::new("ffmpeg")
            .args(["-v", "error", "-y", "-i"])
            .arg(path)
            .args(["-filter:a", &format!("volume={gain:.6}")])
            .arg(out_path)
            .output()
            .map_err(|e| StoryreelError::collaborator(format!("failed to run ffmpeg: {e}")))?;
        if !out.status.success() {
            return Err(StoryreelError::collaborator(format!(
                "ffmpeg gain re-encode failed for '{}': {}",
                path.display(),
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }
        Ok(())
    }
}

impl AudioToolkit for FfmpegMedia {
    fn concat_with_gaps(&self, parts: &[ConcatPart], out_path: &Path) -> StoryreelResult<()> {
        if parts.is_empty() {
            return Err(StoryreelError::input("cannot concatenate zero audio parts"));
        }
        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoryreelError::collaborator(format!(
                    "failed to create audio output directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.args(["-v", "error", "-y"]);

        // Inputs: silence slots come from lavfi anullsrc, real parts from files.
        let mut filter_inputs = Vec::<String>::new();
        for (input_idx, part) in parts.iter().enumerate() {
            match part {
                ConcatPart::Silence(secs) => {
                    cmd.args([
                        "-f",
                        "lavfi",
                        "-t",
                        &format!("{secs:.3}"),
                        "-i",
                        &format!("anullsrc=r={ANALYSIS_SAMPLE_RATE}:cl=stereo"),
                    ]);
                }
                ConcatPart::Audio(path) => {
                    cmd.arg("-i").arg(path);
                }
            }
            filter_inputs.push(format!("[{input_idx}:a]"));
        }

        let filter = format!(
            "{}concat=n={}:v=0:a=1[out]",
            filter_inputs.concat(),
            filter_inputs.len()
        );
        cmd.args(["-filter_complex", &filter, "-map", "[out]"]);
        cmd.arg(out_path);

        let out = cmd
            .output()
            .map_err(|e| StoryreelError::collaborator(format!("failed to run ffmpeg: {e}")))?;
        if !out.status.success() {
            return Err(StoryreelError::collaborator(format!(
                "ffmpeg audio concat failed: {}",
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }
        Ok(())
    }
}

/// Decode an audio file to interleaved f32 PCM via the system ffmpeg.
pub fn decode_audio_f32(path: &Path, sample_rate: u32) -> StoryreelResult<Vec<f32>> {
    let out = Command::new("ffmpeg")
        .args(["-v", "error", "-i"])
        .arg(path)
        .args([
            "-vn",
            "-f",
            "f32le",
            "-acodec",
            "pcm_f32le",
            "-ac",
            "2",
            "-ar",
            &sample_rate.to_string(),
            "pipe:1",
        ])
        .output()
        .map_err(|e| StoryreelError::collaborator(format!("failed to run ffmpeg for audio decode: {e}")))?;

    if !out.status.success() {
        return Err(StoryreelError::collaborator(format!(
            "ffmpeg audio decode failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    if !out.stdout.len().is_multiple_of(4) {
        return Err(StoryreelError::collaborator(
            "decoded audio byte length is not aligned to f32 samples",
        ));
    }
    let mut pcm = Vec::<f32>::with_capacity(out.stdout.len() / 4);
    for chunk in out.stdout.chunks_exact(4) {
        pcm.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    Ok(pcm)
}
