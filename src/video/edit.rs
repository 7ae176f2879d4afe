use std::path::{Path, PathBuf};
use std::process::Command;

use crate::foundation::core::PixelRect;
use crate::foundation::error::{StoryreelError, StoryreelResult};

/// Probed facts about a background video source.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct VideoSourceInfo {
    /// Source file path.
    pub source_path: PathBuf,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Container duration in seconds.
    pub duration_secs: f64,
}

/// Background video collaborator: probe, loop, cut, crop.
///
/// The pipeline treats these as opaque operations; the default
/// implementation shells out to the system ffmpeg/ffprobe.
pub trait VideoEditor {
    /// Probe dimensions and duration of a source.
    fn probe(&self, path: &Path) -> StoryreelResult<VideoSourceInfo>;

    /// Produce an asset with duration >= `target_secs` by looping `path`.
    fn loop_to_duration(&self, path: &Path, target_secs: f64, out_path: &Path)
    -> StoryreelResult<VideoSourceInfo>;

    /// Cut `[start, end)` out of the source (stream copy where possible).
    fn cut(&self, path: &Path, start_secs: f64, end_secs: f64, out_path: &Path)
    -> StoryreelResult<PathBuf>;

    /// Crop the source to `rect` (re-encode).
    fn crop(&self, path: &Path, rect: PixelRect, out_path: &Path) -> StoryreelResult<PathBuf>;
}

/// System-ffmpeg implementation of [`VideoEditor`].
#[derive(Clone, Copy, Debug, Default)]
pub struct FfmpegEditor;

impl VideoEditor for FfmpegEditor {
    fn probe(&self, path: &Path) -> StoryreelResult<VideoSourceInfo> {
        #[derive(serde::Deserialize)]
        struct ProbeStream {
            codec_type: Option<String>,
            width: Option<u32>,
            height: Option<u32>,
        }
        #[derive(serde::Deserialize)]
        struct ProbeFormat {
            duration: Option<String>,
        }
        #[derive(serde::Deserialize)]
        struct ProbeOut {
            streams: Vec<ProbeStream>,
            format: Option<ProbeFormat>,
        }

        let out = Command::new("ffprobe")
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_streams",
                "-show_format",
            ])
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
        let video_stream = parsed
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
            .ok_or_else(|| StoryreelError::collaborator("no video stream found"))?;
        let width = video_stream
            .width
            .ok_or_else(|| StoryreelError::collaborator("missing video width from ffprobe"))?;
        let height = video_stream
            .height
            .ok_or_else(|| StoryreelError::collaborator("missing video height from ffprobe"))?;
        let duration_secs = parsed
            .format
            .as_ref()
            .and_then(|f| f.duration.as_ref())
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(0.0);

        Ok(VideoSourceInfo {
            source_path: path.to_path_buf(),
            width,
            height,
            duration_secs,
        })
    }

    fn loop_to_duration(
        &self,
        path: &Path,
        target_secs: f64,
        out_path: &Path,
    ) -> StoryreelResult<VideoSourceInfo> {
        ensure_parent_dir(out_path)?;
        let out = Command::new("ffmpeg")
            .args(["-v", "error", "-y", "-stream_loop", "-1", "-i"])
            .arg(path)
            .args(["-t", &format!("{target_secs:.3}"), "-c", "copy"])
            .arg(out_path)
            .output()
            .map_err(|e| StoryreelError::collaborator(format!("failed to run ffmpeg: {e}")))?;
        if !out.status.success() {
            return Err(StoryreelError::collaborator(format!(
                "ffmpeg loop failed for '{}': {}",
                path.display(),
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }
        self.probe(out_path)
    }

    fn cut(
        &self,
        path: &Path,
        start_secs: f64,
        end_secs: f64,
        out_path: &Path,
    ) -> StoryreelResult<PathBuf> {
        ensure_parent_dir(out_path)?;
        let out = Command::new("ffmpeg")
            .args(["-v", "error", "-y", "-ss", &format!("{start_secs:.3}")])
            .args(["-to", &format!("{end_secs:.3}"), "-i"])
            .arg(path)
            .args(["-c", "copy"])
            .arg(out_path)
            .output()
            .map_err(|e| StoryreelError::collaborator(format!("failed to run ffmpeg: {e}")))?;
        if !out.status.success() {
            return Err(StoryreelError::collaborator(format!(
                "ffmpeg cut failed for '{}': {}",
                path.display(),
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }
        Ok(out_path.to_path_buf())
    }

    fn crop(&self, path: &Path, rect: PixelRect, out_path: &Path) -> StoryreelResult<PathBuf> {
        ensure_parent_dir(out_path)?;
        let filter = format!(
            "crop={}:{}:{}:{}",
            rect.width, rect.height, rect.x, rect.y
        );
        let out = Command::new("ffmpeg")
            .args(["-v", "error", "-y", "-i"])
            .arg(path)
            .args(["-filter:v", &filter, "-c:a", "copy"])
            .arg(out_path)
            .output()
            .map_err(|e| StoryreelError::collaborator(format!("failed to run ffmpeg: {e}")))?;
        if !out.status.success() {
            return Err(StoryreelError::collaborator(format!(
                "ffmpeg crop failed for '{}': {}",
                path.display(),
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }
        Ok(out_path.to_path_buf())
    }
}

fn ensure_parent_dir(path: &Path) -> StoryreelResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            StoryreelError::collaborator(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}
