use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, warn};

use crate::compose::assemble::{RenderSpec, placement_rect};
use crate::foundation::error::{StoryreelError, StoryreelResult};

/// Fixed output frame rate.
pub const OUTPUT_FPS: u32 = 30;

/// Render a [`RenderSpec`] to an MP4 via the system ffmpeg.
///
/// One invocation: the base video and audio track as inputs, every overlay
/// image as a further input scaled and composited through `overlay=` with
/// `enable='between(t,..)'` windows, captions as `drawtext` filters on top,
/// and the whole output trimmed to the audio duration. Codec choice is fixed
/// (libx264/aac at 30 fps).
pub fn render_spec_to_mp4(spec: &RenderSpec, out_path: &Path) -> StoryreelResult<PathBuf> {
    if !is_ffmpeg_on_path() {
        return Err(StoryreelError::render(
            "ffmpeg is required for MP4 rendering, but was not found on PATH",
        ));
    }
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            StoryreelError::render(format!(
                "failed to create render output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-v", "error", "-y", "-i"]);
    cmd.arg(&spec.base_video);
    cmd.arg("-i").arg(&spec.audio_track);

    // Overlay inputs keep spec order, which is already back-to-front.
    let mut chains = Vec::<String>::new();
    let mut current = "[0:v]".to_string();
    let mut input_idx = 2usize;
    for (n, window) in spec.overlays.iter().enumerate() {
        let (media_w, media_h) = match image::image_dimensions(&window.media) {
            Ok(dims) => dims,
            Err(err) => {
                warn!(
                    media = %window.media.display(),
                    %err,
                    "skipping overlay with unreadable image"
                );
                continue;
            }
        };
        cmd.arg("-i").arg(&window.media);

        let rect = placement_rect(window.placement, spec.canvas, media_w, media_h);
        chains.push(format!(
            "[{input_idx}:v]scale={}:{}[ov{n}]",
            rect.width, rect.height
        ));
        chains.push(format!(
            "{current}[ov{n}]overlay={}:{}:enable='between(t,{:.3},{:.3})'[v{n}]",
            rect.x, rect.y, window.range.start, window.range.end
        ));
        current = format!("[v{n}]");
        input_idx += 1;
    }

    // Captions stack above every overlay.
    if !spec.captions.is_empty() {
        let style = &spec.caption_style;
        let mut draws = Vec::<String>::new();
        for caption in &spec.captions {
            draws.push(format!(
                "drawtext=text='{}':fontcolor={}:bordercolor={}:borderw=2:fontsize={}:\
                 x=(w-text_w)/2:y=h-{}:enable='between(t,{:.3},{:.3})'",
                escape_drawtext(&caption.text),
                style.color,
                style.shadow_color,
                style.font_size,
                spec.canvas.height / 4,
                caption.range.start,
                caption.range.end
            ));
        }
        chains.push(format!("{current}{}[vcap]", draws.join(",")));
        current = "[vcap]".to_string();
    }

    if chains.is_empty() {
        cmd.args(["-map", "0:v"]);
    } else {
        cmd.args(["-filter_complex", &chains.join(";")]);
        cmd.args(["-map", &current]);
    }
    cmd.args(["-map", "1:a"]);
    cmd.args([
        "-t",
        &format!("{:.3}", spec.total_duration),
        "-r",
        &OUTPUT_FPS.to_string(),
        "-c:v",
        "libx264",
        "-preset",
        "medium",
        "-c:a",
        "aac",
    ]);
    cmd.arg(out_path);

    info!(
        overlays = spec.overlays.len(),
        captions = spec.captions.len(),
        duration = format!("{:.2}", spec.total_duration),
        "rendering final video"
    );

    let out = cmd
        .output()
        .map_err(|e| StoryreelError::render(format!("failed to run ffmpeg: {e}")))?;
    if !out.status.success() {
        return Err(StoryreelError::render(format!(
            "ffmpeg render failed: {}",
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    Ok(out_path.to_path_buf())
}

/// Escape text for use inside a single-quoted drawtext argument.
fn escape_drawtext(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\'' => out.push_str("\\'"),
            ':' => out.push_str("\\:"),
            '\\' => out.push_str("\\\\"),
            '%' => out.push_str("\\%"),
            _ => out.push(ch),
        }
    }
    out
}

fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/render.rs"]
mod tests;
