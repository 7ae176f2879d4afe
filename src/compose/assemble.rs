use std::path::PathBuf;

use crate::foundation::core::{Canvas, PixelRect, TimeRange};
use crate::overlay::resolve::{
    AVATAR_BOTTOM_OFFSET_PX, AVATAR_MARGIN_PX, AVATAR_SIZE_PX, IMAGE_TOP_ANCHOR_PX, OverlayKind,
    OverlayWindow, Placement,
};

/// Externally supplied caption window: same interval shape as the other
/// overlays, but the renderable unit is text.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaptionWindow {
    /// Visibility interval on the output axis.
    pub range: TimeRange,
    /// Caption text.
    pub text: String,
}

/// Caption styling forwarded to the renderer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaptionStyle {
    /// Text fill color name.
    pub color: String,
    /// Shadow/outline color name.
    pub shadow_color: String,
    /// Font size in pixels.
    pub font_size: u32,
    /// Maximum text width in pixels.
    pub max_width: u32,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            color: "white".to_string(),
            shadow_color: "black".to_string(),
            font_size: 45,
            max_width: 540,
        }
    }
}

/// Complete description of one render: fitted base video, audio track, and
/// every overlay/caption window clipped to the output duration.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RenderSpec {
    /// Fitted, portrait-cropped background video.
    pub base_video: PathBuf,
    /// Synchronized audio track.
    pub audio_track: PathBuf,
    /// Exact output duration, seconds (the audio track's total length).
    pub total_duration: f64,
    /// Output canvas dimensions.
    pub canvas: Canvas,
    /// Overlay windows in back-to-front stacking order (images, then avatars).
    pub overlays: Vec<OverlayWindow>,
    /// Caption windows; always rendered topmost.
    pub captions: Vec<CaptionWindow>,
    /// Caption styling.
    pub caption_style: CaptionStyle,
}

/// Merge base video, audio, overlays, and captions into a render spec.
///
/// Every window is clipped to `[0, total_duration]` — entries crossing the
/// end boundary are shortened, never dropped; windows that clip to nothing
/// disappear. Stacking order is fixed back-to-front: base video, dialogue
/// images, avatars, captions.
pub fn assemble_composition(
    base_video: PathBuf,
    audio_track: PathBuf,
    canvas: Canvas,
    overlays: Vec<OverlayWindow>,
    captions: Vec<CaptionWindow>,
    caption_style: CaptionStyle,
    total_duration: f64,
) -> RenderSpec {
    let mut images = Vec::new();
    let mut avatars = Vec::new();
    for mut window in overlays {
        window.range = window.range.clip_to(total_duration);
        if window.range.is_empty() {
            continue;
        }
        match window.kind {
            OverlayKind::DialogueImage => images.push(window),
            OverlayKind::Avatar => avatars.push(window),
        }
    }
    images.extend(avatars);

    let captions = captions
        .into_iter()
        .filter_map(|mut c| {
            c.range = c.range.clip_to(total_duration);
            (!c.range.is_empty()).then_some(c)
        })
        .collect();

    RenderSpec {
        base_video,
        audio_track,
        total_duration,
        canvas,
        overlays: images,
        captions,
        caption_style,
    }
}

/// Pixel rectangle for an overlay given its placement rule and the media's
/// natural dimensions. Aspect is preserved for top-third images; avatars are
/// fixed squares regardless of source shape.
pub fn placement_rect(
    placement: Placement,
    canvas: Canvas,
    media_width: u32,
    media_height: u32,
) -> PixelRect {
    match placement {
        Placement::TopThird => {
            let height = canvas.height / 3;
            let width = if media_height == 0 {
                canvas.width
            } else {
                ((u64::from(media_width) * u64::from(height)) / u64::from(media_height)) as u32
            };
            PixelRect {
                x: (i64::from(canvas.width) - i64::from(width)) as i32 / 2,
                y: IMAGE_TOP_ANCHOR_PX as i32,
                width,
                height,
            }
        }
        Placement::BottomLeft => PixelRect {
            x: AVATAR_MARGIN_PX as i32,
            y: avatar_y(canvas),
            width: AVATAR_SIZE_PX,
            height: AVATAR_SIZE_PX,
        },
        Placement::BottomCenter => PixelRect {
            x: (canvas.width.saturating_sub(AVATAR_SIZE_PX) / 2) as i32,
            y: avatar_y(canvas),
            width: AVATAR_SIZE_PX,
            height: AVATAR_SIZE_PX,
        },
        Placement::BottomRight => PixelRect {
            x: canvas
                .width
                .saturating_sub(AVATAR_SIZE_PX + AVATAR_MARGIN_PX) as i32,
            y: avatar_y(canvas),
            width: AVATAR_SIZE_PX,
            height: AVATAR_SIZE_PX,
        },
    }
}

fn avatar_y(canvas: Canvas) -> i32 {
    canvas
        .height
        .saturating_sub(AVATAR_SIZE_PX + AVATAR_BOTTOM_OFFSET_PX) as i32
}

#[cfg(test)]
#[path = "../../tests/unit/compose/assemble.rs"]
mod tests;
