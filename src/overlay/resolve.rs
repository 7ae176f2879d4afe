use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use tracing::warn;

use crate::foundation::core::TimeRange;
use crate::timeline::build::TimelineEntry;

/// Maximum on-screen time for a dialogue image overlay.
pub const IMAGE_OVERLAY_CAP_SECS: f64 = 5.0;

/// Avatar edge length in pixels (square, no mask).
pub const AVATAR_SIZE_PX: u32 = 120;
/// Avatar margin from the left/right canvas edge, pixels.
pub const AVATAR_MARGIN_PX: u32 = 20;
/// Avatar offset from the bottom canvas edge, pixels.
pub const AVATAR_BOTTOM_OFFSET_PX: u32 = 100;
/// Dialogue image anchor from the top canvas edge, pixels.
pub const IMAGE_TOP_ANCHOR_PX: u32 = 70;

/// What a visibility window composites onto the base video.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OverlayKind {
    /// User-supplied illustration tied to one dialogue segment.
    DialogueImage,
    /// Speaker avatar shown while that speaker talks.
    Avatar,
}

/// Fixed placement rule for an overlay on the portrait canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Placement {
    /// Horizontally centered, anchored in the top third, scaled to one-third
    /// of the frame height with aspect preserved.
    TopThird,
    /// Fixed square at the bottom-left corner.
    BottomLeft,
    /// Fixed square centered at the bottom edge.
    BottomCenter,
    /// Fixed square at the bottom-right corner.
    BottomRight,
}

/// Bounded time window during which a piece of media is composited.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayWindow {
    /// Visibility interval on the output axis.
    pub range: TimeRange,
    /// Overlay track this window belongs to.
    pub kind: OverlayKind,
    /// Media file to composite.
    pub media: PathBuf,
    /// Placement rule.
    pub placement: Placement,
}

/// Resolve dialogue image assignments (segment index → image) into windows.
///
/// A window opens at its segment's start and closes at the earliest of: the
/// segment's end, the next assigned segment's start, or the 5 s cap.
/// Assignments past the end of the timeline are dropped with a warning, and
/// windows that resolve to non-positive duration are silently skipped.
pub fn resolve_image_overlays(
    timeline: &[TimelineEntry],
    assignments: &BTreeMap<usize, PathBuf>,
) -> Vec<OverlayWindow> {
    let mut windows = Vec::new();

    for (&index, media) in assignments {
        let Some(entry) = timeline.get(index) else {
            warn!(index, "dropping image assignment past the end of the timeline");
            continue;
        };

        let next_assigned_start = assignments
            .range(index + 1..)
            .filter_map(|(&next, _)| timeline.get(next))
            .map(|e| e.start)
            .next();

        let start = entry.start;
        let mut end = entry.end;
        if let Some(next_start) = next_assigned_start {
            end = end.min(next_start);
        }
        end = end.min(start + IMAGE_OVERLAY_CAP_SECS);

        if end <= start {
            warn!(index, "skipping image overlay with non-positive window");
            continue;
        }
        windows.push(OverlayWindow {
            range: TimeRange { start, end },
            kind: OverlayKind::DialogueImage,
            media: media.clone(),
            placement: Placement::TopThird,
        });
    }

    windows
}

/// Resolve speaker avatar assignments (speaker → avatar) into windows.
///
/// Every timeline entry whose speaker has an avatar yields exactly one
/// window spanning that entry; windows never extend across the silence gaps
/// between entries and are uncapped. Entries whose speaker is absent from
/// the ordered speaker list are dropped with a warning. Placement comes from
/// the position in the speaker list: a single known speaker sits
/// bottom-center, two speakers split bottom-left / bottom-right.
pub fn resolve_avatar_overlays(
    timeline: &[TimelineEntry],
    avatars: &HashMap<String, PathBuf>,
    speakers: &[String],
) -> Vec<OverlayWindow> {
    let mut windows = Vec::new();

    for entry in timeline {
        let Some(media) = avatars.get(&entry.speaker) else {
            continue;
        };
        let Some(position) = speakers.iter().position(|s| *s == entry.speaker) else {
            warn!(
                speaker = %entry.speaker,
                index = entry.index,
                "dropping avatar for speaker missing from the speaker list"
            );
            continue;
        };

        if entry.end <= entry.start {
            warn!(index = entry.index, "skipping avatar with non-positive window");
            continue;
        }

        let placement = if speakers.len() == 1 {
            Placement::BottomCenter
        } else if position == 0 {
            Placement::BottomLeft
        } else {
            Placement::BottomRight
        };
        windows.push(OverlayWindow {
            range: TimeRange {
                start: entry.start,
                end: entry.end,
            },
            kind: OverlayKind::Avatar,
            media: media.clone(),
            placement,
        });
    }

    windows
}

/// Resolve all overlay assignments against the timeline.
///
/// Output order is back-to-front stacking order: dialogue images first, then
/// avatars. Captions are supplied externally and stack above both.
pub fn resolve_overlays(
    timeline: &[TimelineEntry],
    image_assignments: &BTreeMap<usize, PathBuf>,
    avatar_assignments: &HashMap<String, PathBuf>,
    speakers: &[String],
) -> Vec<OverlayWindow> {
    let mut windows = resolve_image_overlays(timeline, image_assignments);
    windows.extend(resolve_avatar_overlays(timeline, avatar_assignments, speakers));
    windows
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/resolve.rs"]
mod tests;
