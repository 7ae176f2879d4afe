use rand::{Rng, RngCore};

use crate::foundation::core::PixelRect;
use crate::foundation::error::{StoryreelError, StoryreelResult};

/// Extra duration requested when looping a too-short background.
pub const LOOP_SAFETY_MARGIN_SECS: f64 = 5.0;

/// Target portrait aspect ratio, width:height.
pub const PORTRAIT_ASPECT: (u32, u32) = (9, 16);

/// How to reconcile background duration against the required output length.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum FitDecision {
    /// Background covers the output: play `[start, end)` of the source.
    Trim {
        /// Source start offset, seconds.
        start: f64,
        /// Source end offset, seconds.
        end: f64,
    },
    /// Background is short: ask the looping collaborator for an asset of at
    /// least `target_duration`, then resolve again against it.
    Loop {
        /// Minimum duration the looped asset must provide, seconds.
        target_duration: f64,
    },
}

/// Decide how the background video covers the required output duration.
///
/// When the background is long enough the trim start is drawn uniformly at
/// random from `[0, available - required]` — nondeterministic by design,
/// which is why the random source is injected. A short background either
/// requests a looped asset (`required + 5 s` safety margin) or fails with
/// the distinct duration-mismatch error.
pub fn resolve_video_fit(
    available_secs: f64,
    required_secs: f64,
    loop_if_short: bool,
    rng: &mut dyn RngCore,
) -> StoryreelResult<FitDecision> {
    if !available_secs.is_finite() || available_secs < 0.0 {
        return Err(StoryreelError::input("background duration must be finite and >= 0"));
    }
    if !required_secs.is_finite() || required_secs <= 0.0 {
        return Err(StoryreelError::input("required duration must be finite and > 0"));
    }

    if available_secs >= required_secs {
        let max_start = available_secs - required_secs;
        let start = if max_start > 0.0 {
            rng.gen_range(0.0..=max_start)
        } else {
            0.0
        };
        return Ok(FitDecision::Trim {
            start,
            end: start + required_secs,
        });
    }

    if loop_if_short {
        return Ok(FitDecision::Loop {
            target_duration: required_secs + LOOP_SAFETY_MARGIN_SECS,
        });
    }

    Err(StoryreelError::DurationMismatch {
        available: available_secs,
        required: required_secs,
    })
}

/// Center-crop geometry fitting a source frame to the portrait target ratio.
///
/// Independent of timing: applied after every fit decision. Sources wider
/// than 9:16 lose width from both sides; narrower sources lose height.
pub fn portrait_crop(width: u32, height: u32) -> StoryreelResult<PixelRect> {
    if width == 0 || height == 0 {
        return Err(StoryreelError::input("source dimensions must be non-zero"));
    }
    let (aw, ah) = PORTRAIT_ASPECT;
    // Compare width*ah vs height*aw to stay in integers.
    let lhs = u64::from(width) * u64::from(ah);
    let rhs = u64::from(height) * u64::from(aw);

    if lhs > rhs {
        // Too wide: crop width.
        let target_w = ((u64::from(height) * u64::from(aw)) / u64::from(ah)) as u32;
        let x = (width - target_w) / 2;
        Ok(PixelRect {
            x: x as i32,
            y: 0,
            width: target_w,
            height,
        })
    } else {
        // Too tall (or exact): crop height.
        let target_h = ((u64::from(width) * u64::from(ah)) / u64::from(aw)) as u32;
        let y = (height - target_h) / 2;
        Ok(PixelRect {
            x: 0,
            y: y as i32,
            width,
            height: target_h,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/video/fit.rs"]
mod tests;
