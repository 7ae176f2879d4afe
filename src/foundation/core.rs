use crate::foundation::error::{StoryreelError, StoryreelResult};

/// Half-open time interval `[start, end)` in seconds on the output timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeRange {
    /// Inclusive interval start, seconds.
    pub start: f64,
    /// Exclusive interval end, seconds.
    pub end: f64,
}

impl TimeRange {
    /// Create a validated range with finite bounds and `start <= end`.
    pub fn new(start: f64, end: f64) -> StoryreelResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(StoryreelError::input("TimeRange bounds must be finite"));
        }
        if start > end {
            return Err(StoryreelError::input("TimeRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Interval length in seconds.
    pub fn duration(self) -> f64 {
        self.end - self.start
    }

    /// Return `true` when the interval has no extent.
    pub fn is_empty(self) -> bool {
        self.duration() <= 0.0
    }

    /// Intersect with another range; `None` when the overlap is empty.
    pub fn intersect(self, other: TimeRange) -> Option<TimeRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start >= end {
            return None;
        }
        Some(TimeRange { start, end })
    }

    /// Clamp both bounds into `[0, limit]`.
    ///
    /// Entries extending past the limit are clipped, not dropped; callers
    /// decide what to do with the possibly-empty result.
    pub fn clip_to(self, limit: f64) -> TimeRange {
        TimeRange {
            start: self.start.clamp(0.0, limit),
            end: self.end.clamp(0.0, limit),
        }
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Axis-aligned pixel rectangle on the output canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
