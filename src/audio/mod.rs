//! Per-segment dialogue audio.
//!
//! Segments carry their synthesized audio (possibly missing), a resolved or
//! estimated duration, and the gain applied by volume normalization. The
//! ffmpeg-backed toolchain lives behind traits so everything here can be
//! exercised without a system ffmpeg.

/// Duration probing with a text-length estimate fallback.
pub mod duration;
/// Media toolchain traits and the system-ffmpeg implementation.
pub mod media;
/// Peak-matching volume normalization.
pub mod normalize;
/// The per-segment audio record.
pub mod segment;
