//! Background video fitting.
//!
//! Duration fit (trim at a random offset, or loop with a safety margin) and
//! aspect fit (9:16 center crop) are decided here; the cutting itself goes
//! through the [`edit::VideoEditor`] boundary.

/// Editing operations behind a trait, plus the system-ffmpeg implementation.
pub mod edit;
/// Duration- and aspect-fit decisions.
pub mod fit;
