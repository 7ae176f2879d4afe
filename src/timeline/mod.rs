//! The dialogue timeline: contiguous per-segment intervals on a single
//! output axis, with a fixed silence gap at every speaker change.

/// Timeline construction from resolved audio segments.
pub mod build;
