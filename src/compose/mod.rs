//! Composition assembly and rendering.
//!
//! Assembly merges the fitted background, audio track, and every
//! overlay/caption window into one [`assemble::RenderSpec`]; rendering turns
//! that spec into an MP4 through a single ffmpeg invocation.

/// Render-spec assembly and overlay placement math.
pub mod assemble;
/// ffmpeg filter-graph rendering of an assembled spec.
pub mod render;
