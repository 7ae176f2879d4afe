//! Storyreel turns multi-speaker dialogue scripts into short vertical videos.
//!
//! The core is the dialogue timeline and media composition engine: it places
//! per-speaker audio segments on a single gap-corrected time axis, resolves
//! image/avatar overlays into bounded visibility windows against that axis,
//! normalizes segment loudness, reconciles a background video's duration and
//! aspect ratio against the required output length, and merges everything
//! into one render specification.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: `Speaker: Text` script → ordered [`DialogueSegment`]s
//! 2. **Synthesize** (external) → per-segment audio
//! 3. **Normalize**: peak-match segment loudness
//! 4. **Timeline**: contiguous axis with 1 s gaps on speaker change
//! 5. **Overlays**: images/avatars/captions as visibility windows
//! 6. **Fit**: trim or loop the background, center-crop to 9:16
//! 7. **Assemble + render**: one [`RenderSpec`], encoded via system ffmpeg
//!
//! External collaborators (speech synthesis, captioning, background looping)
//! sit behind traits in [`pipeline`]; the engine itself never talks to the
//! network.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod audio;
pub mod compose;
pub mod job;
pub mod overlay;
pub mod pipeline;
pub mod script;
pub mod timeline;
pub mod video;

pub use crate::foundation::core::{Canvas, PixelRect, TimeRange};
pub use crate::foundation::error::{StoryreelError, StoryreelResult};

pub use crate::audio::duration::{estimate_duration_secs, resolve_durations};
pub use crate::audio::media::{AudioCodec, AudioToolkit, ConcatPart, FfmpegMedia, MediaProbe};
pub use crate::audio::normalize::normalize_volumes;
pub use crate::audio::segment::AudioSegment;
pub use crate::compose::assemble::{
    CaptionStyle, CaptionWindow, RenderSpec, assemble_composition,
};
pub use crate::compose::render::render_spec_to_mp4;
pub use crate::job::registry::{Job, JobId, JobRegistry, JobStatus};
pub use crate::overlay::resolve::{
    OverlayKind, OverlayWindow, Placement, resolve_avatar_overlays, resolve_image_overlays,
    resolve_overlays,
};
pub use crate::pipeline::collab::{
    Captioner, FfmpegRenderer, SpeechSynthesizer, SynthesizedAudio, VideoRenderer,
};
pub use crate::pipeline::generate::{GenerateRequest, Pipeline};
pub use crate::script::parse::{DialogueSegment, ParsedScript, parse_dialogue_script};
pub use crate::timeline::build::{
    SPEAKER_GAP_SECS, TimelineEntry, build_timeline, required_duration,
};
pub use crate::video::edit::{FfmpegEditor, VideoEditor, VideoSourceInfo};
pub use crate::video::fit::{FitDecision, portrait_crop, resolve_video_fit};
