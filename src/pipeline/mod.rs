//! Job orchestration.
//!
//! [`generate::Pipeline`] drives one request through parse → synthesis →
//! normalization → timeline → overlays → background fit → render, recording
//! progress in the job registry. External services sit behind the trait
//! boundaries in [`collab`].

/// Collaborator trait boundaries (synthesis, captioning, rendering).
pub mod collab;
/// The end-to-end generation pipeline.
pub mod generate;
