//! Generation job state.

/// Thread-safe job registry with explicit cleanup.
pub mod registry;
