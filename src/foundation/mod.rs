//! Shared primitives: time intervals, pixel geometry, and the crate error type.

pub mod core;
pub mod error;
