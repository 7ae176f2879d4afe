//! Dialogue script parsing (`Speaker: Text` lines).

/// Script parser and parsed-script types.
pub mod parse;
