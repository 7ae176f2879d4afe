//! Overlay windows: dialogue images and speaker avatars resolved against the
//! timeline into bounded visibility intervals with placement rules.

/// Window resolution for image and avatar overlays.
pub mod resolve;
