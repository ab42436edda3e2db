//! Pixel encodings and the conversions between them.

/// Unpack/pack rules.
pub mod catalog;
/// Format tags and attributes.
pub mod pixel_format;
