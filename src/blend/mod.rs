//! Per-pixel blending: resolver, mixers and the fill / image-blend kernels.

/// Fill and image-blend call descriptors.
pub mod descriptor;
pub(crate) mod encoding;
pub(crate) mod fill;
pub(crate) mod image;
/// Scalar pixel mixers.
pub mod mixer;
/// Opacity, mask and alpha folding.
pub mod modulation;
pub(crate) mod plan;
