//! swblend is a bit-exact software pixel blender for embedded frame buffers.
//!
//! It composites flat fills and source images into caller-owned destination buffers,
//! honoring a uniform opacity, an optional per-pixel coverage mask, or both:
//!
//! - Describe the call with a [`FillDescriptor`] or [`ImageBlendDescriptor`]
//! - Run it through a [`Blender`], which picks a [`BlendBackend`] from [`BlendSettings`]
//! - Or use the pure building blocks in [`format::catalog`], [`blend::mixer`] and
//!   [`blend::modulation`] directly
//!
//! Every backend produces exactly the bytes of the scalar reference.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Blend formulas, modulation and call descriptors.
pub mod blend;
/// Buffer and mask views.
pub mod buffer;
/// Pixel formats and conversions.
pub mod format;
/// Backends and the dispatching front-end.
pub mod render;

pub use crate::foundation::core::{OPA_COVER, OPA_TRANSP, Rgb888};
pub use crate::foundation::error::{BlendError, BlendResult};

pub use crate::blend::descriptor::{FillDescriptor, ImageBlendDescriptor};
pub use crate::blend::mixer::{BlendMode, Mixer};
pub use crate::blend::modulation::{ModulationMode, resolve};
pub use crate::buffer::view::{BufferView, BufferViewMut, MaskView};
pub use crate::format::pixel_format::PixelFormat;
pub use crate::render::backend::{
    BackendKind, BlendBackend, BlendSettings, RowThreading, create_backend,
};
pub use crate::render::batched::BatchedBackend;
pub use crate::render::blender::Blender;
pub use crate::render::scalar::ScalarBackend;
