//! Row drivers, backends and the [`Blender`] front-end.

/// Backend trait, settings and factory.
pub mod backend;
/// Lane-chunked backend.
pub mod batched;
/// Dispatching front-end.
pub mod blender;
pub(crate) mod rows;
/// Scalar reference backend.
pub mod scalar;

pub use blender::Blender;
