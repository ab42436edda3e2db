use std::path::Path;

use anyhow::Context as _;

use crate::blend::descriptor::{FillDescriptor, ImageBlendDescriptor};
use crate::foundation::error::{BlendError, BlendResult};

/// An implementation of the fill and image-blend operations.
///
/// Every backend produces the same bytes as [`crate::ScalarBackend`] for each call it
/// accepts. A backend may decline a combination with [`BlendError::Unsupported`]; it must do
/// so before touching the destination.
pub trait BlendBackend: Send + Sync {
    /// Short stable name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Fill `desc.dest` with `desc.color`.
    fn fill(&self, desc: &mut FillDescriptor<'_>) -> BlendResult<()>;

    /// Blend `desc.src` into `desc.dest`.
    fn blend_image(&self, desc: &mut ImageBlendDescriptor<'_>) -> BlendResult<()>;
}

/// Available backend kinds.
///
/// - `Scalar` is the per-pixel reference and supports every combination.
/// - `Batched` works in lanes of eight pixels and declines a few byte-width pairs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Scalar reference backend.
    Scalar,
    /// Lane-chunked backend.
    #[default]
    Batched,
}

/// How destination rows are distributed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RowThreading {
    /// All rows on the calling thread.
    #[default]
    Sequential,
    /// Rows split into bands on the rayon global pool.
    Parallel {
        /// Smallest band handed to one task. Must be at least 1.
        min_rows_per_band: usize,
    },
}

/// Blender configuration.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlendSettings {
    /// Backend used for every call.
    pub backend: BackendKind,
    /// Row distribution.
    pub threading: RowThreading,
    /// Retry calls the configured backend declines on the scalar reference.
    pub fallback_to_scalar: bool,
}

impl Default for BlendSettings {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            threading: RowThreading::default(),
            fallback_to_scalar: true,
        }
    }
}

impl BlendSettings {
    /// Parse settings from a JSON document. Missing fields take their defaults.
    pub fn from_json(text: &str) -> BlendResult<Self> {
        let settings: Self = serde_json::from_str(text)
            .map_err(|e| BlendError::config(format!("invalid settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file on disk.
    ///
    /// I/O failures surface as [`BlendError::Other`]; a readable but invalid document is a
    /// [`BlendError::Config`].
    pub fn from_path(path: impl AsRef<Path>) -> BlendResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        Self::from_json(&text)
    }

    /// Reject settings no backend can run with.
    pub fn validate(&self) -> BlendResult<()> {
        if let RowThreading::Parallel { min_rows_per_band: 0 } = self.threading {
            return Err(BlendError::config("min_rows_per_band must be at least 1"));
        }
        Ok(())
    }
}

/// Create a backend implementation.
pub fn create_backend(
    kind: BackendKind,
    settings: &BlendSettings,
) -> BlendResult<Box<dyn BlendBackend>> {
    settings.validate()?;
    match kind {
        BackendKind::Scalar => Ok(Box::new(crate::render::scalar::ScalarBackend::new(
            settings.threading,
        ))),
        BackendKind::Batched => Ok(Box::new(crate::render::batched::BatchedBackend::new(
            settings.threading,
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
