use crate::blend::descriptor::{FillDescriptor, ImageBlendDescriptor};
use crate::foundation::error::{BlendError, BlendResult};
use crate::render::backend::{BlendBackend, BlendSettings, create_backend};
use crate::render::batched::BatchedBackend;
use crate::render::scalar::ScalarBackend;

/// Front-end that routes calls to the configured backend.
///
/// When the configured backend declines a combination with [`BlendError::Unsupported`] and
/// `fallback_to_scalar` is set, the call is retried on the scalar reference. Nothing else is
/// retried. The blender holds configuration only; every call is independent.
pub struct Blender {
    settings: BlendSettings,
    backend: Box<dyn BlendBackend>,
    reference: ScalarBackend,
}

impl std::fmt::Debug for Blender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blender")
            .field("settings", &self.settings)
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl Default for Blender {
    fn default() -> Self {
        let settings = BlendSettings::default();
        Self {
            backend: Box::new(BatchedBackend::new(settings.threading)),
            reference: ScalarBackend::new(settings.threading),
            settings,
        }
    }
}

impl Blender {
    /// Build a blender for `settings`.
    pub fn new(settings: BlendSettings) -> BlendResult<Self> {
        let backend = create_backend(settings.backend, &settings)?;
        Ok(Self {
            reference: ScalarBackend::new(settings.threading),
            backend,
            settings,
        })
    }

    /// Active configuration.
    pub fn settings(&self) -> &BlendSettings {
        &self.settings
    }

    /// Name of the configured backend.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    fn should_fall_back(&self, err: &BlendError) -> bool {
        err.is_unsupported()
            && self.settings.fallback_to_scalar
            && self.backend.name() != self.reference.name()
    }

    /// Fill `desc.dest` with `desc.color`, honoring opacity and mask.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(
            dest = %desc.dest.format(),
            width = desc.dest.width(),
            height = desc.dest.height(),
            mode = ?desc.mode(),
            blend_mode = %desc.blend_mode,
        )
    )]
    pub fn fill(&self, desc: &mut FillDescriptor<'_>) -> BlendResult<()> {
        match self.backend.fill(desc) {
            Err(err) if self.should_fall_back(&err) => {
                tracing::debug!(backend = self.backend.name(), reason = %err, "fill falls back to scalar");
                self.reference.fill(desc)
            }
            other => other,
        }
    }

    /// Convert and blend `desc.src` into `desc.dest`.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(
            src = %desc.src.format(),
            dest = %desc.dest.format(),
            width = desc.dest.width(),
            height = desc.dest.height(),
            mode = ?desc.mode(),
            blend_mode = %desc.blend_mode,
        )
    )]
    pub fn blend_image(&self, desc: &mut ImageBlendDescriptor<'_>) -> BlendResult<()> {
        match self.backend.blend_image(desc) {
            Err(err) if self.should_fall_back(&err) => {
                tracing::debug!(backend = self.backend.name(), reason = %err, "image blend falls back to scalar");
                self.reference.blend_image(desc)
            }
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blender.rs"]
mod tests;
