use crate::blend::descriptor::{FillDescriptor, ImageBlendDescriptor};
use crate::blend::encoding::{DestEncoding, Destination};
use crate::blend::fill::{FillPlan, fill_row};
use crate::blend::image::{ImagePlan, blend_row};
use crate::foundation::core::OPA_TRANSP;
use crate::foundation::error::BlendResult;
use crate::render::backend::{BlendBackend, RowThreading};
use crate::render::rows::{run_fill, run_image};

const NAME: &str = "scalar";

/// Per-pixel reference backend.
///
/// Supports every source format onto every destination encoding, including mixed 3/4-byte
/// RGB888-family pairs.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarBackend {
    threading: RowThreading,
}

impl ScalarBackend {
    /// Backend distributing rows according to `threading`.
    pub fn new(threading: RowThreading) -> Self {
        Self { threading }
    }

    fn fill_with<E: DestEncoding>(&self, enc: E, desc: &mut FillDescriptor<'_>) -> BlendResult<()> {
        let plan = FillPlan::new(NAME, enc, desc)?;
        if desc.opa == OPA_TRANSP {
            return Ok(());
        }
        run_fill(self.threading, &plan, desc, fill_row::<E>);
        Ok(())
    }

    fn blend_with<E: DestEncoding>(
        &self,
        enc: E,
        desc: &mut ImageBlendDescriptor<'_>,
    ) -> BlendResult<()> {
        let plan = ImagePlan::new(NAME, enc, desc)?;
        if desc.opa == OPA_TRANSP {
            return Ok(());
        }
        run_image(self.threading, &plan, desc, blend_row::<E>);
        Ok(())
    }
}

impl BlendBackend for ScalarBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    fn fill(&self, desc: &mut FillDescriptor<'_>) -> BlendResult<()> {
        desc.check_geometry()?;
        match Destination::for_format(NAME, desc.dest.format())? {
            Destination::Rgb565(enc) => self.fill_with(enc, desc),
            Destination::Rgb888(enc) => self.fill_with(enc, desc),
            Destination::A8(enc) => self.fill_with(enc, desc),
        }
    }

    fn blend_image(&self, desc: &mut ImageBlendDescriptor<'_>) -> BlendResult<()> {
        desc.check_geometry()?;
        match Destination::for_format(NAME, desc.dest.format())? {
            Destination::Rgb565(enc) => self.blend_with(enc, desc),
            Destination::Rgb888(enc) => self.blend_with(enc, desc),
            Destination::A8(enc) => self.blend_with(enc, desc),
        }
    }
}
