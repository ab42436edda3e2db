use crate::blend::mixer::BlendMode;
use crate::blend::modulation::ModulationMode;
use crate::buffer::view::{BufferView, BufferViewMut, MaskView};
use crate::foundation::core::{OPA_COVER, Rgb888};
use crate::foundation::error::{BlendError, BlendResult};

/// Flat-color fill of a destination region.
#[derive(Debug)]
pub struct FillDescriptor<'a> {
    /// Region to write. Must be RGB565, RGB888, XRGB8888 or A8.
    pub dest: BufferViewMut<'a>,
    /// Fill color. Ignored by A8 destinations, which only accumulate coverage.
    pub color: Rgb888,
    /// Uniform opacity.
    pub opa: u8,
    /// Optional coverage mask, already clipped to `dest`.
    pub mask: Option<MaskView<'a>>,
    /// Channel operation applied before mixing.
    pub blend_mode: BlendMode,
}

impl<'a> FillDescriptor<'a> {
    /// Opaque, unmasked fill.
    pub fn new(dest: BufferViewMut<'a>, color: Rgb888) -> Self {
        Self {
            dest,
            color,
            opa: OPA_COVER,
            mask: None,
            blend_mode: BlendMode::Normal,
        }
    }

    /// Set the uniform opacity.
    pub fn with_opa(mut self, opa: u8) -> Self {
        self.opa = opa;
        self
    }

    /// Attach a coverage mask.
    pub fn with_mask(mut self, mask: MaskView<'a>) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Set the blend mode.
    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }

    /// Modulation derived from opacity and mask presence.
    pub fn mode(&self) -> ModulationMode {
        ModulationMode::of(self.opa, self.mask.is_some())
    }

    pub(crate) fn check_geometry(&self) -> BlendResult<()> {
        check_mask(self.mask.as_ref(), self.dest.width(), self.dest.height())
    }
}

/// Blend of a source image into a destination region of the same size.
#[derive(Debug)]
pub struct ImageBlendDescriptor<'a> {
    /// Region to write.
    pub dest: BufferViewMut<'a>,
    /// Source pixels. Strides are independent of `dest`.
    pub src: BufferView<'a>,
    /// Uniform opacity.
    pub opa: u8,
    /// Optional coverage mask, already clipped to `dest`.
    pub mask: Option<MaskView<'a>>,
    /// Channel operation applied before mixing.
    pub blend_mode: BlendMode,
}

impl<'a> ImageBlendDescriptor<'a> {
    /// Opaque, unmasked blend.
    pub fn new(dest: BufferViewMut<'a>, src: BufferView<'a>) -> Self {
        Self {
            dest,
            src,
            opa: OPA_COVER,
            mask: None,
            blend_mode: BlendMode::Normal,
        }
    }

    /// Set the uniform opacity.
    pub fn with_opa(mut self, opa: u8) -> Self {
        self.opa = opa;
        self
    }

    /// Attach a coverage mask.
    pub fn with_mask(mut self, mask: MaskView<'a>) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Set the blend mode.
    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }

    /// Modulation derived from opacity and mask presence.
    pub fn mode(&self) -> ModulationMode {
        ModulationMode::of(self.opa, self.mask.is_some())
    }

    pub(crate) fn check_geometry(&self) -> BlendResult<()> {
        let (w, h) = (self.dest.width(), self.dest.height());
        if (self.src.width(), self.src.height()) != (w, h) {
            return Err(BlendError::geometry_mismatch(format!(
                "source is {}x{}, destination is {w}x{h}",
                self.src.width(),
                self.src.height()
            )));
        }
        check_mask(self.mask.as_ref(), w, h)
    }
}

fn check_mask(mask: Option<&MaskView<'_>>, w: u32, h: u32) -> BlendResult<()> {
    match mask {
        Some(m) if (m.width(), m.height()) != (w, h) => Err(BlendError::geometry_mismatch(
            format!("mask is {}x{}, destination is {w}x{h}", m.width(), m.height()),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/descriptor.rs"]
mod tests;
