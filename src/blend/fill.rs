use crate::blend::descriptor::FillDescriptor;
use crate::blend::encoding::DestEncoding;
use crate::blend::plan::PixelPlan;
use crate::foundation::error::BlendResult;

/// Resolved fill: pixel plan plus the color already packed in destination space.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FillPlan<E: DestEncoding> {
    pub(crate) pixel: PixelPlan<E>,
    pub(crate) color: E::Px,
}

impl<E: DestEncoding> FillPlan<E> {
    pub(crate) fn new(backend: &'static str, enc: E, desc: &FillDescriptor<'_>) -> BlendResult<Self> {
        Ok(Self {
            pixel: PixelPlan::for_color(
                backend,
                enc,
                desc.opa,
                desc.mask.is_some(),
                desc.blend_mode,
            )?,
            color: enc.from_color(desc.color),
        })
    }
}

/// Scalar reference fill of one destination row.
pub(crate) fn fill_row<E: DestEncoding>(plan: &FillPlan<E>, row: &mut [u8], mask: Option<&[u8]>) {
    let px = plan.pixel.enc.px_size();
    match mask {
        None => {
            for dst in row.chunks_exact_mut(px) {
                plan.pixel.blend_px(dst, plan.color, 255, None);
            }
        }
        Some(mask) => {
            for (dst, &m) in row.chunks_exact_mut(px).zip(mask) {
                plan.pixel.blend_px(dst, plan.color, 255, Some(m));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/fill.rs"]
mod tests;
