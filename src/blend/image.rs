use crate::blend::descriptor::ImageBlendDescriptor;
use crate::blend::encoding::{DestEncoding, SourceReader, combination};
use crate::blend::plan::PixelPlan;
use crate::foundation::error::{BlendError, BlendResult};

/// Resolved image blend: pixel plan plus the reader for this source format.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ImagePlan<E: DestEncoding> {
    pub(crate) pixel: PixelPlan<E>,
    pub(crate) read: SourceReader<E::Px>,
    pub(crate) src_px: usize,
}

impl<E: DestEncoding> ImagePlan<E> {
    pub(crate) fn new(
        backend: &'static str,
        enc: E,
        desc: &ImageBlendDescriptor<'_>,
    ) -> BlendResult<Self> {
        let src = desc.src.format();
        let read = enc
            .reader(src)
            .ok_or_else(|| BlendError::unsupported(backend, combination(src, enc.format())))?;
        Ok(Self {
            pixel: PixelPlan::for_source(
                backend,
                enc,
                src,
                desc.opa,
                desc.mask.is_some(),
                desc.blend_mode,
            )?,
            read,
            src_px: src.bytes_per_pixel(),
        })
    }
}

/// Scalar reference blend of one source row into one destination row.
pub(crate) fn blend_row<E: DestEncoding>(
    plan: &ImagePlan<E>,
    row: &mut [u8],
    src: &[u8],
    mask: Option<&[u8]>,
) {
    let px = plan.pixel.enc.px_size();
    let pixels = row.chunks_exact_mut(px).zip(src.chunks_exact(plan.src_px));
    match mask {
        None => {
            for (dst, s) in pixels {
                let (v, a) = (plan.read)(s);
                plan.pixel.blend_px(dst, v, a, None);
            }
        }
        Some(mask) => {
            for ((dst, s), &m) in pixels.zip(mask) {
                let (v, a) = (plan.read)(s);
                plan.pixel.blend_px(dst, v, a, Some(m));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/image.rs"]
mod tests;
