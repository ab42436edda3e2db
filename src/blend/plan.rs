use crate::blend::encoding::{
    BlendOpFn, DestEncoding, MixFn, ScaleFn, combination, mode_combination,
};
use crate::blend::mixer::{BlendMode, Mixer};
use crate::blend::modulation::{ModulationMode, resolve};
use crate::foundation::core::OPA_COVER;
use crate::foundation::error::{BlendError, BlendResult};
use crate::format::pixel_format::PixelFormat;

/// Everything a pixel loop needs, resolved once per call before the first pixel.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PixelPlan<E: DestEncoding> {
    pub(crate) enc: E,
    pub(crate) mix: MixFn<E::Px>,
    /// Present only for premultiplied sources.
    pub(crate) scale: Option<ScaleFn<E::Px>>,
    /// Present only for non-normal blend modes.
    pub(crate) op: Option<BlendOpFn<E::Px>>,
    pub(crate) mixer: Mixer,
    pub(crate) opa: u8,
    pub(crate) has_alpha: bool,
    pub(crate) mode: ModulationMode,
}

impl<E: DestEncoding> PixelPlan<E> {
    /// Plan for a flat color: standard mixer, no source alpha.
    pub(crate) fn for_color(
        backend: &'static str,
        enc: E,
        opa: u8,
        has_mask: bool,
        blend_mode: BlendMode,
    ) -> BlendResult<Self> {
        let mix = enc.mix_fn(Mixer::Standard).ok_or_else(|| {
            BlendError::unsupported(backend, format!("fill -> {}", enc.format()))
        })?;
        Ok(Self {
            enc,
            mix,
            scale: None,
            op: blend_op(backend, &enc, blend_mode, "fill")?,
            mixer: Mixer::Standard,
            opa,
            has_alpha: false,
            mode: ModulationMode::of(opa, has_mask),
        })
    }

    /// Plan for an image of format `src`.
    pub(crate) fn for_source(
        backend: &'static str,
        enc: E,
        src: PixelFormat,
        opa: u8,
        has_mask: bool,
        blend_mode: BlendMode,
    ) -> BlendResult<Self> {
        let mixer = Mixer::for_source(src);
        let mix = enc
            .mix_fn(mixer)
            .ok_or_else(|| BlendError::unsupported(backend, combination(src, enc.format())))?;
        if mixer == Mixer::Premultiplied && blend_mode != BlendMode::Normal {
            return Err(BlendError::unsupported(
                backend,
                mode_combination(blend_mode, src.name(), enc.format()),
            ));
        }
        Ok(Self {
            enc,
            mix,
            scale: (mixer == Mixer::Premultiplied).then(|| enc.scale_fn()),
            op: blend_op(backend, &enc, blend_mode, src.name())?,
            mixer,
            opa,
            has_alpha: src.has_alpha(),
            mode: ModulationMode::of(opa, has_mask),
        })
    }

    /// Final mix weight for one pixel.
    #[inline]
    pub(crate) fn weight(&self, alpha: u8, mask: Option<u8>) -> u8 {
        resolve(self.has_alpha.then_some(alpha), mask, self.opa)
    }

    /// Blend `src` into the destination pixel `dst`. Pixels with zero weight are not
    /// written at all.
    #[inline]
    pub(crate) fn blend_px(&self, dst: &mut [u8], src: E::Px, alpha: u8, mask: Option<u8>) {
        let w = self.weight(alpha, mask);
        if w == 0 {
            return;
        }
        let src = match self.scale {
            Some(scale) => {
                let k = resolve(None, mask, self.opa);
                if k < OPA_COVER { scale(src, k) } else { src }
            }
            None => src,
        };
        let under = self.enc.load(dst);
        let src = match self.op {
            Some(op) => op(src, under),
            None => src,
        };
        self.enc.store(dst, (self.mix)(src, under, w));
    }
}

fn blend_op<E: DestEncoding>(
    backend: &'static str,
    enc: &E,
    mode: BlendMode,
    what: &str,
) -> BlendResult<Option<BlendOpFn<E::Px>>> {
    if mode == BlendMode::Normal {
        return Ok(None);
    }
    enc.blend_op(mode)
        .map(Some)
        .ok_or_else(|| BlendError::unsupported(backend, mode_combination(mode, what, enc.format())))
}
