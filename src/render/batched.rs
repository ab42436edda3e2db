//! Lane-chunked backend.
//!
//! Rows are processed in groups of [`LANES`] pixels: sources are gathered into lane arrays,
//! weights and mixes are computed for all lanes with branch-free arithmetic (conditions
//! become all-ones / all-zeros select masks), and lanes with a non-zero weight are stored.
//! The tail of each row that does not fill a group goes through the scalar pixel path.

use crate::blend::descriptor::{FillDescriptor, ImageBlendDescriptor};
use crate::blend::encoding::{
    DestEncoding, Destination, Rgb565Dest, Rgb888Dest, combination, mode_combination,
};
use crate::blend::fill::FillPlan;
use crate::blend::image::ImagePlan;
use crate::blend::mixer::{BlendMode, Mixer};
use crate::blend::modulation::ModulationMode;
use crate::blend::plan::PixelPlan;
use crate::foundation::core::{OPA_COVER, OPA_TRANSP, Rgb888};
use crate::foundation::error::{BlendError, BlendResult};
use crate::format::pixel_format::PixelFormat;
use crate::render::backend::{BlendBackend, RowThreading};
use crate::render::rows::{run_fill, run_image};

const NAME: &str = "batched";

/// Pixels per lane group.
pub const LANES: usize = 8;

type Lanes<T> = [T; LANES];

#[inline]
fn select16(cond: bool, a: u16, b: u16) -> u16 {
    let m = 0u16.wrapping_sub(u16::from(cond));
    (a & m) | (b & !m)
}

#[inline]
fn select8(cond: bool, a: u8, b: u8) -> u8 {
    let m = 0u8.wrapping_sub(u8::from(cond));
    (a & m) | (b & !m)
}

/// Lane arithmetic for destination encodings the batched backend accelerates.
pub(crate) trait LaneOps: DestEncoding {
    /// Mix every lane; lanes with `w == 0` come back as `dst`.
    fn mix_lanes(
        mixer: Mixer,
        src: &Lanes<Self::Px>,
        dst: &Lanes<Self::Px>,
        w: &Lanes<u8>,
    ) -> Lanes<Self::Px>;

    /// Scale lanes by `k`, leaving lanes with `k == 255` as they are.
    fn scale_lanes(src: &mut Lanes<Self::Px>, k: &Lanes<u8>);
}

impl LaneOps for Rgb565Dest {
    fn mix_lanes(mixer: Mixer, src: &Lanes<u16>, dst: &Lanes<u16>, w: &Lanes<u8>) -> Lanes<u16> {
        let premul = mixer == Mixer::Premultiplied;
        let mut out = [0u16; LANES];
        for (((o, &s), &d), &w) in out.iter_mut().zip(src).zip(dst).zip(w) {
            let wi = u32::from(w);
            let inv = 255 - wi;
            let (sr, sg, sb) = (u32::from(s >> 11), u32::from((s >> 5) & 0x3F), u32::from(s & 0x1F));
            let (dr, dg, db) = (u32::from(d >> 11), u32::from((d >> 5) & 0x3F), u32::from(d & 0x1F));
            let (r, g, b) = if premul {
                (
                    (sr + ((dr * inv) >> 8)).min(0x1F),
                    (sg + ((dg * inv) >> 8)).min(0x3F),
                    (sb + ((db * inv) >> 8)).min(0x1F),
                )
            } else {
                (
                    (sr * wi + dr * inv) >> 8,
                    (sg * wi + dg * inv) >> 8,
                    (sb * wi + db * inv) >> 8,
                )
            };
            let mixed = ((r << 11) | (g << 5) | b) as u16;
            let take_src = w == OPA_COVER || (!premul && s == d);
            *o = select16(w == OPA_TRANSP, d, select16(take_src, s, mixed));
        }
        out
    }

    fn scale_lanes(src: &mut Lanes<u16>, k: &Lanes<u8>) {
        for (c, &k) in src.iter_mut().zip(k) {
            let kk = u32::from(k);
            let r = (u32::from(*c >> 11) * kk) >> 8;
            let g = (u32::from((*c >> 5) & 0x3F) * kk) >> 8;
            let b = (u32::from(*c & 0x1F) * kk) >> 8;
            let scaled = ((r << 11) | (g << 5) | b) as u16;
            *c = select16(k == OPA_COVER, *c, scaled);
        }
    }
}

impl LaneOps for Rgb888Dest {
    fn mix_lanes(
        mixer: Mixer,
        src: &Lanes<Rgb888>,
        dst: &Lanes<Rgb888>,
        w: &Lanes<u8>,
    ) -> Lanes<Rgb888> {
        let premul = mixer == Mixer::Premultiplied;
        let mut out = [Rgb888::BLACK; LANES];
        for (((o, s), d), &w) in out.iter_mut().zip(src).zip(dst).zip(w) {
            let wi = u16::from(w);
            let inv = 255 - wi;
            let channel = |sc: u8, dc: u8| -> u8 {
                let (sc, dc) = (u16::from(sc), u16::from(dc));
                if premul {
                    (sc + ((dc * inv) >> 8)).min(0xFF) as u8
                } else {
                    ((u32::from(sc) * u32::from(wi) + u32::from(dc) * u32::from(inv)) >> 8) as u8
                }
            };
            let mixed = Rgb888 {
                r: channel(s.r, d.r),
                g: channel(s.g, d.g),
                b: channel(s.b, d.b),
            };
            let take_src = w == OPA_COVER || (!premul && s == d);
            let keep_dst = w == OPA_TRANSP;
            let pick = |sc: u8, dc: u8, mc: u8| select8(keep_dst, dc, select8(take_src, sc, mc));
            *o = Rgb888 {
                r: pick(s.r, d.r, mixed.r),
                g: pick(s.g, d.g, mixed.g),
                b: pick(s.b, d.b, mixed.b),
            };
        }
        out
    }

    fn scale_lanes(src: &mut Lanes<Rgb888>, k: &Lanes<u8>) {
        for (c, &k) in src.iter_mut().zip(k) {
            let kk = u16::from(k);
            let cover = k == OPA_COVER;
            let scale = |v: u8| select8(cover, v, ((u16::from(v) * kk) >> 8) as u8);
            *c = Rgb888 {
                r: scale(c.r),
                g: scale(c.g),
                b: scale(c.b),
            };
        }
    }
}

/// Mix weights for a whole lane group; the match on mode runs once per group.
fn lane_weights(
    mode: ModulationMode,
    has_alpha: bool,
    opa: u8,
    alpha: &Lanes<u8>,
    mask: &Lanes<u8>,
) -> Lanes<u8> {
    let o = u16::from(opa);
    let mut w = [OPA_COVER; LANES];
    match (mode, has_alpha) {
        (ModulationMode::Plain, false) => {}
        (ModulationMode::Plain, true) => w = *alpha,
        (ModulationMode::Opacity, false) => w = [opa; LANES],
        (ModulationMode::Opacity, true) => {
            for (w, &a) in w.iter_mut().zip(alpha) {
                *w = ((u16::from(a) * o) >> 8) as u8;
            }
        }
        (ModulationMode::Mask, false) => w = *mask,
        (ModulationMode::Mask, true) => {
            for ((w, &a), &m) in w.iter_mut().zip(alpha).zip(mask) {
                *w = ((u16::from(a) * u16::from(m)) >> 8) as u8;
            }
        }
        (ModulationMode::OpacityAndMask, false) => {
            for (w, &m) in w.iter_mut().zip(mask) {
                *w = ((o * u16::from(m)) >> 8) as u8;
            }
        }
        (ModulationMode::OpacityAndMask, true) => {
            for ((w, &a), &m) in w.iter_mut().zip(alpha).zip(mask) {
                let om = (o * u16::from(m)) >> 8;
                *w = ((u16::from(a) * om) >> 8) as u8;
            }
        }
    }
    w
}

/// Blend one destination row. `source(x)` yields the destination-space value and alpha of
/// pixel `x`.
fn blend_lanes<E, S>(pixel: &PixelPlan<E>, row: &mut [u8], mask: Option<&[u8]>, source: S)
where
    E: LaneOps,
    S: Fn(usize) -> (E::Px, u8),
{
    let px = pixel.enc.px_size();
    let width = row.len() / px;
    let grouped = width - width % LANES;
    let (head, tail) = row.split_at_mut(grouped * px);

    for (g, group) in head.chunks_exact_mut(LANES * px).enumerate() {
        let base = g * LANES;
        let mut src = [E::Px::default(); LANES];
        let mut dst = [E::Px::default(); LANES];
        let mut alpha = [OPA_COVER; LANES];
        let mut m = [OPA_COVER; LANES];
        for (i, d) in group.chunks_exact(px).enumerate() {
            (src[i], alpha[i]) = source(base + i);
            dst[i] = pixel.enc.load(d);
        }
        if let Some(mask) = mask {
            m.copy_from_slice(&mask[base..base + LANES]);
        }

        let w = lane_weights(pixel.mode, pixel.has_alpha, pixel.opa, &alpha, &m);
        if pixel.scale.is_some() {
            let k = lane_weights(pixel.mode, false, pixel.opa, &alpha, &m);
            E::scale_lanes(&mut src, &k);
        }
        let out = E::mix_lanes(pixel.mixer, &src, &dst, &w);

        for ((d, v), &w) in group.chunks_exact_mut(px).zip(out).zip(&w) {
            if w != OPA_TRANSP {
                pixel.enc.store(d, v);
            }
        }
    }

    for (i, d) in tail.chunks_exact_mut(px).enumerate() {
        let x = grouped + i;
        let (v, a) = source(x);
        pixel.blend_px(d, v, a, mask.map(|m| m[x]));
    }
}

fn fill_lanes<E: LaneOps>(plan: &FillPlan<E>, row: &mut [u8], mask: Option<&[u8]>) {
    let color = plan.color;
    blend_lanes(&plan.pixel, row, mask, |_| (color, OPA_COVER));
}

fn image_lanes<E: LaneOps>(plan: &ImagePlan<E>, row: &mut [u8], src: &[u8], mask: Option<&[u8]>) {
    let (read, sp) = (plan.read, plan.src_px);
    blend_lanes(&plan.pixel, row, mask, |x| read(&src[x * sp..(x + 1) * sp]));
}

/// Lane-chunked backend, bit-identical to [`crate::ScalarBackend`] on every call it accepts.
///
/// Declines with [`BlendError::Unsupported`]:
/// - A8 destinations.
/// - Blend modes other than [`BlendMode::Normal`].
/// - RGB888-family sources whose byte width differs from the destination's: RGB888 onto
///   XRGB8888, and any 4-byte source (premultiplied included) onto RGB888.
#[derive(Clone, Copy, Debug, Default)]
pub struct BatchedBackend {
    threading: RowThreading,
}

impl BatchedBackend {
    /// Backend distributing rows according to `threading`.
    pub fn new(threading: RowThreading) -> Self {
        Self { threading }
    }

    fn fill_with<E: LaneOps>(&self, enc: E, desc: &mut FillDescriptor<'_>) -> BlendResult<()> {
        if desc.blend_mode != BlendMode::Normal {
            return Err(BlendError::unsupported(
                NAME,
                mode_combination(desc.blend_mode, "fill", enc.format()),
            ));
        }
        let plan = FillPlan::new(NAME, enc, desc)?;
        if desc.opa == OPA_TRANSP {
            return Ok(());
        }
        run_fill(self.threading, &plan, desc, fill_lanes::<E>);
        Ok(())
    }

    fn blend_with<E: LaneOps>(&self, enc: E, desc: &mut ImageBlendDescriptor<'_>) -> BlendResult<()> {
        let src = desc.src.format();
        if src.is_rgb888_family()
            && enc.format().is_rgb888_family()
            && src.bytes_per_pixel() != enc.px_size()
        {
            return Err(BlendError::unsupported(NAME, combination(src, enc.format())));
        }
        if desc.blend_mode != BlendMode::Normal {
            return Err(BlendError::unsupported(
                NAME,
                mode_combination(desc.blend_mode, src.name(), enc.format()),
            ));
        }
        let plan = ImagePlan::new(NAME, enc, desc)?;
        if desc.opa == OPA_TRANSP {
            return Ok(());
        }
        run_image(self.threading, &plan, desc, image_lanes::<E>);
        Ok(())
    }
}

fn a8_unsupported(src: &str) -> BlendError {
    BlendError::unsupported(NAME, format!("{src} -> {}", PixelFormat::A8))
}

impl BlendBackend for BatchedBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    fn fill(&self, desc: &mut FillDescriptor<'_>) -> BlendResult<()> {
        desc.check_geometry()?;
        match Destination::for_format(NAME, desc.dest.format())? {
            Destination::Rgb565(enc) => self.fill_with(enc, desc),
            Destination::Rgb888(enc) => self.fill_with(enc, desc),
            Destination::A8(_) => Err(a8_unsupported("fill")),
        }
    }

    fn blend_image(&self, desc: &mut ImageBlendDescriptor<'_>) -> BlendResult<()> {
        desc.check_geometry()?;
        match Destination::for_format(NAME, desc.dest.format())? {
            Destination::Rgb565(enc) => self.blend_with(enc, desc),
            Destination::Rgb888(enc) => self.blend_with(enc, desc),
            Destination::A8(_) => Err(a8_unsupported(desc.src.format().name())),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/batched.rs"]
mod tests;
