//! Scalar mixing of two pixels already expressed in destination space.
//!
//! All mixers share the short-circuits `w == 0 -> dst` and `w == 255 -> src`. The standard
//! formula also returns `src` whenever source and destination are bit-identical.

use crate::foundation::core::Rgb888;
use crate::foundation::math::{lerp_shr8, premul_shr8, scale_shr8};
use crate::format::catalog::{rgb565_fields, rgb565_from_fields};
use crate::format::pixel_format::PixelFormat;

/// Blend formula, chosen once per call from the source format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mixer {
    /// `(src * w + dst * (255 - w)) >> 8` per channel.
    Standard,
    /// `src + ((dst * (255 - w)) >> 8)` per channel, saturated.
    Premultiplied,
}

impl Mixer {
    /// Formula used for sources of `fmt`.
    pub fn for_source(fmt: PixelFormat) -> Self {
        if fmt.is_premultiplied() {
            Self::Premultiplied
        } else {
            Self::Standard
        }
    }
}

/// Channel operation applied between source and destination before the weighted mix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Source replaces destination.
    #[default]
    Normal,
    /// `src + dst`, clamped to the field maximum.
    Additive,
    /// `dst - src`, clamped at zero.
    Subtractive,
    /// `(src * dst) >> bits` at the field's own bit width.
    Multiply,
}

impl BlendMode {
    /// Lower-case name used in errors and trace fields.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Additive => "additive",
            Self::Subtractive => "subtractive",
            Self::Multiply => "multiply",
        }
    }

    #[inline]
    fn channel(self, s: u16, d: u16, bits: u32) -> u16 {
        match self {
            Self::Normal => s,
            Self::Additive => (s + d).min((1 << bits) - 1),
            Self::Subtractive => d.saturating_sub(s),
            Self::Multiply => (s * d) >> bits,
        }
    }
}

impl std::fmt::Display for BlendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Apply `mode` to each RGB565 field pair. The result still has to be mixed with the
/// destination by [`mix_rgb565`].
#[inline]
pub fn apply_rgb565(mode: BlendMode, src: u16, dst: u16) -> u16 {
    let (sr, sg, sb) = rgb565_fields(src);
    let (dr, dg, db) = rgb565_fields(dst);
    rgb565_from_fields(
        mode.channel(sr, dr, 5),
        mode.channel(sg, dg, 6),
        mode.channel(sb, db, 5),
    )
}

/// Apply `mode` to each 8-bit channel pair.
#[inline]
pub fn apply_rgb888(mode: BlendMode, src: Rgb888, dst: Rgb888) -> Rgb888 {
    let ch = |s: u8, d: u8| mode.channel(s.into(), d.into(), 8) as u8;
    Rgb888 {
        r: ch(src.r, dst.r),
        g: ch(src.g, dst.g),
        b: ch(src.b, dst.b),
    }
}

/// Standard RGB565 mix at 5/6/5-bit precision.
#[inline]
pub fn mix_rgb565(src: u16, dst: u16, w: u8) -> u16 {
    if w == 0 {
        return dst;
    }
    if w == 255 || src == dst {
        return src;
    }
    let (sr, sg, sb) = rgb565_fields(src);
    let (dr, dg, db) = rgb565_fields(dst);
    rgb565_from_fields(
        lerp_shr8(sr, dr, w),
        lerp_shr8(sg, dg, w),
        lerp_shr8(sb, db, w),
    )
}

/// Premultiplied RGB565 composite at 5/6/5-bit precision.
#[inline]
pub fn mix_rgb565_premultiplied(src: u16, dst: u16, w: u8) -> u16 {
    if w == 0 {
        return dst;
    }
    if w == 255 {
        return src;
    }
    let (sr, sg, sb) = rgb565_fields(src);
    let (dr, dg, db) = rgb565_fields(dst);
    rgb565_from_fields(
        premul_shr8(sr, dr, w, 0x1F),
        premul_shr8(sg, dg, w, 0x3F),
        premul_shr8(sb, db, w, 0x1F),
    )
}

/// Scale every RGB565 field by `k`.
#[inline]
pub fn scale_rgb565(c: u16, k: u8) -> u16 {
    let (r, g, b) = rgb565_fields(c);
    rgb565_from_fields(scale_shr8(r, k), scale_shr8(g, k), scale_shr8(b, k))
}

/// Standard mix at 8 bits per channel.
#[inline]
pub fn mix_rgb888(src: Rgb888, dst: Rgb888, w: u8) -> Rgb888 {
    if w == 0 {
        return dst;
    }
    if w == 255 || src == dst {
        return src;
    }
    Rgb888 {
        r: lerp_shr8(src.r.into(), dst.r.into(), w) as u8,
        g: lerp_shr8(src.g.into(), dst.g.into(), w) as u8,
        b: lerp_shr8(src.b.into(), dst.b.into(), w) as u8,
    }
}

/// Premultiplied composite at 8 bits per channel.
#[inline]
pub fn mix_rgb888_premultiplied(src: Rgb888, dst: Rgb888, w: u8) -> Rgb888 {
    if w == 0 {
        return dst;
    }
    if w == 255 {
        return src;
    }
    Rgb888 {
        r: premul_shr8(src.r.into(), dst.r.into(), w, 0xFF) as u8,
        g: premul_shr8(src.g.into(), dst.g.into(), w, 0xFF) as u8,
        b: premul_shr8(src.b.into(), dst.b.into(), w, 0xFF) as u8,
    }
}

/// Scale every channel by `k`.
#[inline]
pub fn scale_rgb888(c: Rgb888, k: u8) -> Rgb888 {
    Rgb888 {
        r: scale_shr8(c.r.into(), k) as u8,
        g: scale_shr8(c.g.into(), k) as u8,
        b: scale_shr8(c.b.into(), k) as u8,
    }
}

/// Alpha-only destinations keep the larger coverage; the source value is ignored.
#[inline]
pub fn mix_a8(_src: u8, dst: u8, w: u8) -> u8 {
    dst.max(w)
}

#[cfg(test)]
#[path = "../../tests/unit/blend/mixer.rs"]
mod tests;
