//! Destination encodings and their source-format reader tables.
//!
//! Each destination encoding decides, once per call, how every source format is read into
//! its own pixel space and which mixer applies. Missing table entries are combinations the
//! encoding cannot express.

use crate::blend::mixer::{self, BlendMode, Mixer};
use crate::foundation::core::Rgb888;
use crate::foundation::error::{BlendError, BlendResult};
use crate::format::catalog;
use crate::format::pixel_format::PixelFormat;

/// Reads one source pixel as `(value in destination space, alpha byte)`.
///
/// Formats without alpha report 255.
pub(crate) type SourceReader<P> = fn(&[u8]) -> (P, u8);

/// Scalar mixer in destination space: `(src, dst, w) -> result`.
pub(crate) type MixFn<P> = fn(P, P, u8) -> P;

/// Channel scaling used to modulate premultiplied sources.
pub(crate) type ScaleFn<P> = fn(P, u8) -> P;

/// Non-normal blend mode operation in destination space: `(src, dst) -> src'`.
pub(crate) type BlendOpFn<P> = fn(P, P) -> P;

/// A destination pixel encoding.
pub(crate) trait DestEncoding: Copy + Send + Sync + 'static {
    /// Unpacked pixel value.
    type Px: Copy + Default + PartialEq + Send + Sync + std::fmt::Debug;

    fn format(&self) -> PixelFormat;

    fn px_size(&self) -> usize;

    fn load(&self, px: &[u8]) -> Self::Px;

    /// `px` is exactly one destination pixel.
    fn store(&self, px: &mut [u8], v: Self::Px);

    fn from_color(&self, c: Rgb888) -> Self::Px;

    fn reader(&self, src: PixelFormat) -> Option<SourceReader<Self::Px>>;

    fn mix_fn(&self, mixer: Mixer) -> Option<MixFn<Self::Px>>;

    fn scale_fn(&self) -> ScaleFn<Self::Px>;

    /// `None` for [`BlendMode::Normal`] and for modes the encoding has no color for.
    fn blend_op(&self, mode: BlendMode) -> Option<BlendOpFn<Self::Px>>;
}

/// Little-endian RGB565.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb565Dest;

impl DestEncoding for Rgb565Dest {
    type Px = u16;

    fn format(&self) -> PixelFormat {
        PixelFormat::Rgb565
    }

    fn px_size(&self) -> usize {
        2
    }

    fn load(&self, px: &[u8]) -> u16 {
        catalog::read_rgb565(px)
    }

    fn store(&self, px: &mut [u8], v: u16) {
        catalog::write_rgb565(px, v);
    }

    fn from_color(&self, c: Rgb888) -> u16 {
        catalog::rgb888_to_rgb565(c)
    }

    fn reader(&self, src: PixelFormat) -> Option<SourceReader<u16>> {
        let read: SourceReader<u16> = match src {
            PixelFormat::L8 => |px| (catalog::l8_to_rgb565(px[0]), 255),
            PixelFormat::Al88 => |px| (catalog::l8_to_rgb565(px[0]), px[1]),
            PixelFormat::Rgb565 => |px| (catalog::read_rgb565(px), 255),
            PixelFormat::Rgb888 | PixelFormat::Xrgb8888 => {
                |px| (catalog::rgb888_to_rgb565(catalog::read_bgr(px)), 255)
            }
            PixelFormat::Argb8888 | PixelFormat::Argb8888Premultiplied => {
                |px| (catalog::rgb888_to_rgb565(catalog::read_bgr(px)), px[3])
            }
            PixelFormat::A8 => return None,
        };
        Some(read)
    }

    fn mix_fn(&self, mixer: Mixer) -> Option<MixFn<u16>> {
        Some(match mixer {
            Mixer::Standard => mixer::mix_rgb565,
            Mixer::Premultiplied => mixer::mix_rgb565_premultiplied,
        })
    }

    fn scale_fn(&self) -> ScaleFn<u16> {
        mixer::scale_rgb565
    }

    fn blend_op(&self, mode: BlendMode) -> Option<BlendOpFn<u16>> {
        let op: BlendOpFn<u16> = match mode {
            BlendMode::Normal => return None,
            BlendMode::Additive => |s, d| mixer::apply_rgb565(BlendMode::Additive, s, d),
            BlendMode::Subtractive => |s, d| mixer::apply_rgb565(BlendMode::Subtractive, s, d),
            BlendMode::Multiply => |s, d| mixer::apply_rgb565(BlendMode::Multiply, s, d),
        };
        Some(op)
    }
}

/// B,G,R(,X) with a byte width of 3 (RGB888) or 4 (XRGB8888).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb888Dest {
    px_size: usize,
}

impl Rgb888Dest {
    pub(crate) const RGB888: Self = Self { px_size: 3 };
    pub(crate) const XRGB8888: Self = Self { px_size: 4 };
}

impl DestEncoding for Rgb888Dest {
    type Px = Rgb888;

    fn format(&self) -> PixelFormat {
        if self.px_size == 3 {
            PixelFormat::Rgb888
        } else {
            PixelFormat::Xrgb8888
        }
    }

    fn px_size(&self) -> usize {
        self.px_size
    }

    fn load(&self, px: &[u8]) -> Rgb888 {
        catalog::read_bgr(px)
    }

    fn store(&self, px: &mut [u8], v: Rgb888) {
        catalog::write_bgr(px, v);
    }

    fn from_color(&self, c: Rgb888) -> Rgb888 {
        c
    }

    fn reader(&self, src: PixelFormat) -> Option<SourceReader<Rgb888>> {
        let read: SourceReader<Rgb888> = match src {
            PixelFormat::L8 => |px| (Rgb888::gray(px[0]), 255),
            PixelFormat::Al88 => |px| (Rgb888::gray(px[0]), px[1]),
            PixelFormat::Rgb565 => |px| (catalog::rgb565_to_rgb888(catalog::read_rgb565(px)), 255),
            PixelFormat::Rgb888 | PixelFormat::Xrgb8888 => |px| (catalog::read_bgr(px), 255),
            PixelFormat::Argb8888 | PixelFormat::Argb8888Premultiplied => {
                |px| (catalog::read_bgr(px), px[3])
            }
            PixelFormat::A8 => return None,
        };
        Some(read)
    }

    fn mix_fn(&self, mixer: Mixer) -> Option<MixFn<Rgb888>> {
        Some(match mixer {
            Mixer::Standard => mixer::mix_rgb888,
            Mixer::Premultiplied => mixer::mix_rgb888_premultiplied,
        })
    }

    fn scale_fn(&self) -> ScaleFn<Rgb888> {
        mixer::scale_rgb888
    }

    fn blend_op(&self, mode: BlendMode) -> Option<BlendOpFn<Rgb888>> {
        let op: BlendOpFn<Rgb888> = match mode {
            BlendMode::Normal => return None,
            BlendMode::Additive => |s, d| mixer::apply_rgb888(BlendMode::Additive, s, d),
            BlendMode::Subtractive => |s, d| mixer::apply_rgb888(BlendMode::Subtractive, s, d),
            BlendMode::Multiply => |s, d| mixer::apply_rgb888(BlendMode::Multiply, s, d),
        };
        Some(op)
    }
}

/// Alpha-only coverage bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct A8Dest;

impl DestEncoding for A8Dest {
    type Px = u8;

    fn format(&self) -> PixelFormat {
        PixelFormat::A8
    }

    fn px_size(&self) -> usize {
        1
    }

    fn load(&self, px: &[u8]) -> u8 {
        px[0]
    }

    fn store(&self, px: &mut [u8], v: u8) {
        px[0] = v;
    }

    fn from_color(&self, _c: Rgb888) -> u8 {
        0xFF
    }

    fn reader(&self, src: PixelFormat) -> Option<SourceReader<u8>> {
        let read: SourceReader<u8> = match src {
            PixelFormat::A8 => |px| (0xFF, px[0]),
            PixelFormat::Al88 => |px| (0xFF, px[1]),
            PixelFormat::Argb8888 => |px| (0xFF, px[3]),
            PixelFormat::L8 | PixelFormat::Rgb565 | PixelFormat::Rgb888 | PixelFormat::Xrgb8888 => {
                |_| (0xFF, 255)
            }
            PixelFormat::Argb8888Premultiplied => return None,
        };
        Some(read)
    }

    fn mix_fn(&self, mixer: Mixer) -> Option<MixFn<u8>> {
        match mixer {
            Mixer::Standard => Some(mixer::mix_a8),
            Mixer::Premultiplied => None,
        }
    }

    fn scale_fn(&self) -> ScaleFn<u8> {
        |c, _| c
    }

    fn blend_op(&self, _mode: BlendMode) -> Option<BlendOpFn<u8>> {
        None
    }
}

/// Destination encoding selected from a buffer's format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Destination {
    Rgb565(Rgb565Dest),
    Rgb888(Rgb888Dest),
    A8(A8Dest),
}

impl Destination {
    pub(crate) fn for_format(backend: &'static str, fmt: PixelFormat) -> BlendResult<Self> {
        match fmt {
            PixelFormat::Rgb565 => Ok(Self::Rgb565(Rgb565Dest)),
            PixelFormat::Rgb888 => Ok(Self::Rgb888(Rgb888Dest::RGB888)),
            PixelFormat::Xrgb8888 => Ok(Self::Rgb888(Rgb888Dest::XRGB8888)),
            PixelFormat::A8 => Ok(Self::A8(A8Dest)),
            other => Err(BlendError::unsupported(
                backend,
                format!("{other} is not a destination format"),
            )),
        }
    }
}

/// `SRC -> DEST` label used in errors and trace fields.
pub(crate) fn combination(src: PixelFormat, dest: PixelFormat) -> String {
    format!("{src} -> {dest}")
}

/// Label for a blend mode an encoding or backend cannot run, e.g. `additive fill -> A8`.
pub(crate) fn mode_combination(mode: BlendMode, what: &str, dest: PixelFormat) -> String {
    format!("{mode} {what} -> {dest}")
}

#[cfg(test)]
#[path = "../../tests/unit/blend/encoding.rs"]
mod tests;
