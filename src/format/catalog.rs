//! Bit-exact unpack/pack rules between the supported encodings.
//!
//! Every function here is pure and allocation-free. Slice arguments must hold at least one
//! pixel of the named encoding; callers obtain them from exact-length row spans.

use crate::foundation::core::Rgb888;

/// Broadcast one luminance byte into RGB565 using the 5/6-bit truncation masks.
#[inline]
pub fn l8_to_rgb565(v: u8) -> u16 {
    let v = u16::from(v);
    ((v & 0xF8) << 8) | ((v & 0xFC) << 3) | ((v & 0xF8) >> 3)
}

/// Truncate an 8-bit color to RGB565.
#[inline]
pub fn rgb888_to_rgb565(c: Rgb888) -> u16 {
    ((u16::from(c.r) & 0xF8) << 8) | ((u16::from(c.g) & 0xFC) << 3) | (u16::from(c.b) >> 3)
}

/// Expand RGB565 to 8 bits per channel.
///
/// The `2106` / `1037` multipliers map the field maxima (31, 63) onto 255 exactly.
#[inline]
pub fn rgb565_to_rgb888(c: u16) -> Rgb888 {
    let r = u32::from((c >> 11) & 0x1F);
    let g = u32::from((c >> 5) & 0x3F);
    let b = u32::from(c & 0x1F);
    Rgb888 {
        r: ((r * 2106) >> 8) as u8,
        g: ((g * 1037) >> 8) as u8,
        b: ((b * 2106) >> 8) as u8,
    }
}

/// Split an RGB565 value into its `(r5, g6, b5)` fields.
#[inline]
pub fn rgb565_fields(c: u16) -> (u16, u16, u16) {
    ((c >> 11) & 0x1F, (c >> 5) & 0x3F, c & 0x1F)
}

/// Join `(r5, g6, b5)` fields into an RGB565 value.
#[inline]
pub fn rgb565_from_fields(r: u16, g: u16, b: u16) -> u16 {
    (r << 11) | (g << 5) | b
}

/// Load a little-endian RGB565 pixel.
#[inline]
pub fn read_rgb565(px: &[u8]) -> u16 {
    u16::from_le_bytes([px[0], px[1]])
}

/// Store a little-endian RGB565 pixel.
#[inline]
pub fn write_rgb565(px: &mut [u8], c: u16) {
    px[..2].copy_from_slice(&c.to_le_bytes());
}

/// Load the B,G,R bytes of any RGB888-family pixel.
#[inline]
pub fn read_bgr(px: &[u8]) -> Rgb888 {
    Rgb888 {
        b: px[0],
        g: px[1],
        r: px[2],
    }
}

/// Store B,G,R into an RGB888-family pixel. A fourth byte, when the slice holds one, is set
/// to `0xFF`.
#[inline]
pub fn write_bgr(px: &mut [u8], c: Rgb888) {
    px[0] = c.b;
    px[1] = c.g;
    px[2] = c.r;
    if let Some(x) = px.get_mut(3) {
        *x = 0xFF;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/catalog.rs"]
mod tests;
