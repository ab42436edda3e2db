/// `(a * b) >> 8`: the fixed-point product used everywhere two 0-255 factors combine.
///
/// This is deliberately not `a * b / 255`; the consistent downward bias is part of the
/// output contract (`mul_shr8(255, 255) == 254`).
#[inline]
pub(crate) fn mul_shr8(a: u8, b: u8) -> u8 {
    ((u16::from(a) * u16::from(b)) >> 8) as u8
}

/// Weighted sum of one channel at any bit width up to 8: `(s * w + d * (255 - w)) >> 8`.
#[inline]
pub(crate) fn lerp_shr8(s: u16, d: u16, w: u8) -> u16 {
    let w = u32::from(w);
    ((u32::from(s) * w + u32::from(d) * (255 - w)) >> 8) as u16
}

/// Premultiplied channel composite `s + ((d * (255 - w)) >> 8)`, saturated to `max`.
#[inline]
pub(crate) fn premul_shr8(s: u16, d: u16, w: u8, max: u16) -> u16 {
    let inv = 255 - u32::from(w);
    let v = u32::from(s) + ((u32::from(d) * inv) >> 8);
    v.min(u32::from(max)) as u16
}

/// Scale one channel by a 0-255 factor: `(c * k) >> 8`.
#[inline]
pub(crate) fn scale_shr8(c: u16, k: u8) -> u16 {
    ((u32::from(c) * u32::from(k)) >> 8) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
