use crate::foundation::core::OPA_COVER;
use crate::foundation::math::mul_shr8;

/// How a draw call is modulated, derived from its opacity and mask presence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModulationMode {
    /// Full opacity, no mask.
    Plain,
    /// Uniform opacity below 255, no mask.
    Opacity,
    /// Full opacity with a per-pixel mask.
    Mask,
    /// Uniform opacity below 255 with a per-pixel mask.
    OpacityAndMask,
}

impl ModulationMode {
    /// Classify a call. Only exactly 255 counts as full opacity.
    pub fn of(opa: u8, has_mask: bool) -> Self {
        match (opa == OPA_COVER, has_mask) {
            (true, false) => Self::Plain,
            (false, false) => Self::Opacity,
            (true, true) => Self::Mask,
            (false, true) => Self::OpacityAndMask,
        }
    }
}

/// Fold source alpha, mask sample and opacity into one mix weight.
///
/// Factors combine pairwise with `(a * b) >> 8`. A factor of exactly 255 is skipped rather
/// than multiplied, since `(x * 255) >> 8` would darken it. With all three present the order
/// is fixed: `(alpha * ((opa * mask) >> 8)) >> 8`.
#[inline]
pub fn resolve(alpha: Option<u8>, mask: Option<u8>, opa: u8) -> u8 {
    let cover = opa == OPA_COVER;
    match (alpha, mask) {
        (None, None) => opa,
        (Some(a), None) if cover => a,
        (Some(a), None) => mul_shr8(a, opa),
        (None, Some(m)) if cover => m,
        (None, Some(m)) => mul_shr8(opa, m),
        (Some(a), Some(m)) if cover => mul_shr8(a, m),
        (Some(a), Some(m)) => mul_shr8(a, mul_shr8(opa, m)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/modulation.rs"]
mod tests;
