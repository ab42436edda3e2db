/// Fully transparent opacity / mask / weight value.
pub const OPA_TRANSP: u8 = 0;

/// Fully covering opacity / mask / weight value.
pub const OPA_COVER: u8 = 255;

/// Straight (non-premultiplied) 8-bit RGB color, used for fills and as the unpacked
/// destination value of the RGB888 family.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgb888 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb888 {
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Broadcast a luminance value to all three channels.
    pub const fn gray(l: u8) -> Self {
        Self { r: l, g: l, b: l }
    }
}
