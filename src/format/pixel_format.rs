use crate::foundation::error::BlendError;

/// In-memory pixel encodings understood by the blenders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// One luminance byte.
    L8,
    /// One alpha byte, no color.
    A8,
    /// Luminance byte followed by an alpha byte.
    Al88,
    /// Little-endian `u16`, 5-6-5 bits.
    Rgb565,
    /// Bytes B, G, R.
    Rgb888,
    /// Bytes B, G, R, X. The fourth byte carries no information.
    Xrgb8888,
    /// Bytes B, G, R, A with straight alpha.
    Argb8888,
    /// Bytes B, G, R, A with color channels already scaled by A.
    Argb8888Premultiplied,
}

impl PixelFormat {
    /// Every format, in tag order.
    pub const ALL: [Self; 8] = [
        Self::L8,
        Self::A8,
        Self::Rgb888,
        Self::Argb8888,
        Self::Xrgb8888,
        Self::Rgb565,
        Self::Al88,
        Self::Argb8888Premultiplied,
    ];

    /// Storage size of one pixel.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::L8 | Self::A8 => 1,
            Self::Al88 | Self::Rgb565 => 2,
            Self::Rgb888 => 3,
            Self::Xrgb8888 | Self::Argb8888 | Self::Argb8888Premultiplied => 4,
        }
    }

    /// Whether each pixel carries an alpha sample that feeds the blend weight.
    pub const fn has_alpha(self) -> bool {
        matches!(
            self,
            Self::A8 | Self::Al88 | Self::Argb8888 | Self::Argb8888Premultiplied
        )
    }

    /// Whether color channels are stored pre-scaled by alpha.
    pub const fn is_premultiplied(self) -> bool {
        matches!(self, Self::Argb8888Premultiplied)
    }

    /// Member of the B,G,R(,X/A) byte family.
    pub const fn is_rgb888_family(self) -> bool {
        matches!(
            self,
            Self::Rgb888 | Self::Xrgb8888 | Self::Argb8888 | Self::Argb8888Premultiplied
        )
    }

    /// Stable numeric identifier.
    pub const fn tag(self) -> u8 {
        match self {
            Self::L8 => 0x06,
            Self::A8 => 0x0E,
            Self::Rgb888 => 0x0F,
            Self::Argb8888 => 0x10,
            Self::Xrgb8888 => 0x11,
            Self::Rgb565 => 0x12,
            Self::Al88 => 0x15,
            Self::Argb8888Premultiplied => 0x1A,
        }
    }

    /// Upper-case display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::L8 => "L8",
            Self::A8 => "A8",
            Self::Al88 => "AL88",
            Self::Rgb565 => "RGB565",
            Self::Rgb888 => "RGB888",
            Self::Xrgb8888 => "XRGB8888",
            Self::Argb8888 => "ARGB8888",
            Self::Argb8888Premultiplied => "ARGB8888_PREMULTIPLIED",
        }
    }
}

impl TryFrom<u8> for PixelFormat {
    type Error = BlendError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|f| f.tag() == tag)
            .ok_or_else(|| BlendError::invalid_argument(format!("unknown pixel format tag {tag:#04x}")))
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/pixel_format.rs"]
mod tests;
