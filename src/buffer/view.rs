use rayon::prelude::*;

use crate::foundation::error::{BlendError, BlendResult};
use crate::format::pixel_format::PixelFormat;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Geometry {
    width: u32,
    height: u32,
    stride: usize,
    row_bytes: usize,
}

impl Geometry {
    fn validate(
        what: &str,
        len: usize,
        width: u32,
        height: u32,
        stride: usize,
        bpp: usize,
    ) -> BlendResult<Self> {
        let row_bytes = (width as usize).checked_mul(bpp).ok_or_else(|| {
            BlendError::invalid_argument(format!("{what}: row size overflows ({width} px)"))
        })?;
        if stride < row_bytes {
            return Err(BlendError::invalid_argument(format!(
                "{what}: stride {stride} is smaller than one row ({row_bytes} bytes)"
            )));
        }
        if height > 0 {
            let needed = (height as usize - 1)
                .checked_mul(stride)
                .and_then(|v| v.checked_add(row_bytes))
                .ok_or_else(|| {
                    BlendError::invalid_argument(format!("{what}: buffer size overflows"))
                })?;
            if len < needed {
                return Err(BlendError::invalid_argument(format!(
                    "{what}: {len} bytes cannot hold {width}x{height} with stride {stride} (need {needed})"
                )));
            }
        }
        Ok(Self {
            width,
            height,
            stride,
            row_bytes,
        })
    }

    fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn row_range(&self, y: u32) -> std::ops::Range<usize> {
        debug_assert!(y < self.height);
        let start = y as usize * self.stride;
        start..start + self.row_bytes
    }

    /// Number of stride-sized chunks worth visiting; zero for empty regions so that a zero
    /// stride never reaches `chunks_mut`.
    fn visit_rows(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.height as usize
        }
    }
}

/// Read-only view of a caller-owned pixel buffer.
#[derive(Clone, Copy, Debug)]
pub struct BufferView<'a> {
    data: &'a [u8],
    format: PixelFormat,
    geom: Geometry,
}

impl<'a> BufferView<'a> {
    /// Wrap `data` after checking that it can hold `height` rows of `stride` bytes.
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
    ) -> BlendResult<Self> {
        let geom = Geometry::validate(
            "buffer view",
            data.len(),
            width,
            height,
            stride,
            format.bytes_per_pixel(),
        )?;
        Ok(Self { data, format, geom })
    }

    /// Wrap a buffer whose rows are tightly packed.
    pub fn packed(data: &'a [u8], width: u32, height: u32, format: PixelFormat) -> BlendResult<Self> {
        let stride = width as usize * format.bytes_per_pixel();
        Self::new(data, width, height, stride, format)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.geom.width
    }

    /// Height in rows.
    pub fn height(&self) -> u32 {
        self.geom.height
    }

    /// Bytes between the starts of consecutive rows.
    pub fn stride(&self) -> usize {
        self.geom.stride
    }

    /// Pixel encoding.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Whether the view covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.geom.is_empty()
    }

    /// Row `y`, exactly `width * bytes_per_pixel` bytes long.
    ///
    /// Panics when `y >= height`.
    pub fn row(&self, y: u32) -> &'a [u8] {
        &self.data[self.geom.row_range(y)]
    }
}

/// Mutable view of a caller-owned destination buffer.
#[derive(Debug)]
pub struct BufferViewMut<'a> {
    data: &'a mut [u8],
    format: PixelFormat,
    geom: Geometry,
}

impl<'a> BufferViewMut<'a> {
    /// Wrap `data` after checking that it can hold `height` rows of `stride` bytes.
    pub fn new(
        data: &'a mut [u8],
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
    ) -> BlendResult<Self> {
        let geom = Geometry::validate(
            "destination view",
            data.len(),
            width,
            height,
            stride,
            format.bytes_per_pixel(),
        )?;
        Ok(Self { data, format, geom })
    }

    /// Wrap a buffer whose rows are tightly packed.
    pub fn packed(
        data: &'a mut [u8],
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> BlendResult<Self> {
        let stride = width as usize * format.bytes_per_pixel();
        Self::new(data, width, height, stride, format)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.geom.width
    }

    /// Height in rows.
    pub fn height(&self) -> u32 {
        self.geom.height
    }

    /// Bytes between the starts of consecutive rows.
    pub fn stride(&self) -> usize {
        self.geom.stride
    }

    /// Pixel encoding.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Whether the view covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.geom.is_empty()
    }

    /// Row `y`, exactly `width * bytes_per_pixel` bytes long.
    pub fn row(&self, y: u32) -> &[u8] {
        &self.data[self.geom.row_range(y)]
    }

    /// Mutable row `y`, exactly `width * bytes_per_pixel` bytes long.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let range = self.geom.row_range(y);
        &mut self.data[range]
    }

    /// Mutable rows, top to bottom. Padding bytes past each row are never exposed.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = (u32, &mut [u8])> + '_ {
        let row_bytes = self.geom.row_bytes;
        self.data
            .chunks_mut(self.geom.stride.max(1))
            .take(self.geom.visit_rows())
            .enumerate()
            .map(move |(y, row)| (y as u32, &mut row[..row_bytes]))
    }

    /// Mutable rows as disjoint parallel work items.
    pub(crate) fn par_rows_mut(
        &mut self,
        min_rows: usize,
    ) -> impl IndexedParallelIterator<Item = (u32, &mut [u8])> + '_ {
        let row_bytes = self.geom.row_bytes;
        self.data
            .par_chunks_mut(self.geom.stride.max(1))
            .take(self.geom.visit_rows())
            .with_min_len(min_rows.max(1))
            .enumerate()
            .map(move |(y, row)| (y as u32, &mut row[..row_bytes]))
    }

    /// Read-only reborrow.
    pub fn as_view(&self) -> BufferView<'_> {
        BufferView {
            data: &*self.data,
            format: self.format,
            geom: self.geom,
        }
    }
}

/// Read-only 8-bit coverage mask with its own stride.
#[derive(Clone, Copy, Debug)]
pub struct MaskView<'a> {
    data: &'a [u8],
    geom: Geometry,
}

impl<'a> MaskView<'a> {
    /// Wrap `data` after checking that it can hold `height` rows of `stride` bytes.
    pub fn new(data: &'a [u8], width: u32, height: u32, stride: usize) -> BlendResult<Self> {
        let geom = Geometry::validate("mask view", data.len(), width, height, stride, 1)?;
        Ok(Self { data, geom })
    }

    /// Wrap a mask whose rows are tightly packed.
    pub fn packed(data: &'a [u8], width: u32, height: u32) -> BlendResult<Self> {
        Self::new(data, width, height, width as usize)
    }

    /// Width in samples.
    pub fn width(&self) -> u32 {
        self.geom.width
    }

    /// Height in rows.
    pub fn height(&self) -> u32 {
        self.geom.height
    }

    /// Bytes between the starts of consecutive rows.
    pub fn stride(&self) -> usize {
        self.geom.stride
    }

    /// Row `y`, exactly `width` samples long.
    pub fn row(&self, y: u32) -> &'a [u8] {
        &self.data[self.geom.row_range(y)]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/buffer/view.rs"]
mod tests;
