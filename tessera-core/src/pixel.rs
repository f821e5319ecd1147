//! RGB565 pixels and read-only buffer views

use core::fmt;

use crate::geometry::{Orientation, Region};

/// 16-bit colour: 5 bits red, 6 bits green, 5 bits blue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Rgb565 = Rgb565(0x0000);
    pub const WHITE: Rgb565 = Rgb565(0xFFFF);
    pub const RED: Rgb565 = Rgb565(0xF800);
    pub const GREEN: Rgb565 = Rgb565(0x07E0);
    pub const BLUE: Rgb565 = Rgb565(0x001F);

    /// Truncate 8-bit channels to 5/6/5
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        Rgb565(((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3))
    }

    /// Byte sent first on the bus
    pub const fn high(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Byte sent second on the bus
    pub const fn low(self) -> u8 {
        self.0 as u8
    }

    /// Decode a pixel as stored in memory (little-endian)
    pub const fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Rgb565(u16::from_le_bytes(bytes))
    }

    /// Encode a pixel as stored in memory (little-endian)
    pub const fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

/// Errors when viewing bytes as a pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferError {
    /// Row stride shorter than `width * 2` bytes
    StrideTooSmall,
    /// Fewer than `stride * height` bytes supplied
    TooShort,
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::StrideTooSmall => write!(f, "stride smaller than one row of pixels"),
            BufferError::TooShort => write!(f, "buffer shorter than stride * height"),
        }
    }
}

/// Check the layout of a `width` × `height` buffer, returning its byte size
pub(crate) fn check_layout(
    len: usize,
    width: u16,
    height: u16,
    stride: usize,
) -> Result<usize, BufferError> {
    if stride < width as usize * 2 {
        return Err(BufferError::StrideTooSmall);
    }
    let size = stride
        .checked_mul(height as usize)
        .ok_or(BufferError::TooShort)?;
    if len < size {
        return Err(BufferError::TooShort);
    }
    Ok(size)
}

/// Borrowed view over RGB565 pixels
///
/// Pixel `(x, y)` is the little-endian word at byte `y * stride + x * 2`.
#[derive(Clone, Copy)]
pub struct PixelBuffer<'a> {
    bytes: &'a [u8],
    width: u16,
    height: u16,
    stride: usize,
}

impl<'a> PixelBuffer<'a> {
    /// View `bytes` as `width` × `height` pixels with rows `stride` bytes apart
    pub fn new(bytes: &'a [u8], width: u16, height: u16, stride: usize) -> Result<Self, BufferError> {
        check_layout(bytes.len(), width, height, stride)?;
        Ok(Self {
            bytes,
            width,
            height,
            stride,
        })
    }

    /// View over a layout already validated by [`check_layout`]
    pub(crate) fn from_checked(bytes: &'a [u8], width: u16, height: u16, stride: usize) -> Self {
        Self {
            bytes,
            width,
            height,
            stride,
        }
    }

    /// View with rows packed back to back
    pub fn packed(bytes: &'a [u8], width: u16, height: u16) -> Result<Self, BufferError> {
        Self::new(bytes, width, height, width as usize * 2)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Region covering the whole buffer
    pub fn bounds(&self) -> Region {
        Region::full(self.width, self.height)
    }

    /// Pixel at `(x, y)`, if inside the buffer
    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgb565> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.word_at(x, y))
    }

    // Caller guarantees (x, y) is inside the buffer; layout was checked at
    // construction so the two bytes exist.
    fn word_at(&self, x: u16, y: u16) -> Rgb565 {
        let offset = y as usize * self.stride + x as usize * 2;
        Rgb565::from_le_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }

    /// Pixels of `region` in controller streaming order
    ///
    /// Landscape walks rows (x fastest), Portrait walks columns (y
    /// fastest). Returns `None` if the region does not fit the buffer.
    pub fn scan(&self, region: Region, orientation: Orientation) -> Option<Scan<'_, 'a>> {
        if !region.fits_within(self.width, self.height) {
            return None;
        }
        Some(Scan {
            buffer: self,
            region,
            orientation,
            index: 0,
            total: region.area(),
        })
    }
}

impl fmt::Debug for PixelBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .finish()
    }
}

/// Iterator over a region's pixels in streaming order
pub struct Scan<'b, 'a> {
    buffer: &'b PixelBuffer<'a>,
    region: Region,
    orientation: Orientation,
    index: u32,
    total: u32,
}

impl Iterator for Scan<'_, '_> {
    type Item = Rgb565;

    fn next(&mut self) -> Option<Rgb565> {
        if self.index >= self.total {
            return None;
        }
        let i = self.index;
        self.index += 1;

        let w = self.region.width as u32;
        let h = self.region.height as u32;
        let (dx, dy) = match self.orientation {
            Orientation::Landscape => (i % w, i / w),
            Orientation::Portrait => (i / h, i % h),
        };
        Some(
            self.buffer
                .word_at(self.region.x + dx as u16, self.region.y + dy as u16),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.total - self.index) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Scan<'_, '_> {}
