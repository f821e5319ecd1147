//! Mutable framebuffer memory
//!
//! Offers the two ways clients change the frame: byte-stream writes at an
//! offset (the character-device path) and in-buffer drawing. Neither pushes
//! anything to the panel; the caller reports the change to the sync policy.

use core::fmt;

use crate::geometry::Region;
use crate::pixel::{check_layout, BufferError, PixelBuffer, Rgb565};

/// Errors from offset-based framebuffer access
///
/// When a transfer is truncated, the in-range part has still been copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FbAccessError {
    /// Offset past the end, or transfer longer than the whole buffer
    OutOfRange,
    /// Transfer ran past the end and was truncated
    NoSpace,
}

impl fmt::Display for FbAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FbAccessError::OutOfRange => write!(f, "access outside framebuffer"),
            FbAccessError::NoSpace => write!(f, "access truncated at end of framebuffer"),
        }
    }
}

/// RGB565 frame memory with the same layout as [`PixelBuffer`]
pub struct FrameBuffer<'a> {
    bytes: &'a mut [u8],
    width: u16,
    height: u16,
    stride: usize,
    size: usize,
}

impl<'a> FrameBuffer<'a> {
    /// Wrap `bytes` as `width` × `height` pixels with rows `stride` bytes apart
    pub fn new(bytes: &'a mut [u8], width: u16, height: u16, stride: usize) -> Result<Self, BufferError> {
        let size = check_layout(bytes.len(), width, height, stride)?;
        Ok(Self {
            bytes,
            width,
            height,
            stride,
            size,
        })
    }

    /// Frame with rows packed back to back
    pub fn packed(bytes: &'a mut [u8], width: u16, height: u16) -> Result<Self, BufferError> {
        Self::new(bytes, width, height, width as usize * 2)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Addressable size in bytes (`stride * height`)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Read-only view for blitting
    pub fn as_pixels(&self) -> PixelBuffer<'_> {
        PixelBuffer::from_checked(&self.bytes[..self.size], self.width, self.height, self.stride)
    }

    /// Copy `data` into the frame starting at byte `offset`
    ///
    /// Returns the number of bytes copied. A transfer that runs past the end
    /// is truncated; the truncated prefix is still written and the error
    /// reports why the full length was not.
    pub fn write_at(&mut self, offset: usize, data: &[u8]) -> Result<usize, FbAccessError> {
        let (count, err) = clamp_transfer(self.size, offset, data.len())?;
        self.bytes[offset..offset + count].copy_from_slice(&data[..count]);
        err.map_or(Ok(count), Err)
    }

    /// Copy frame bytes starting at `offset` into `out`
    ///
    /// Same truncation rules as [`write_at`](Self::write_at).
    pub fn read_at(&self, offset: usize, out: &mut [u8]) -> Result<usize, FbAccessError> {
        let (count, err) = clamp_transfer(self.size, offset, out.len())?;
        out[..count].copy_from_slice(&self.bytes[offset..offset + count]);
        err.map_or(Ok(count), Err)
    }

    /// Pixel at `(x, y)`, if inside the frame
    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgb565> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = self.offset(x, y);
        Some(Rgb565::from_le_bytes([self.bytes[offset], self.bytes[offset + 1]]))
    }

    /// Set one pixel; coordinates outside the frame are ignored
    pub fn set_pixel(&mut self, x: u16, y: u16, color: Rgb565) {
        if x < self.width && y < self.height {
            let offset = self.offset(x, y);
            self.bytes[offset..offset + 2].copy_from_slice(&color.to_le_bytes());
        }
    }

    /// Fill `region`, clipped to the frame
    pub fn fill_rect(&mut self, region: Region, color: Rgb565) {
        let region = region.clipped_to(self.width, self.height);
        let word = color.to_le_bytes();
        for y in region.y..region.y + region.height {
            let start = self.offset(region.x, y);
            let row = &mut self.bytes[start..start + region.width as usize * 2];
            for px in row.chunks_exact_mut(2) {
                px.copy_from_slice(&word);
            }
        }
    }

    /// Fill the whole frame
    pub fn fill(&mut self, color: Rgb565) {
        self.fill_rect(Region::full(self.width, self.height), color);
    }

    /// Copy `src` so its top-left corner lands at `(dx, dy)`
    ///
    /// Both rectangles are clipped to the frame. Overlapping areas copy as
    /// if through a temporary.
    pub fn copy_area(&mut self, src: Region, dx: u16, dy: u16) {
        let src = src.clipped_to(self.width, self.height);
        let dst = Region::new(dx, dy, src.width, src.height).clipped_to(self.width, self.height);
        let (w, h) = (dst.width.min(src.width), dst.height.min(src.height));
        if w == 0 || h == 0 {
            return;
        }

        let row_bytes = w as usize * 2;
        let copy_row = |fb: &mut Self, i: u16| {
            let from = fb.offset(src.x, src.y + i);
            let to = fb.offset(dst.x, dst.y + i);
            fb.bytes.copy_within(from..from + row_bytes, to);
        };

        // Moving down: walk rows bottom-up so sources are read before overwrite
        if dst.y > src.y {
            for i in (0..h).rev() {
                copy_row(self, i);
            }
        } else {
            for i in 0..h {
                copy_row(self, i);
            }
        }
    }

    fn offset(&self, x: u16, y: u16) -> usize {
        y as usize * self.stride + x as usize * 2
    }
}

/// Clamp a transfer of `count` bytes at `offset` to a buffer of `size` bytes
fn clamp_transfer(
    size: usize,
    offset: usize,
    count: usize,
) -> Result<(usize, Option<FbAccessError>), FbAccessError> {
    if offset > size {
        return Err(FbAccessError::OutOfRange);
    }

    let mut err = None;
    let mut count = count;
    if count > size {
        err = Some(FbAccessError::OutOfRange);
        count = size;
    }
    if count > size - offset {
        err = err.or(Some(FbAccessError::NoSpace));
        count = size - offset;
    }
    Ok((count, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(bytes: &mut [u8]) -> FrameBuffer<'_> {
        FrameBuffer::packed(bytes, 4, 3).unwrap()
    }

    #[test]
    fn test_write_within_bounds() {
        let mut bytes = [0u8; 24];
        let mut fb = frame(&mut bytes);
        assert_eq!(fb.write_at(2, &[0x34, 0x12]), Ok(2));
        assert_eq!(fb.pixel(1, 0), Some(Rgb565(0x1234)));
    }

    #[test]
    fn test_write_past_end_truncates() {
        let mut bytes = [0u8; 24];
        let mut fb = frame(&mut bytes);
        assert_eq!(fb.write_at(22, &[1, 2, 3, 4]), Err(FbAccessError::NoSpace));
        assert_eq!(fb.pixel(3, 2), Some(Rgb565(0x0201)));
    }

    #[test]
    fn test_write_offset_past_end() {
        let mut bytes = [0u8; 24];
        let mut fb = frame(&mut bytes);
        assert_eq!(fb.write_at(25, &[1]), Err(FbAccessError::OutOfRange));
        // Exactly at the end is allowed and copies nothing
        assert_eq!(fb.write_at(24, &[]), Ok(0));
        assert_eq!(fb.write_at(24, &[1]), Err(FbAccessError::NoSpace));
    }

    #[test]
    fn test_oversized_write_reports_out_of_range() {
        let mut bytes = [0u8; 24];
        let mut fb = frame(&mut bytes);
        let data = [0xAAu8; 30];
        assert_eq!(fb.write_at(0, &data), Err(FbAccessError::OutOfRange));
        assert_eq!(fb.pixel(3, 2), Some(Rgb565(0xAAAA)));
    }

    #[test]
    fn test_read_mirrors_write() {
        let mut bytes = [0u8; 24];
        let mut fb = frame(&mut bytes);
        fb.set_pixel(0, 1, Rgb565(0xBEEF));

        let mut out = [0u8; 4];
        assert_eq!(fb.read_at(8, &mut out), Ok(4));
        assert_eq!(out, [0xEF, 0xBE, 0, 0]);
        assert_eq!(fb.read_at(22, &mut out), Err(FbAccessError::NoSpace));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut bytes = [0u8; 24];
        let mut fb = frame(&mut bytes);
        fb.fill_rect(Region::new(2, 1, 10, 10), Rgb565::RED);
        assert_eq!(fb.pixel(1, 1), Some(Rgb565::BLACK));
        assert_eq!(fb.pixel(2, 1), Some(Rgb565::RED));
        assert_eq!(fb.pixel(3, 2), Some(Rgb565::RED));
        assert_eq!(fb.pixel(3, 0), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_set_pixel_outside_ignored() {
        let mut bytes = [0u8; 24];
        let mut fb = frame(&mut bytes);
        fb.set_pixel(4, 0, Rgb565::WHITE);
        fb.set_pixel(0, 3, Rgb565::WHITE);
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_copy_area_overlapping_down() {
        let mut bytes = [0u8; 24];
        let mut fb = frame(&mut bytes);
        fb.set_pixel(0, 0, Rgb565(1));
        fb.set_pixel(0, 1, Rgb565(2));

        fb.copy_area(Region::new(0, 0, 1, 2), 0, 1);
        assert_eq!(fb.pixel(0, 1), Some(Rgb565(1)));
        assert_eq!(fb.pixel(0, 2), Some(Rgb565(2)));
    }

    #[test]
    fn test_copy_area_clips_destination() {
        let mut bytes = [0u8; 24];
        let mut fb = frame(&mut bytes);
        fb.fill_rect(Region::new(0, 0, 2, 2), Rgb565::GREEN);

        fb.copy_area(Region::new(0, 0, 2, 2), 3, 2);
        assert_eq!(fb.pixel(3, 2), Some(Rgb565::GREEN));
        assert_eq!(fb.pixel(2, 2), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_pixels_view_matches() {
        let mut bytes = [0u8; 24];
        let mut fb = frame(&mut bytes);
        fb.fill(Rgb565::BLUE);
        let view = fb.as_pixels();
        assert_eq!(view.width(), 4);
        assert_eq!(view.pixel(3, 2), Some(Rgb565::BLUE));
    }
}
