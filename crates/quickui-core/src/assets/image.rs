//! Packed bitmap images
//!
//! Rows are packed MSB first and padded to a whole byte, so the stride of a
//! row is `ceil(width * bpp / 8)`. 16 bpp pixels are stored little-endian.

use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// Pixel storage format of an [`Image`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    /// 1 bpp; set bits are drawn in the caller's color, clear bits are transparent
    Mono,
    /// 4 bpp palette indices
    Indexed,
    /// 16 bpp RGB565
    Rgb565,
}

impl ImageFormat {
    pub const fn bits_per_pixel(self) -> usize {
        match self {
            Self::Mono => 1,
            Self::Indexed => 4,
            Self::Rgb565 => 16,
        }
    }
}

/// A pixel value read back from an [`Image`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelValue {
    Mono(bool),
    Index(u8),
    Raw(u16),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    width: u16,
    height: u16,
    format: ImageFormat,
    data: Vec<u8>,
}

impl Image {
    /// Wrap existing pixel data, checking it is long enough.
    pub fn new(
        width: u16,
        height: u16,
        format: ImageFormat,
        data: Vec<u8>,
    ) -> Result<Self, AssetError> {
        let expected = Self::stride_for(width, format) * height as usize;
        if data.len() < expected {
            return Err(AssetError::TruncatedImage {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// An all-zero image (fully transparent for [`ImageFormat::Mono`]).
    pub fn blank(width: u16, height: u16, format: ImageFormat) -> Self {
        let len = Self::stride_for(width, format) * height as usize;
        Self {
            width,
            height,
            format,
            data: vec![0; len],
        }
    }

    fn stride_for(width: u16, format: ImageFormat) -> usize {
        (width as usize * format.bits_per_pixel()).div_ceil(8)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn stride(&self) -> usize {
        Self::stride_for(self.width, self.format)
    }

    /// Read the pixel at `(x, y)`; `None` outside the image.
    pub fn pixel(&self, x: i32, y: i32) -> Option<PixelValue> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        let row = y * self.stride();
        match self.format {
            ImageFormat::Mono => {
                let byte = self.data[row + x / 8];
                Some(PixelValue::Mono(byte & (0x80 >> (x % 8)) != 0))
            }
            ImageFormat::Indexed => {
                let byte = self.data[row + x / 2];
                let index = if x % 2 == 0 { byte >> 4 } else { byte & 0x0F };
                Some(PixelValue::Index(index))
            }
            ImageFormat::Rgb565 => {
                let at = row + x * 2;
                Some(PixelValue::Raw(u16::from_le_bytes([
                    self.data[at],
                    self.data[at + 1],
                ])))
            }
        }
    }

    /// Whether a mono pixel is set. Always false for other formats.
    pub fn is_set(&self, x: i32, y: i32) -> bool {
        matches!(self.pixel(x, y), Some(PixelValue::Mono(true)))
    }

    /// Set or clear a mono pixel. Ignored outside the image or for other formats.
    pub fn set_mono(&mut self, x: i32, y: i32, on: bool) {
        if self.format != ImageFormat::Mono
            || x < 0
            || y < 0
            || x >= self.width as i32
            || y >= self.height as i32
        {
            return;
        }
        let at = y as usize * self.stride() + x as usize / 8;
        let mask = 0x80 >> (x as usize % 8);
        if on {
            self.data[at] |= mask;
        } else {
            self.data[at] &= !mask;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mono_rows_are_byte_padded() {
        let mut img = Image::blank(10, 2, ImageFormat::Mono);
        assert_eq!(img.stride(), 2);
        assert_eq!(img.data().len(), 4);
        img.set_mono(9, 1, true);
        assert!(img.is_set(9, 1));
        assert!(!img.is_set(9, 0));
        assert_eq!(img.data()[3], 0x40);
        img.set_mono(9, 1, false);
        assert!(!img.is_set(9, 1));
    }

    #[test]
    fn test_indexed_nibbles() {
        let img = Image::new(3, 1, ImageFormat::Indexed, vec![0xA5, 0xF0]).unwrap();
        assert_eq!(img.pixel(0, 0), Some(PixelValue::Index(0xA)));
        assert_eq!(img.pixel(1, 0), Some(PixelValue::Index(0x5)));
        assert_eq!(img.pixel(2, 0), Some(PixelValue::Index(0xF)));
        assert_eq!(img.pixel(3, 0), None);
    }

    #[test]
    fn test_rgb565_little_endian() {
        let img = Image::new(1, 1, ImageFormat::Rgb565, vec![0x1F, 0xF8]).unwrap();
        assert_eq!(img.pixel(0, 0), Some(PixelValue::Raw(0xF81F)));
    }

    #[test]
    fn test_truncated_data_rejected() {
        let err = Image::new(16, 16, ImageFormat::Mono, vec![0; 31]).unwrap_err();
        assert_eq!(
            err,
            AssetError::TruncatedImage {
                expected: 32,
                actual: 31
            }
        );
    }
}
