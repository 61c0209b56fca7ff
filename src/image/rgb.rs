//! Owned packed-RGB image (`0xRRGGBB` per pixel, no alpha).
use crate::error::{check_len, Result};

/// Split a packed `0xRRGGBB` value into its 8-bit channels.
#[inline]
pub fn unpack_rgb(px: u32) -> [u8; 3] {
    [
        ((px >> 16) & 0xFF) as u8,
        ((px >> 8) & 0xFF) as u8,
        (px & 0xFF) as u8,
    ]
}

/// Pack 8-bit channels into `0xRRGGBB`.
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RgbImage {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u32>,
}

impl RgbImage {
    /// Wrap a packed buffer, failing when its length is not `w * h`.
    pub fn new(w: usize, h: usize, data: Vec<u32>) -> Result<Self> {
        check_len(w, h, data.len())?;
        Ok(Self { w, h, data })
    }

    /// Image of a single color.
    pub fn filled(w: usize, h: usize, color: u32) -> Self {
        Self {
            w,
            h,
            data: vec![color; w * h],
        }
    }

    /// Re-check the buffer invariant, e.g. after the public fields were edited.
    pub fn validate(&self) -> Result<()> {
        check_len(self.w, self.h, self.data.len())
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u32) {
        self.data[y * self.w + x] = v;
    }
}

impl crate::image::traits::ImageView for RgbImage {
    type Pixel = u32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[u32] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> &[u32] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_channels() {
        assert_eq!(pack_rgb(0x12, 0x34, 0x56), 0x123456);
        assert_eq!(unpack_rgb(0xFF8000), [0xFF, 0x80, 0x00]);
    }

    #[test]
    fn new_checks_length() {
        assert!(RgbImage::new(4, 4, vec![0; 16]).is_ok());
        assert!(RgbImage::new(4, 4, vec![0; 15]).is_err());
    }
}
