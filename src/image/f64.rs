//! Owned single-channel f64 image in row-major layout.
//!
//! Used for the Lab planes, the smoothed channels and the saliency map.
use crate::error::{check_len, Result};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageF64 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<f64>,
}

impl ImageF64 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    /// Wrap an existing buffer, failing when its length is not `w * h`.
    pub fn from_vec(w: usize, h: usize, data: Vec<f64>) -> Result<Self> {
        check_len(w, h, data.len())?;
        Ok(Self { w, h, data })
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f64) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Arithmetic mean over all pixels (0 for an empty image).
    ///
    /// Summed as offsets from the first sample, so a constant image yields
    /// exactly that constant.
    pub fn mean(&self) -> f64 {
        let Some(&first) = self.data.first() else {
            return 0.0;
        };
        let offset: f64 = self.data.iter().map(|&v| v - first).sum();
        first + offset / self.data.len() as f64
    }

    /// Minimum and maximum value, `None` for an empty image.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let first = *self.data.first()?;
        Some(
            self.data
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }
}

impl crate::image::traits::ImageView for ImageF64 {
    type Pixel = f64;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[f64] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl crate::image::traits::ImageViewMut for ImageF64 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f64] {
        let start = y * self.w;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SaliencyError;

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = ImageF64::from_vec(3, 2, vec![0.0; 5]).unwrap_err();
        assert_eq!(
            err,
            SaliencyError::InvalidDimensions {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn min_max_and_mean() {
        let img = ImageF64::from_vec(2, 2, vec![1.0, -2.0, 4.0, 1.0]).unwrap();
        assert_eq!(img.min_max(), Some((-2.0, 4.0)));
        assert!((img.mean() - 1.0).abs() < 1e-12);
        assert_eq!(ImageF64::new(0, 0).min_max(), None);
    }
}
