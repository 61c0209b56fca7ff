//! Separable smoothing with boundary-aware re-normalization.
//!
//! A 1-D kernel is applied along each row, then along each column of the
//! intermediate result. At every output sample only taps whose source index
//! falls inside the image contribute, and the sum is divided by the weight of
//! those taps alone. Borders are therefore re-normalized instead of
//! zero-padded or clamped: a constant image stays constant everywhere.
use crate::error::{check_len, Result, SaliencyError};
use crate::image::{ImageF64, ImageView, ImageViewMut};
use serde::{Deserialize, Serialize};

/// Trait implemented by separable 1-D filters.
pub trait SeparableFilter {
    /// 1-D taps in left-to-right order; the centre tap sits at `len / 2`.
    fn taps(&self) -> &[f64];

    #[inline]
    fn radius(&self) -> usize {
        self.taps().len() / 2
    }
}

/// Validated odd-length, symmetric, non-negative kernel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Kernel {
    taps: Vec<f64>,
}

impl Kernel {
    pub fn new(taps: Vec<f64>) -> Result<Self> {
        if taps.len() % 2 == 0 {
            return Err(SaliencyError::InvalidKernel(format!(
                "length must be odd, got {}",
                taps.len()
            )));
        }
        if taps.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(SaliencyError::InvalidKernel(
                "weights must be finite and non-negative".to_string(),
            ));
        }
        let center = taps.len() / 2;
        if taps[center] <= 0.0 {
            return Err(SaliencyError::InvalidKernel(
                "centre weight must be positive".to_string(),
            ));
        }
        if (0..center).any(|k| taps[k] != taps[taps.len() - 1 - k]) {
            return Err(SaliencyError::InvalidKernel(
                "weights must be symmetric about the centre".to_string(),
            ));
        }
        Ok(Self { taps })
    }

    /// `[1]`, the identity.
    pub fn identity() -> Self {
        Self { taps: vec![1.0] }
    }

    /// `[1, 2, 1]`, the default smoothing kernel.
    pub fn binomial3() -> Self {
        Self {
            taps: vec![1.0, 2.0, 1.0],
        }
    }

    /// `[1, 4, 6, 4, 1]`; slightly stronger blur, maps come out brighter.
    pub fn binomial5() -> Self {
        Self {
            taps: vec![1.0, 4.0, 6.0, 4.0, 1.0],
        }
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::binomial3()
    }
}

impl TryFrom<Vec<f64>> for Kernel {
    type Error = SaliencyError;

    fn try_from(taps: Vec<f64>) -> Result<Self> {
        Kernel::new(taps)
    }
}

impl From<Kernel> for Vec<f64> {
    fn from(kernel: Kernel) -> Self {
        kernel.taps
    }
}

impl SeparableFilter for Kernel {
    #[inline]
    fn taps(&self) -> &[f64] {
        &self.taps
    }
}

/// Smooth one channel with `filter` along rows, then columns.
pub fn smooth<F: SeparableFilter + ?Sized>(input: &ImageF64, filter: &F) -> Result<ImageF64> {
    check_len(input.w, input.h, input.data.len())?;
    let taps = filter.taps();
    let radius = filter.radius();

    let mut tmp = ImageF64::new(input.w, input.h);
    for y in 0..input.h {
        filter_line(input.row(y), tmp.row_mut(y), taps, radius);
    }

    let mut out = ImageF64::new(input.w, input.h);
    let mut column = vec![0.0; input.h];
    let mut filtered = vec![0.0; input.h];
    for x in 0..input.w {
        for (y, v) in column.iter_mut().enumerate() {
            *v = tmp.get(x, y);
        }
        filter_line(&column, &mut filtered, taps, radius);
        for (y, &v) in filtered.iter().enumerate() {
            out.set(x, y, v);
        }
    }
    Ok(out)
}

fn filter_line(src: &[f64], dst: &mut [f64], taps: &[f64], radius: usize) {
    let n = src.len();
    for (i, dst_px) in dst.iter_mut().enumerate() {
        // In-bounds tap window: k such that i + k - radius ∈ [0, n).
        let k_lo = radius.saturating_sub(i);
        let k_hi = (n - i + radius).min(taps.len());
        // Accumulate offsets from the centre sample so a flat window is exact.
        let center = src[i];
        let mut acc = 0.0;
        let mut weight = 0.0;
        for (k, &tap) in taps.iter().enumerate().take(k_hi).skip(k_lo) {
            acc += (src[i + k - radius] - center) * tap;
            weight += tap;
        }
        *dst_px = center + acc / weight;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: usize, h: usize) -> ImageF64 {
        let mut img = ImageF64::new(w, h);
        for y in 0..h {
            for x in 0..w {
                img.set(x, y, (x * 7 + y * 13) as f64 * 0.5 - 3.0);
            }
        }
        img
    }

    #[test]
    fn identity_kernel_is_identity() {
        let img = ramp(5, 4);
        let out = smooth(&img, &Kernel::identity()).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn constant_image_stays_constant_including_borders() {
        for (w, h) in [(1, 1), (2, 3), (7, 5)] {
            for kernel in [Kernel::binomial3(), Kernel::binomial5()] {
                let img = ImageF64::from_vec(w, h, vec![42.5; w * h]).unwrap();
                let out = smooth(&img, &kernel).unwrap();
                for &v in &out.data {
                    assert!((v - 42.5).abs() < 1e-12, "{w}x{h}: got {v}");
                }
            }
        }
    }

    #[test]
    fn border_renormalizes_instead_of_padding() {
        // Single row [0, 3, 0]: left sample sees taps {2, 1} -> (0*2 + 3*1) / 3.
        let img = ImageF64::from_vec(3, 1, vec![0.0, 3.0, 0.0]).unwrap();
        let out = smooth(&img, &Kernel::binomial3()).unwrap();
        assert!((out.data[0] - 1.0).abs() < 1e-12);
        assert!((out.data[1] - 1.5).abs() < 1e-12);
        assert!((out.data[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn kernel_wider_than_image() {
        let img = ImageF64::from_vec(2, 1, vec![0.0, 6.0]).unwrap();
        let out = smooth(&img, &Kernel::binomial5()).unwrap();
        // x=0 sees taps 6 (self) and 4 (right): 24 / 10.
        assert!((out.data[0] - 2.4).abs() < 1e-12);
        // x=1 sees taps 4 (left) and 6 (self): 36 / 10.
        assert!((out.data[1] - 3.6).abs() < 1e-12);
    }

    #[test]
    fn kernel_validation() {
        assert!(Kernel::new(vec![1.0, 1.0]).is_err());
        assert!(Kernel::new(vec![]).is_err());
        assert!(Kernel::new(vec![1.0, -2.0, 1.0]).is_err());
        assert!(Kernel::new(vec![1.0, 2.0, 3.0]).is_err());
        assert!(Kernel::new(vec![1.0, 0.0, 1.0]).is_err());
        assert!(Kernel::new(vec![0.5, 3.0, 0.5]).is_ok());
    }

    #[test]
    fn kernel_deserializes_with_validation() {
        let k: Kernel = serde_json::from_str("[1, 4, 6, 4, 1]").unwrap();
        assert_eq!(k, Kernel::binomial5());
        assert!(serde_json::from_str::<Kernel>("[1, 2]").is_err());
    }
}
