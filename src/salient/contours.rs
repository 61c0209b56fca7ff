//! Segment boundary marking on a labeled or segmented image.
//!
//! Pixels are scanned in row-major order. A pixel is painted when more than
//! `threshold` of its 8 neighbors hold a different value, ignoring neighbors
//! painted earlier in the scan. A threshold of 2 yields thin lines, 1 thick.
use crate::error::{check_len, Result};
use crate::image::{ImageView, RgbImage};
use serde::{Deserialize, Serialize};

// Starting from the left neighbor, going clockwise.
const DX8: [isize; 8] = [-1, -1, 0, 1, 1, 1, 0, -1];
const DY8: [isize; 8] = [0, -1, -1, -1, 0, 1, 1, 1];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourParams {
    /// Packed `0xRRGGBB` line color.
    pub color: u32,
    /// Minimum number of differing neighbors, exclusive.
    pub threshold: usize,
}

impl Default for ContourParams {
    fn default() -> Self {
        Self {
            color: 0xFFFFFF,
            threshold: 2,
        }
    }
}

/// Boundary pixels of `image`, row-major. The image is left untouched.
pub fn contour_mask(image: &RgbImage, threshold: usize) -> Result<Vec<bool>> {
    image.validate()?;
    let (w, h) = (image.width() as isize, image.height() as isize);
    let mut taken = vec![false; image.data.len()];
    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) as usize;
            let value = image.data[idx];
            let differing = DX8
                .iter()
                .zip(DY8)
                .filter(|&(&dx, dy)| {
                    let (xn, yn) = (x + dx, y + dy);
                    if xn < 0 || yn < 0 || xn >= w || yn >= h {
                        return false;
                    }
                    let n = (yn * w + xn) as usize;
                    !taken[n] && image.data[n] != value
                })
                .count();
            if differing > threshold {
                taken[idx] = true;
            }
        }
    }
    Ok(taken)
}

/// Paint segment boundaries of `image` in place. Returns the painted count.
pub fn draw_contours(image: &mut RgbImage, params: &ContourParams) -> Result<usize> {
    let mask = contour_mask(image, params.threshold)?;
    paint_mask(image, &mask, params.color)
}

/// Set every pixel of `image` flagged in `mask` to `color`.
pub fn paint_mask(image: &mut RgbImage, mask: &[bool], color: u32) -> Result<usize> {
    check_len(image.w, image.h, mask.len())?;
    let mut painted = 0usize;
    for (px, _) in image.data.iter_mut().zip(mask).filter(|&(_, &m)| m) {
        *px = color;
        painted += 1;
    }
    Ok(painted)
}
