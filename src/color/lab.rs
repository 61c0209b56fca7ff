//! sRGB → CIE XYZ (D65) → CIELAB.
//!
//! Each 8-bit channel is scaled to [0, 1] and linearized with the sRGB
//! inverse gamma, then projected through the fixed D65 matrix and mapped to
//! Lab against the reference white below. The cube-root branch is only taken
//! for ratios above `EPSILON`, so no fractional power of a negative base is
//! ever evaluated.
use crate::error::{check_len, Result};
use crate::image::{unpack_rgb, ImageF64, ImageView, RgbImage};
use nalgebra::{Matrix3, Vector3};

const EPSILON: f64 = 0.008856;
const KAPPA: f64 = 903.3;
const REF_WHITE: [f64; 3] = [0.950456, 1.0, 1.088754];

#[rustfmt::skip]
fn srgb_to_xyz() -> Matrix3<f64> {
    Matrix3::new(
        0.4124564, 0.3575761, 0.1804375,
        0.2126729, 0.7151522, 0.0721750,
        0.0193339, 0.1191920, 0.9503041,
    )
}

/// Three index-aligned Lab planes.
#[derive(Clone, Debug)]
pub struct LabImage {
    pub l: ImageF64,
    pub a: ImageF64,
    pub b: ImageF64,
}

impl LabImage {
    pub fn width(&self) -> usize {
        self.l.w
    }

    pub fn height(&self) -> usize {
        self.l.h
    }

    /// Per-channel mean `[L, a, b]` over the whole image.
    pub fn channel_means(&self) -> [f64; 3] {
        [self.l.mean(), self.a.mean(), self.b.mean()]
    }
}

#[inline]
fn linearize(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

fn pixel_to_lab(m: &Matrix3<f64>, px: u32) -> [f64; 3] {
    let [r, g, b] = unpack_rgb(px);
    let rgb = Vector3::new(
        linearize(r as f64 / 255.0),
        linearize(g as f64 / 255.0),
        linearize(b as f64 / 255.0),
    );
    let xyz = m * rgb;
    let fx = lab_f(xyz.x / REF_WHITE[0]);
    let fy = lab_f(xyz.y / REF_WHITE[1]);
    let fz = lab_f(xyz.z / REF_WHITE[2]);
    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// Convert a single packed `0xRRGGBB` pixel to `[L, a, b]`.
pub fn srgb_pixel_to_lab(px: u32) -> [f64; 3] {
    pixel_to_lab(&srgb_to_xyz(), px)
}

/// Convert a whole image to three Lab planes.
pub fn rgb_to_lab(image: &RgbImage) -> Result<LabImage> {
    check_len(image.w, image.h, image.data.len())?;
    let m = srgb_to_xyz();
    let mut l = ImageF64::new(image.w, image.h);
    let mut a = ImageF64::new(image.w, image.h);
    let mut b = ImageF64::new(image.w, image.h);
    for (i, &px) in image.as_slice().iter().enumerate() {
        let [lv, av, bv] = pixel_to_lab(&m, px);
        l.data[i] = lv;
        a.data[i] = av;
        b.data[i] = bv;
    }
    Ok(LabImage { l, a, b })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_lab(px: u32, expected: [f64; 3], tol: f64) {
        let lab = srgb_pixel_to_lab(px);
        for (got, want) in lab.iter().zip(expected) {
            assert!(
                (got - want).abs() < tol,
                "pixel {px:#08x}: got {lab:?}, expected {expected:?}"
            );
        }
    }

    #[test]
    fn black_maps_to_origin() {
        assert_lab(0x000000, [0.0, 0.0, 0.0], 1e-9);
    }

    #[test]
    fn white_maps_to_full_lightness() {
        assert_lab(0xFFFFFF, [100.0, 0.0, 0.0], 1e-2);
    }

    #[test]
    fn primaries_have_expected_signs() {
        let red = srgb_pixel_to_lab(0xFF0000);
        assert!((red[0] - 53.24).abs() < 0.1, "red L = {}", red[0]);
        assert!(red[1] > 70.0 && red[2] > 60.0, "red = {red:?}");

        let blue = srgb_pixel_to_lab(0x0000FF);
        assert!(blue[2] < -100.0, "blue b = {}", blue[2]);
    }

    #[test]
    fn image_conversion_is_index_aligned() {
        let img = RgbImage::new(2, 1, vec![0x000000, 0xFFFFFF]).unwrap();
        let lab = rgb_to_lab(&img).unwrap();
        assert_eq!(lab.l.data.len(), 2);
        assert!(lab.l.data[0].abs() < 1e-9);
        assert!((lab.l.data[1] - 100.0).abs() < 1e-2);
    }

    #[test]
    fn conversion_rejects_bad_buffer() {
        let img = RgbImage {
            w: 3,
            h: 3,
            data: vec![0; 4],
        };
        assert!(rgb_to_lab(&img).is_err());
    }
}
