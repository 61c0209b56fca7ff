use crate::image::ImageF64;
use log::warn;

/// Range used when stretching a saliency map for display.
pub const DEFAULT_NORM_RANGE: f64 = 255.0;

/// Linearly stretch `input` so its minimum maps to 0 and its maximum to `range`.
///
/// A constant input has zero spread; the spread is then taken as 1, which
/// sends every entry to 0.
pub fn normalize(input: &ImageF64, range: f64) -> ImageF64 {
    let Some((min, max)) = input.min_max() else {
        return input.clone();
    };
    let mut spread = max - min;
    if spread == 0.0 {
        warn!("normalize: constant input ({min}), output collapses to zero");
        spread = 1.0;
    }
    ImageF64 {
        w: input.w,
        h: input.h,
        data: input
            .data
            .iter()
            .map(|&v| range * (v - min) / spread)
            .collect(),
    }
}
