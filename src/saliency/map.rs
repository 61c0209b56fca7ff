use super::normalize::{normalize, DEFAULT_NORM_RANGE};
use super::SaliencyMap;
use crate::color::rgb_to_lab;
use crate::error::Result;
use crate::filters::{smooth, Kernel};
use crate::image::{pack_rgb, RgbImage};
use log::debug;
use serde::{Deserialize, Serialize};

/// Knobs of the saliency map builder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaliencyParams {
    /// Stretch the map to `[0, norm_range]` when set.
    pub normalize: bool,
    pub norm_range: f64,
    /// Smoothing kernel applied to each Lab channel.
    pub kernel: Kernel,
    /// Weight of the squared b-channel distance. Deliberately far below the
    /// L and a weights (1.0) to de-emphasize blue/yellow contrast.
    pub b_weight: f64,
}

impl Default for SaliencyParams {
    fn default() -> Self {
        Self {
            normalize: true,
            norm_range: DEFAULT_NORM_RANGE,
            kernel: Kernel::binomial3(),
            b_weight: 0.001,
        }
    }
}

/// Compute the saliency map of `image`.
pub fn compute_saliency_map(image: &RgbImage, params: &SaliencyParams) -> Result<SaliencyMap> {
    let lab = rgb_to_lab(image)?;
    let [avg_l, avg_a, avg_b] = lab.channel_means();

    let sl = smooth(&lab.l, &params.kernel)?;
    let sa = smooth(&lab.a, &params.kernel)?;
    let sb = smooth(&lab.b, &params.kernel)?;

    let mut map = SaliencyMap::new(image.w, image.h);
    for (i, out) in map.data.iter_mut().enumerate() {
        let dl = sl.data[i] - avg_l;
        let da = sa.data[i] - avg_a;
        let db = sb.data[i] - avg_b;
        *out = dl * dl + da * da + params.b_weight * db * db;
    }
    debug!(
        "compute_saliency_map {}x{} mean_lab=[{avg_l:.3}, {avg_a:.3}, {avg_b:.3}] normalize={}",
        image.w, image.h, params.normalize
    );

    if params.normalize {
        map = normalize(&map, params.norm_range);
    }
    Ok(map)
}

/// Render a `[0, 255]` map as a gray packed-RGB image, rounding half up.
pub fn map_to_gray(map: &SaliencyMap) -> RgbImage {
    RgbImage {
        w: map.w,
        h: map.h,
        data: map
            .data
            .iter()
            .map(|&v| {
                let g = (v + 0.5).clamp(0.0, 255.0) as u8;
                pack_rgb(g, g, g)
            })
            .collect(),
    }
}

/// Gray rendering of any saliency map, raw or normalized to another range.
/// The map is stretched to `[0, 255]` first, so raw squared distances do not
/// saturate.
pub fn render_saliency(map: &SaliencyMap) -> RgbImage {
    map_to_gray(&normalize(map, DEFAULT_NORM_RANGE))
}
