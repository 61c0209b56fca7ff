//! Boundary to the region segmentation engine.
//!
//! The saliency pipeline never looks inside the engine; it only relies on the
//! [`SegmentLabeling`] contract: one label per pixel, every label within
//! `[0, numlabels)`. Any [`Segmenter`] may be plugged in. The bundled
//! [`RegionGrowSegmenter`] is a small color-tolerance region grower good
//! enough to drive the tools; it is not a mean-shift implementation.

pub mod labeling;
mod region_accumulator;
pub mod region_grow;

pub use labeling::SegmentLabeling;
pub use region_grow::RegionGrowSegmenter;

use crate::error::Result;
use crate::image::RgbImage;
use serde::{Deserialize, Serialize};

/// Opaque tuning knobs forwarded unchanged to the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationParams {
    /// Spatial bandwidth.
    pub sigma_s: u32,
    /// Color (range) bandwidth.
    pub sigma_r: f32,
    /// Regions smaller than this many pixels get merged into a neighbor.
    pub min_region: usize,
}

impl Default for SegmentationParams {
    fn default() -> Self {
        Self {
            sigma_s: 7,
            sigma_r: 10.0,
            min_region: 20,
        }
    }
}

/// A segmentation engine: a synchronous, possibly slow call that labels
/// every pixel of the image.
pub trait Segmenter {
    fn segment(&self, image: &RgbImage, params: &SegmentationParams) -> Result<SegmentLabeling>;
}

impl<F> Segmenter for F
where
    F: Fn(&RgbImage, &SegmentationParams) -> Result<SegmentLabeling>,
{
    fn segment(&self, image: &RgbImage, params: &SegmentationParams) -> Result<SegmentLabeling> {
        self(image, params)
    }
}
