//! Salient object extraction from a saliency map and a segmentation.
//!
//! Modules
//! - [`aggregate`] – per-segment mean saliency and segment selection.
//! - [`compositor`] – masked output image.
//! - [`bounds`] – per-cluster masks and filtered bounding boxes.
//! - [`contours`] – boundary marking for segmented images.
//! - [`overlay`] – box outlines drawn over the input image.

pub mod aggregate;
pub mod bounds;
pub mod compositor;
pub mod contours;
pub mod overlay;

pub use aggregate::{select_salient_segments, segment_stats, Aggregation, SegmentStats};
pub use bounds::{
    cluster_bounds, cluster_masks, labeling_bounds, mask_bounds, BoundingBox, BoxFilter,
    ClusterMask, LabelRange,
};
pub use compositor::composite;
pub use contours::{contour_mask, draw_contours, paint_mask, ContourParams};
pub use overlay::{draw_boxes, BOX_COLOR};

use crate::error::Result;
use crate::image::RgbImage;
use crate::saliency::SaliencyMap;
use crate::segmentation::SegmentLabeling;
use serde::{Deserialize, Serialize};

/// Pixels retained in the salient object output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionMask {
    pub w: usize,
    pub h: usize,
    pub selected: Vec<bool>,
}

impl SelectionMask {
    pub fn count(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }
}

/// Knobs of the selection, compositing and box stages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionParams {
    /// A segment is selected when its mean exceeds this multiple of the
    /// image average saliency.
    pub selection_multiplier: f64,
    pub box_filter: BoxFilter,
    pub label_range: LabelRange,
    /// Packed color of pixels outside the selection.
    pub background: u32,
}

impl Default for ExtractionParams {
    fn default() -> Self {
        Self {
            selection_multiplier: 2.0,
            box_filter: BoxFilter::default(),
            label_range: LabelRange::All,
            background: 0x000000,
        }
    }
}

/// Masked image plus candidate boxes.
#[derive(Clone, Debug)]
pub struct SalientObject {
    pub masked: RgbImage,
    /// `(label, box)` for every label in the configured range; `None` when
    /// the cluster was filtered out.
    pub boxes: Vec<(u32, Option<BoundingBox>)>,
    pub aggregation: Aggregation,
}

/// Select the salient segments of `image` and build the masked image and boxes.
pub fn extract_salient_object(
    image: &RgbImage,
    map: &SaliencyMap,
    labeling: &SegmentLabeling,
    params: &ExtractionParams,
) -> Result<SalientObject> {
    let aggregation = select_salient_segments(map, labeling, params.selection_multiplier)?;
    let masked = composite(image, &aggregation.mask, params.background)?;
    let boxes = labeling_bounds(labeling, params.label_range, &params.box_filter)?;
    Ok(SalientObject {
        masked,
        boxes,
        aggregation,
    })
}
