use crate::diagnostics::TimingBreakdown;
use crate::salient::{BoundingBox, SalientObject};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

/// Saliency map summary.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaliencyStage {
    pub normalized: bool,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Segment selection summary.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionStage {
    pub numlabels: usize,
    pub border_segments: usize,
    pub image_average_saliency: f64,
    pub threshold: f64,
    pub selected_labels: Vec<u32>,
    pub selected_pixels: usize,
    pub used_fallback: bool,
}

impl SelectionStage {
    pub fn from_object(object: &SalientObject, multiplier: f64) -> Self {
        let agg = &object.aggregation;
        Self {
            numlabels: agg.stats.len(),
            border_segments: agg.stats.iter().filter(|s| s.touches_border).count(),
            image_average_saliency: agg.image_average,
            threshold: multiplier * agg.image_average,
            selected_labels: agg.selected_labels.clone(),
            selected_pixels: agg.mask.count(),
            used_fallback: agg.used_fallback,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxReport {
    pub label: u32,
    pub bbox: BoundingBox,
}

/// Per-image report returned by the detector.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub input: InputDescriptor,
    pub saliency: SaliencyStage,
    pub selection: SelectionStage,
    /// Boxes that survived the area filter.
    pub boxes: Vec<BoxReport>,
    pub timings: TimingBreakdown,
}
