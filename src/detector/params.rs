//! Parameter types configuring the detector stages.
//!
//! The whole pipeline is driven by one immutable [`DetectorParams`] value.
//! Every field has a default matching the classic setup: `[1, 2, 1]`
//! smoothing, b-channel weight 0.001, selection at twice the image average,
//! boxes kept between 0.5% and 50% of the image area.

use crate::salient::{ContourParams, ExtractionParams};
use crate::saliency::SaliencyParams;
use crate::segmentation::SegmentationParams;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    pub saliency: SaliencyParams,
    /// Forwarded unchanged to the segmentation engine.
    pub segmentation: SegmentationParams,
    pub extraction: ExtractionParams,
    /// Used when rendering the segmented image.
    pub contours: ContourParams,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::Kernel;
    use crate::salient::LabelRange;

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{
            "saliency": { "kernel": [1, 4, 6, 4, 1] },
            "extraction": { "label_range": "skip_last" }
        }"#;
        let params: DetectorParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.saliency.kernel, Kernel::binomial5());
        assert!(params.saliency.normalize);
        assert_eq!(params.saliency.b_weight, 0.001);
        assert_eq!(params.extraction.label_range, LabelRange::SkipLast);
        assert_eq!(params.extraction.selection_multiplier, 2.0);
        assert_eq!(params.segmentation, SegmentationParams::default());
        assert_eq!(params.contours.threshold, 2);
    }

    #[test]
    fn invalid_kernel_is_a_parse_error() {
        let json = r#"{ "saliency": { "kernel": [1, 2] } }"#;
        assert!(serde_json::from_str::<DetectorParams>(json).is_err());
    }
}
