use super::cancel::CancelToken;
use super::params::DetectorParams;
use crate::diagnostics::{
    elapsed_ms, BoxReport, DetectionReport, InputDescriptor, SaliencyStage, SelectionStage,
    TimingBreakdown,
};
use crate::error::{Result, SaliencyError};
use crate::image::RgbImage;
use crate::saliency::{compute_saliency_map, SaliencyMap};
use crate::salient::{
    contour_mask, draw_boxes, extract_salient_object, paint_mask, SalientObject,
};
use crate::segmentation::{SegmentLabeling, Segmenter};
use log::debug;
use std::time::Instant;

/// Stateless salient region detector: saliency map, segmentation,
/// segment selection, compositing and box extraction for one image.
#[derive(Clone, Debug, Default)]
pub struct SalientRegionDetector {
    params: DetectorParams,
}

/// Everything produced for one image.
#[derive(Clone, Debug)]
pub struct Detection {
    pub saliency_map: SaliencyMap,
    pub labeling: SegmentLabeling,
    pub object: SalientObject,
    pub report: DetectionReport,
}

impl SalientRegionDetector {
    pub fn new(params: DetectorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    /// Compute only the saliency map.
    pub fn saliency_map(&self, image: &RgbImage) -> Result<SaliencyMap> {
        compute_saliency_map(image, &self.params.saliency)
    }

    /// Run the full pipeline on `image`, segmenting it with `segmenter`.
    pub fn process<S: Segmenter + ?Sized>(
        &self,
        image: &RgbImage,
        segmenter: &S,
        cancel: Option<&CancelToken>,
    ) -> Result<Detection> {
        image.validate()?;
        debug!("SalientRegionDetector::process start w={} h={}", image.w, image.h);
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let saliency_map = timings.measure("saliency", || self.saliency_map(image))?;

        CancelToken::check(cancel)?;
        let labeling = timings.measure("segmentation", || {
            segmenter.segment(image, &self.params.segmentation)
        })?;
        if labeling.w != image.w || labeling.h != image.h {
            return Err(SaliencyError::InvalidDimensions {
                expected: image.w * image.h,
                actual: labeling.w * labeling.h,
            });
        }
        debug!(
            "SalientRegionDetector::process segmentation numlabels={}",
            labeling.numlabels
        );

        CancelToken::check(cancel)?;
        let object = timings.measure("extraction", || {
            extract_salient_object(image, &saliency_map, &labeling, &self.params.extraction)
        })?;

        timings.total_ms = elapsed_ms(total_start);
        let report = self.build_report(image, &saliency_map, &object, timings);
        debug!(
            "SalientRegionDetector::process done selected={:?} boxes={} total_ms={:.3}",
            report.selection.selected_labels,
            report.boxes.len(),
            report.timings.total_ms
        );

        Ok(Detection {
            saliency_map,
            labeling,
            object,
            report,
        })
    }

    fn build_report(
        &self,
        image: &RgbImage,
        map: &SaliencyMap,
        object: &SalientObject,
        timings: TimingBreakdown,
    ) -> DetectionReport {
        let (min, max) = map.min_max().unwrap_or((0.0, 0.0));
        DetectionReport {
            input: InputDescriptor {
                width: image.w,
                height: image.h,
            },
            saliency: SaliencyStage {
                normalized: self.params.saliency.normalize,
                min,
                max,
                mean: map.mean(),
            },
            selection: SelectionStage::from_object(object, self.params.extraction.selection_multiplier),
            boxes: object
                .boxes
                .iter()
                .filter_map(|&(label, bbox)| bbox.map(|bbox| BoxReport { label, bbox }))
                .collect(),
            timings,
        }
    }
}

impl Detection {
    /// Segments painted with their mean color, with contour lines on top.
    /// Boundaries come from the labels, so neighbors of equal mean color
    /// stay separated.
    pub fn segmented_image(&self, image: &RgbImage, params: &DetectorParams) -> Result<RgbImage> {
        let mut out = self.labeling.mean_color_image(image)?;
        let mask = contour_mask(&self.labeling.as_label_image(), params.contours.threshold)?;
        paint_mask(&mut out, &mask, params.contours.color)?;
        Ok(out)
    }

    /// Input image with the surviving boxes outlined in `color`.
    pub fn box_overlay(&self, image: &RgbImage, color: u32) -> Result<RgbImage> {
        draw_boxes(image, self.report.boxes.iter().map(|b| &b.bbox), color)
    }
}
