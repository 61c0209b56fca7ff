//! Independent images share no mutable state, so a batch is an embarrassingly
//! parallel map. With the `parallel` feature the map runs on the rayon pool.
use super::cancel::CancelToken;
use super::pipeline::{Detection, SalientRegionDetector};
use crate::error::Result;
use crate::image::RgbImage;
use crate::segmentation::Segmenter;

/// Process every image, returning one result per input in input order.
pub fn process_batch<S: Segmenter + Sync + ?Sized>(
    detector: &SalientRegionDetector,
    images: &[RgbImage],
    segmenter: &S,
    cancel: Option<&CancelToken>,
) -> Vec<Result<Detection>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        images
            .par_iter()
            .map(|img| detector.process(img, segmenter, cancel))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        images
            .iter()
            .map(|img| detector.process(img, segmenter, cancel))
            .collect()
    }
}
