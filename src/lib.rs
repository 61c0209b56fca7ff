#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;

// Stage modules, usable on their own.
pub mod color;
pub mod config;
pub mod filters;
pub mod saliency;
pub mod salient;
pub mod segmentation;

// --- High-level re-exports -------------------------------------------------

pub use crate::detector::{process_batch, CancelToken, Detection, DetectorParams, SalientRegionDetector};
pub use crate::error::{Result, SaliencyError};
pub use crate::image::RgbImage;

pub use crate::diagnostics::DetectionReport;

// Two entry points of the library.
pub use crate::saliency::{compute_saliency_map, SaliencyMap, SaliencyParams};
pub use crate::salient::{extract_salient_object, SalientObject};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use salient_region::prelude::*;
///
/// # fn main() -> salient_region::Result<()> {
/// let (w, h) = (64usize, 48usize);
/// let img = RgbImage::new(w, h, vec![0x202020; w * h])?;
///
/// let detector = SalientRegionDetector::new(DetectorParams::default());
/// let detection = detector.process(&img, &RegionGrowSegmenter, None)?;
/// println!(
///     "selected={:?} total_ms={:.3}",
///     detection.report.selection.selected_labels, detection.report.timings.total_ms
/// );
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::RgbImage;
    pub use crate::segmentation::{RegionGrowSegmenter, SegmentLabeling, Segmenter};
    pub use crate::{DetectorParams, SalientRegionDetector};
}
