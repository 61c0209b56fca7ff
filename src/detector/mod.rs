//! Salient region detector orchestrating the per-image pipeline.
//!
//! Overview
//! - Converts the input to Lab, smooths each channel and measures the
//!   distance to the mean color to build the saliency map.
//! - Hands the image to a pluggable [`Segmenter`](crate::segmentation::Segmenter)
//!   and aggregates saliency per segment, excluding segments that touch the
//!   image frame.
//! - Selects segments well above the image average (falling back to the best
//!   one), masks the image to those segments and computes filtered boxes.
//!
//! Modules
//! - [`params`] – configuration types used by the detector and CLI.
//! - `pipeline` – the [`SalientRegionDetector`] implementation.
//! - `batch` – parallel processing of independent images.
//! - `cancel` – cooperative cancellation.

mod batch;
mod cancel;
pub mod params;
mod pipeline;

pub use batch::process_batch;
pub use cancel::CancelToken;
pub use params::DetectorParams;
pub use pipeline::{Detection, SalientRegionDetector};
