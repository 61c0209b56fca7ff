//! Diagnostics data model returned alongside detection results.
//!
//! `DetectionReport` summarizes one run: saliency statistics, which segments
//! were selected and why, the surviving bounding boxes and per-stage timing.

pub mod report;
pub mod timing;

pub use report::{BoxReport, DetectionReport, InputDescriptor, SaliencyStage, SelectionStage};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
