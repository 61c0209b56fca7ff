//! Frequency-tuned saliency.
//!
//! The map measures, per pixel, how far the locally smoothed Lab color lies
//! from the image-wide mean Lab color. Smoothing removes fine texture and
//! noise; comparing against the global mean suppresses large uniform regions.
//!
//! Modules
//! - [`map`] – Lab conversion, smoothing and the per-pixel distance.
//! - [`normalize`] – linear min/max stretch to `[0, range]`.

pub mod map;
pub mod normalize;

pub use map::{compute_saliency_map, map_to_gray, render_saliency, SaliencyParams};
pub use normalize::{normalize, DEFAULT_NORM_RANGE};

/// Per-pixel saliency, index-aligned with the input image.
pub type SaliencyMap = crate::image::ImageF64;
