//! Color space conversion from packed sRGB to CIELAB.

pub mod lab;

pub use lab::{rgb_to_lab, srgb_pixel_to_lab, LabImage};
