//! I/O helpers for packed RGB images, saliency maps and JSON.
//!
//! - `load_rgb_image`: read a PNG/JPEG/BMP into a packed [`RgbImage`].
//! - `save_rgb_image`: write a packed buffer to disk (format from extension).
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{pack_rgb, unpack_rgb, ImageView, RgbImage};
use image::{Rgb, RgbImage as RgbBuffer};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and pack it as `0xRRGGBB` pixels.
pub fn load_rgb_image(path: &Path) -> Result<RgbImage, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let w = img.width() as usize;
    let h = img.height() as usize;
    let data = img
        .pixels()
        .map(|Rgb([r, g, b])| pack_rgb(*r, *g, *b))
        .collect();
    RgbImage::new(w, h, data).map_err(|e| format!("Failed to load {}: {e}", path.display()))
}

/// Save a packed RGB buffer; the format follows the file extension.
pub fn save_rgb_image(image: &RgbImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = RgbBuffer::new(image.w as u32, image.h as u32);
    for (y, row) in image.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            out.put_pixel(x as u32, y as u32, Rgb(unpack_rgb(px)));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
