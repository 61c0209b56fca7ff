use super::SelectionMask;
use crate::error::{check_len, Result};
use crate::image::RgbImage;

/// Keep the selected pixels of `image` and paint the rest with `background`.
pub fn composite(image: &RgbImage, mask: &SelectionMask, background: u32) -> Result<RgbImage> {
    image.validate()?;
    check_len(image.w, image.h, mask.selected.len())?;
    let data = image
        .data
        .iter()
        .zip(&mask.selected)
        .map(|(&px, &keep)| if keep { px } else { background })
        .collect();
    Ok(RgbImage {
        w: image.w,
        h: image.h,
        data,
    })
}
