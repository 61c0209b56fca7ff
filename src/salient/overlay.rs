use super::bounds::BoundingBox;
use crate::error::Result;
use crate::image::RgbImage;

/// Default outline color, green.
pub const BOX_COLOR: u32 = 0x00FF00;

/// Copy of `image` with a 1-pixel outline drawn around every box.
pub fn draw_boxes<'a, I>(image: &RgbImage, boxes: I, color: u32) -> Result<RgbImage>
where
    I: IntoIterator<Item = &'a BoundingBox>,
{
    image.validate()?;
    let mut out = image.clone();
    if out.w == 0 || out.h == 0 {
        return Ok(out);
    }
    for b in boxes {
        let x1 = b.x_max.min(out.w - 1);
        let y1 = b.y_max.min(out.h - 1);
        if b.x_min > x1 || b.y_min > y1 {
            continue;
        }
        for x in b.x_min..=x1 {
            out.set(x, b.y_min, color);
            out.set(x, y1, color);
        }
        for y in b.y_min..=y1 {
            out.set(b.x_min, y, color);
            out.set(x1, y, color);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_only_touches_the_frame() {
        let img = RgbImage::filled(6, 5, 0);
        let b = BoundingBox {
            x_min: 1,
            y_min: 1,
            x_max: 4,
            y_max: 3,
        };
        let out = draw_boxes(&img, [&b], BOX_COLOR).unwrap();
        assert_eq!(out.get(1, 1), BOX_COLOR);
        assert_eq!(out.get(4, 3), BOX_COLOR);
        assert_eq!(out.get(2, 3), BOX_COLOR);
        assert_eq!(out.get(2, 2), 0, "interior must stay untouched");
        assert_eq!(out.get(0, 0), 0);
        let painted = out.data.iter().filter(|&&v| v == BOX_COLOR).count();
        assert_eq!(painted, 10);
    }
}
