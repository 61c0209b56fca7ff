use salient_region::RgbImage;

/// Axis-aligned rectangle, `x0..x1` by `y0..y1` (exclusive ends).
#[derive(Clone, Copy, Debug)]
pub struct Rect {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Rect {
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    pub fn area(&self) -> usize {
        (self.x1 - self.x0) * (self.y1 - self.y0)
    }
}

/// Uniform `background` image with a solid `fg` rectangle painted on top.
pub fn square_on_background(
    width: usize,
    height: usize,
    rect: Rect,
    background: u32,
    fg: u32,
) -> RgbImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(rect.x1 <= width && rect.y1 <= height, "rect must fit the image");

    let mut img = RgbImage::filled(width, height, background);
    for y in rect.y0..rect.y1 {
        for x in rect.x0..rect.x1 {
            img.set(x, y, fg);
        }
    }
    img
}

/// Row-major label buffer: 1 inside `rect`, 0 elsewhere.
pub fn rect_labels(width: usize, height: usize, rect: Rect) -> Vec<u32> {
    let mut labels = vec![0u32; width * height];
    for y in 0..height {
        for x in 0..width {
            if rect.contains(x, y) {
                labels[y * width + x] = 1;
            }
        }
    }
    labels
}
