use crate::error::{check_len, Result, SaliencyError};
use crate::image::{pack_rgb, unpack_rgb, RgbImage};

/// Per-pixel segment labels as produced by a [`super::Segmenter`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentLabeling {
    pub w: usize,
    pub h: usize,
    /// Row-major label per pixel, each in `[0, numlabels)`.
    pub labels: Vec<u32>,
    pub numlabels: usize,
}

impl SegmentLabeling {
    /// Wrap raw engine output, checking length and label range.
    pub fn new(w: usize, h: usize, labels: Vec<u32>, numlabels: usize) -> Result<Self> {
        let labeling = Self {
            w,
            h,
            labels,
            numlabels,
        };
        labeling.validate()?;
        Ok(labeling)
    }

    /// Build a labeling from arbitrary ids, renumbering them to `0..n` in
    /// order of first appearance (row-major).
    pub fn from_raw_ids(w: usize, h: usize, ids: &[usize]) -> Result<Self> {
        check_len(w, h, ids.len())?;
        let mut remap = std::collections::HashMap::new();
        let labels = ids
            .iter()
            .map(|id| {
                let next = remap.len() as u32;
                *remap.entry(*id).or_insert(next)
            })
            .collect();
        Ok(Self {
            w,
            h,
            labels,
            numlabels: remap.len(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        check_len(self.w, self.h, self.labels.len())?;
        if let Some(&label) = self
            .labels
            .iter()
            .find(|&&l| l as usize >= self.numlabels)
        {
            return Err(SaliencyError::LabelOutOfRange {
                label,
                numlabels: self.numlabels,
            });
        }
        Ok(())
    }

    /// Paint every segment with its mean color, the usual way of showing a
    /// segmentation result.
    pub fn mean_color_image(&self, image: &RgbImage) -> Result<RgbImage> {
        self.validate()?;
        check_len(self.w, self.h, image.data.len())?;
        let mut sums = vec![[0u64; 3]; self.numlabels];
        let mut counts = vec![0u64; self.numlabels];
        for (&l, &px) in self.labels.iter().zip(&image.data) {
            let [r, g, b] = unpack_rgb(px);
            let s = &mut sums[l as usize];
            s[0] += r as u64;
            s[1] += g as u64;
            s[2] += b as u64;
            counts[l as usize] += 1;
        }
        let colors: Vec<u32> = sums
            .iter()
            .zip(&counts)
            .map(|(s, &n)| {
                let n = n.max(1);
                let avg = |v: u64| ((v + n / 2) / n) as u8;
                pack_rgb(avg(s[0]), avg(s[1]), avg(s[2]))
            })
            .collect();
        Ok(RgbImage {
            w: self.w,
            h: self.h,
            data: self.labels.iter().map(|&l| colors[l as usize]).collect(),
        })
    }

    /// Labels rendered as a packed image, one distinct value per segment.
    pub fn as_label_image(&self) -> RgbImage {
        RgbImage {
            w: self.w,
            h: self.h,
            data: self.labels.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_range_and_length() {
        assert!(SegmentLabeling::new(2, 2, vec![0, 1, 1, 0], 2).is_ok());
        assert_eq!(
            SegmentLabeling::new(2, 2, vec![0, 1, 2, 0], 2).unwrap_err(),
            SaliencyError::LabelOutOfRange {
                label: 2,
                numlabels: 2
            }
        );
        assert!(matches!(
            SegmentLabeling::new(2, 2, vec![0, 1, 1], 2),
            Err(SaliencyError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn raw_ids_are_renumbered_by_first_appearance() {
        let lab = SegmentLabeling::from_raw_ids(3, 1, &[17, 4, 17]).unwrap();
        assert_eq!(lab.labels, vec![0, 1, 0]);
        assert_eq!(lab.numlabels, 2);
    }

    #[test]
    fn label_image_carries_raw_labels() {
        let lab = SegmentLabeling::new(2, 2, vec![0, 1, 1, 2], 3).unwrap();
        let img = lab.as_label_image();
        assert_eq!((img.w, img.h), (2, 2));
        assert_eq!(img.data, vec![0, 1, 1, 2]);
    }

    #[test]
    fn mean_color_rounds_per_segment() {
        let img = RgbImage::new(3, 1, vec![0x000000, 0x0A0A0A, 0xFF0000]).unwrap();
        let lab = SegmentLabeling::new(3, 1, vec![0, 0, 1], 2).unwrap();
        let out = lab.mean_color_image(&img).unwrap();
        assert_eq!(out.data, vec![0x050505, 0x050505, 0xFF0000]);
    }
}
