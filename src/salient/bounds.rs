//! Bounding boxes around segment clusters.
//!
//! Boxes are only reported for clusters that are neither tiny nor dominant:
//! the pixel count must lie strictly between `min_fraction` and
//! `max_fraction` of the image area. Which labels are examined is decided by
//! the caller through [`LabelRange`].
use crate::error::{check_len, Result};
use crate::segmentation::SegmentLabeling;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Binary membership mask of one segment: 255 inside, 0 outside.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterMask {
    pub label: u32,
    pub w: usize,
    pub h: usize,
    pub data: Vec<u8>,
}

impl ClusterMask {
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}

/// Inclusive pixel bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub x_min: usize,
    pub y_min: usize,
    pub x_max: usize,
    pub y_max: usize,
}

impl BoundingBox {
    fn point(x: usize, y: usize) -> Self {
        Self {
            x_min: x,
            y_min: y,
            x_max: x,
            y_max: y,
        }
    }

    fn expand_to_contain(&mut self, x: usize, y: usize) {
        self.x_min = self.x_min.min(x);
        self.y_min = self.y_min.min(y);
        self.x_max = self.x_max.max(x);
        self.y_max = self.y_max.max(y);
    }

    pub fn width(&self) -> usize {
        self.x_max - self.x_min + 1
    }

    pub fn height(&self) -> usize {
        self.y_max - self.y_min + 1
    }
}

/// Which labels get a box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelRange {
    /// Every label `0..numlabels`.
    #[default]
    All,
    /// `0..numlabels - 1`, leaving out the highest label.
    SkipLast,
}

impl LabelRange {
    pub fn labels(self, numlabels: usize) -> Range<usize> {
        match self {
            LabelRange::All => 0..numlabels,
            LabelRange::SkipLast => 0..numlabels.saturating_sub(1),
        }
    }
}

/// Area window a cluster must fall in (exclusive on both ends).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxFilter {
    pub min_fraction: f64,
    pub max_fraction: f64,
}

impl Default for BoxFilter {
    fn default() -> Self {
        Self {
            min_fraction: 0.005,
            max_fraction: 0.5,
        }
    }
}

impl BoxFilter {
    pub fn accepts(&self, count: usize, area: usize) -> bool {
        let count = count as f64;
        let area = area as f64;
        count > self.min_fraction * area && count < self.max_fraction * area
    }
}

/// One mask per label, `numlabels` masks of `w * h` bytes each.
pub fn cluster_masks(labeling: &SegmentLabeling) -> Result<Vec<ClusterMask>> {
    labeling.validate()?;
    let mut masks: Vec<ClusterMask> = (0..labeling.numlabels)
        .map(|label| ClusterMask {
            label: label as u32,
            w: labeling.w,
            h: labeling.h,
            data: vec![0u8; labeling.labels.len()],
        })
        .collect();
    for (i, &l) in labeling.labels.iter().enumerate() {
        masks[l as usize].data[i] = 255;
    }
    Ok(masks)
}

/// Tight box around the nonzero pixels of `mask`, if it passes `filter`.
pub fn mask_bounds(mask: &ClusterMask, filter: &BoxFilter) -> Result<Option<BoundingBox>> {
    check_len(mask.w, mask.h, mask.data.len())?;
    let mut bbox: Option<BoundingBox> = None;
    let mut count = 0usize;
    for (i, _) in mask.data.iter().enumerate().filter(|&(_, &v)| v != 0) {
        let (x, y) = (i % mask.w, i / mask.w);
        count += 1;
        match bbox.as_mut() {
            Some(b) => b.expand_to_contain(x, y),
            None => bbox = Some(BoundingBox::point(x, y)),
        }
    }
    Ok(bbox.filter(|_| filter.accepts(count, mask.data.len())))
}

/// Filtered boxes for the masks whose label lies in `range`.
pub fn cluster_bounds(
    masks: &[ClusterMask],
    range: LabelRange,
    filter: &BoxFilter,
) -> Result<Vec<(u32, Option<BoundingBox>)>> {
    masks[range.labels(masks.len())]
        .iter()
        .map(|m| Ok((m.label, mask_bounds(m, filter)?)))
        .collect()
}

/// Same result as building every [`ClusterMask`] and calling
/// [`cluster_bounds`], in a single pass over the labels.
pub fn labeling_bounds(
    labeling: &SegmentLabeling,
    range: LabelRange,
    filter: &BoxFilter,
) -> Result<Vec<(u32, Option<BoundingBox>)>> {
    labeling.validate()?;
    let mut boxes: Vec<Option<BoundingBox>> = vec![None; labeling.numlabels];
    let mut counts = vec![0usize; labeling.numlabels];
    for (i, &l) in labeling.labels.iter().enumerate() {
        let (x, y) = (i % labeling.w, i / labeling.w);
        counts[l as usize] += 1;
        match boxes[l as usize].as_mut() {
            Some(b) => b.expand_to_contain(x, y),
            None => boxes[l as usize] = Some(BoundingBox::point(x, y)),
        }
    }
    let area = labeling.labels.len();
    Ok(range
        .labels(labeling.numlabels)
        .map(|l| {
            let bbox = boxes[l].filter(|_| filter.accepts(counts[l], area));
            (l as u32, bbox)
        })
        .collect())
}
