//! Color-tolerance region growing with small-region merging.
//!
//! 1. The image is converted to Lab and pre-smoothed with `sigma_s` passes of
//!    the `[1, 2, 1]` kernel.
//! 2. Unlabeled pixels seed regions in row-major order; a 4-connected
//!    neighbor joins when its Lab distance to the running region mean is at
//!    most `sigma_r`.
//! 3. Regions below `min_region` pixels are merged into the adjacent region
//!    with the closest mean color until none remain (or only one region is
//!    left).
//! 4. Labels are renumbered to `0..n` in order of first appearance.
use super::region_accumulator::RegionAccumulator;
use super::{SegmentLabeling, Segmenter, SegmentationParams};
use crate::color::{rgb_to_lab, LabImage};
use crate::error::Result;
use crate::filters::{smooth, Kernel};
use crate::image::RgbImage;
use log::debug;

const NEIGH_OFFSETS: [(isize, isize); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];
const UNLABELED: usize = usize::MAX;

#[derive(Clone, Copy, Debug, Default)]
pub struct RegionGrowSegmenter;

impl Segmenter for RegionGrowSegmenter {
    fn segment(&self, image: &RgbImage, params: &SegmentationParams) -> Result<SegmentLabeling> {
        let mut lab = rgb_to_lab(image)?;
        let kernel = Kernel::binomial3();
        for _ in 0..params.sigma_s {
            lab = LabImage {
                l: smooth(&lab.l, &kernel)?,
                a: smooth(&lab.a, &kernel)?,
                b: smooth(&lab.b, &kernel)?,
            };
        }

        let mut grower = RegionGrower::new(&lab, params.sigma_r as f64);
        let (raw, regions) = grower.grow();
        let grown = regions.len();
        let merged = merge_small_regions(&raw, regions, image.w, params.min_region);
        let labeling = SegmentLabeling::from_raw_ids(image.w, image.h, &merged)?;
        debug!(
            "RegionGrowSegmenter {}x{} grown={} after_merge={}",
            image.w, image.h, grown, labeling.numlabels
        );
        Ok(labeling)
    }
}

/// Per-region color sum and size.
#[derive(Clone, Copy, Debug)]
struct RegionStats {
    sum_lab: [f64; 3],
    size: usize,
}

impl RegionStats {
    fn mean(&self) -> [f64; 3] {
        let n = self.size.max(1) as f64;
        self.sum_lab.map(|s| s / n)
    }
}

struct RegionGrower<'a> {
    lab: &'a LabImage,
    width: usize,
    height: usize,
    tol_sq: f64,
    labels: Vec<usize>,
    stack: Vec<usize>,
    region: RegionAccumulator,
}

impl<'a> RegionGrower<'a> {
    fn new(lab: &'a LabImage, tolerance: f64) -> Self {
        let n = lab.width() * lab.height();
        Self {
            lab,
            width: lab.width(),
            height: lab.height(),
            tol_sq: tolerance * tolerance,
            labels: vec![UNLABELED; n],
            stack: Vec::with_capacity(64),
            region: RegionAccumulator::with_capacity(256),
        }
    }

    fn lab_at(&self, idx: usize) -> [f64; 3] {
        [self.lab.l.data[idx], self.lab.a.data[idx], self.lab.b.data[idx]]
    }

    fn grow(&mut self) -> (Vec<usize>, Vec<RegionStats>) {
        let mut regions = Vec::new();
        for seed in 0..self.labels.len() {
            if self.labels[seed] != UNLABELED {
                continue;
            }
            let id = regions.len();
            self.region.reset();
            self.stack.clear();
            self.labels[seed] = id;
            self.stack.push(seed);
            self.grow_region(id);
            self.region.mark_as(&mut self.labels, id);
            regions.push(RegionStats {
                sum_lab: self.region.sum_lab,
                size: self.region.len(),
            });
        }
        (std::mem::take(&mut self.labels), regions)
    }

    fn grow_region(&mut self, id: usize) {
        while let Some(idx) = self.stack.pop() {
            self.region.push(idx, self.lab_at(idx));
            let mean = self.region.mean();
            let x = idx % self.width;
            let y = idx / self.width;
            for (dx, dy) in NEIGH_OFFSETS {
                let xn = x as isize + dx;
                let yn = y as isize + dy;
                if xn < 0 || yn < 0 || xn >= self.width as isize || yn >= self.height as isize {
                    continue;
                }
                let neighbor_idx = yn as usize * self.width + xn as usize;
                if self.labels[neighbor_idx] != UNLABELED {
                    continue;
                }
                if dist_sq(self.lab_at(neighbor_idx), mean) <= self.tol_sq {
                    self.labels[neighbor_idx] = id;
                    self.stack.push(neighbor_idx);
                }
            }
        }
    }
}

#[inline]
fn dist_sq(a: [f64; 3], b: [f64; 3]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

/// Merge regions below `min_region` pixels into their closest-colored
/// neighbor. Returns the root region id of every pixel.
fn merge_small_regions(
    labels: &[usize],
    mut regions: Vec<RegionStats>,
    width: usize,
    min_region: usize,
) -> Vec<usize> {
    let mut parent: Vec<usize> = (0..regions.len()).collect();
    loop {
        // Closest neighbor (root id, distance) for every undersized root.
        let mut best: Vec<Option<(usize, f64)>> = vec![None; regions.len()];
        for idx in 0..labels.len() {
            let x = idx % width;
            let right = (x + 1 < width).then_some(idx + 1);
            let down = (idx + width < labels.len()).then_some(idx + width);
            for n in [right, down].into_iter().flatten() {
                let ra = find(&mut parent, labels[idx]);
                let rb = find(&mut parent, labels[n]);
                if ra == rb {
                    continue;
                }
                let d = dist_sq(regions[ra].mean(), regions[rb].mean());
                for (small, other) in [(ra, rb), (rb, ra)] {
                    if regions[small].size >= min_region {
                        continue;
                    }
                    let better = match best[small] {
                        Some((cur, cur_d)) => d < cur_d || (d == cur_d && other < cur),
                        None => true,
                    };
                    if better {
                        best[small] = Some((other, d));
                    }
                }
            }
        }

        let mut merged_any = false;
        for small in 0..best.len() {
            let Some((other, _)) = best[small] else {
                continue;
            };
            let ra = find(&mut parent, small);
            let rb = find(&mut parent, other);
            if ra == rb || regions[ra].size >= min_region {
                continue;
            }
            parent[ra] = rb;
            let absorbed = regions[ra];
            let target = &mut regions[rb];
            target.size += absorbed.size;
            for (s, v) in target.sum_lab.iter_mut().zip(absorbed.sum_lab) {
                *s += v;
            }
            merged_any = true;
        }
        if !merged_any {
            break;
        }
    }
    labels.iter().map(|&l| find(&mut parent, l)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_halves(w: usize, h: usize, left: u32, right: u32) -> RgbImage {
        let mut img = RgbImage::filled(w, h, left);
        for y in 0..h {
            for x in w / 2..w {
                img.set(x, y, right);
            }
        }
        img
    }

    #[test]
    fn uniform_image_is_one_segment() {
        let img = RgbImage::filled(10, 8, 0x336699);
        let lab = RegionGrowSegmenter
            .segment(&img, &SegmentationParams::default())
            .unwrap();
        assert_eq!(lab.numlabels, 1);
        assert!(lab.labels.iter().all(|&l| l == 0));
    }

    #[test]
    fn two_color_halves_split() {
        let img = two_halves(12, 6, 0x000000, 0xFFFFFF);
        let params = SegmentationParams {
            sigma_s: 0,
            ..Default::default()
        };
        let lab = RegionGrowSegmenter.segment(&img, &params).unwrap();
        assert_eq!(lab.numlabels, 2);
        assert_eq!(lab.labels[0], 0);
        assert_eq!(lab.labels[11], 1);
        lab.validate().unwrap();
    }

    #[test]
    fn tiny_regions_are_merged() {
        let mut img = RgbImage::filled(10, 10, 0x000000);
        img.set(5, 5, 0xFFFFFF);
        let params = SegmentationParams {
            sigma_s: 0,
            sigma_r: 5.0,
            min_region: 4,
        };
        let lab = RegionGrowSegmenter.segment(&img, &params).unwrap();
        assert_eq!(lab.numlabels, 1, "isolated pixel should merge into background");
    }

    #[test]
    fn min_region_larger_than_image_leaves_one_segment() {
        let img = two_halves(6, 4, 0xFF0000, 0x0000FF);
        let params = SegmentationParams {
            sigma_s: 0,
            sigma_r: 1.0,
            min_region: 1000,
        };
        let lab = RegionGrowSegmenter.segment(&img, &params).unwrap();
        assert_eq!(lab.numlabels, 1);
    }
}
