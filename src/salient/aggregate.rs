//! Per-segment saliency aggregation and salient segment selection.
//!
//! Segments touching the outer image frame are treated as background: their
//! mean is forced to zero and their saliency does not count towards the
//! image average. A segment is selected when its mean saliency exceeds
//! `multiplier` times that average. When nothing qualifies, the segment with
//! the highest mean (after forcing) is taken instead, ties going to the
//! lowest label, so the selection is never empty.
use super::SelectionMask;
use crate::error::{Result, SaliencyError};
use crate::image::ImageView;
use crate::saliency::SaliencyMap;
use crate::segmentation::SegmentLabeling;
use log::debug;
use serde::Serialize;

/// Accumulated saliency of one segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentStats {
    pub saliency_sum: f64,
    pub pixel_count: usize,
    pub touches_border: bool,
}

/// Outcome of [`select_salient_segments`].
#[derive(Clone, Debug)]
pub struct Aggregation {
    pub stats: Vec<SegmentStats>,
    /// Per-label mean saliency; zero for border-touching segments.
    pub segment_means: Vec<f64>,
    /// Saliency of the non-border segments divided by the full pixel count.
    pub image_average: f64,
    pub selected_labels: Vec<u32>,
    /// True when no segment passed the threshold and the best one was taken.
    pub used_fallback: bool,
    pub mask: SelectionMask,
}

fn check_inputs(map: &SaliencyMap, labeling: &SegmentLabeling) -> Result<()> {
    if labeling.numlabels == 0 {
        return Err(SaliencyError::EmptySegmentation);
    }
    if map.w != labeling.w || map.h != labeling.h || map.data.len() != map.w * map.h {
        return Err(SaliencyError::InvalidDimensions {
            expected: labeling.w * labeling.h,
            actual: map.data.len(),
        });
    }
    labeling.validate()
}

/// Sum saliency and count pixels per label, flagging border-touching labels.
pub fn segment_stats(map: &SaliencyMap, labeling: &SegmentLabeling) -> Result<Vec<SegmentStats>> {
    check_inputs(map, labeling)?;
    let mut stats = vec![SegmentStats::default(); labeling.numlabels];
    for (y, row) in map.rows().enumerate() {
        let labels = &labeling.labels[y * map.w..(y + 1) * map.w];
        for (x, (&sal, &label)) in row.iter().zip(labels).enumerate() {
            let s = &mut stats[label as usize];
            s.saliency_sum += sal;
            s.pixel_count += 1;
            if !s.touches_border && map.is_border(x, y) {
                s.touches_border = true;
            }
        }
    }
    Ok(stats)
}

/// Choose the segments forming the salient object.
pub fn select_salient_segments(
    map: &SaliencyMap,
    labeling: &SegmentLabeling,
    multiplier: f64,
) -> Result<Aggregation> {
    let stats = segment_stats(map, labeling)?;

    let mut image_average = 0.0;
    let segment_means: Vec<f64> = stats
        .iter()
        .map(|s| {
            if s.touches_border || s.pixel_count == 0 {
                0.0
            } else {
                image_average += s.saliency_sum;
                s.saliency_sum / s.pixel_count as f64
            }
        })
        .collect();
    image_average /= map.data.len().max(1) as f64;

    let threshold = multiplier * image_average;
    let mut chosen: Vec<bool> = segment_means.iter().map(|&m| m > threshold).collect();

    let used_fallback = !chosen
        .iter()
        .zip(&stats)
        .any(|(&c, s)| c && s.pixel_count > 0);
    if used_fallback {
        let best = (0..stats.len())
            .filter(|&l| stats[l].pixel_count > 0)
            .fold(None, |best: Option<usize>, l| match best {
                Some(b) if segment_means[b] >= segment_means[l] => Some(b),
                _ => Some(l),
            });
        chosen.iter_mut().for_each(|c| *c = false);
        if let Some(b) = best {
            chosen[b] = true;
        }
    }

    let selected_labels: Vec<u32> = chosen
        .iter()
        .enumerate()
        .filter_map(|(l, &c)| c.then_some(l as u32))
        .collect();
    let mask = SelectionMask {
        w: map.w,
        h: map.h,
        selected: labeling
            .labels
            .iter()
            .map(|&l| chosen[l as usize])
            .collect(),
    };

    debug!(
        "select_salient_segments labels={} border={} avg={:.4} selected={:?} fallback={}",
        labeling.numlabels,
        stats.iter().filter(|s| s.touches_border).count(),
        image_average,
        selected_labels,
        used_fallback
    );

    Ok(Aggregation {
        stats,
        segment_means,
        image_average,
        selected_labels,
        used_fallback,
        mask,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeling(w: usize, h: usize, labels: Vec<u32>, n: usize) -> SegmentLabeling {
        SegmentLabeling::new(w, h, labels, n).unwrap()
    }

    /// 6×6 frame (label 0) around a 2×2 core (label 1) and a 2×2 side block (label 2).
    fn framed_labels() -> SegmentLabeling {
        #[rustfmt::skip]
        let labels = vec![
            0, 0, 0, 0, 0, 0,
            0, 1, 1, 2, 2, 0,
            0, 1, 1, 2, 2, 0,
            0, 0, 0, 0, 0, 0,
            0, 0, 0, 0, 0, 0,
            0, 0, 0, 0, 0, 0,
        ];
        labeling(6, 6, labels, 3)
    }

    fn map_from_labels(lab: &SegmentLabeling, values: &[f64]) -> SaliencyMap {
        let data = lab.labels.iter().map(|&l| values[l as usize]).collect();
        SaliencyMap::from_vec(lab.w, lab.h, data).unwrap()
    }

    #[test]
    fn stats_accumulate_and_flag_borders() {
        let lab = framed_labels();
        let map = map_from_labels(&lab, &[1.0, 10.0, 3.0]);
        let stats = segment_stats(&map, &lab).unwrap();
        assert_eq!(stats[0].pixel_count, 28);
        assert!(stats[0].touches_border);
        assert_eq!(stats[1].pixel_count, 4);
        assert!(!stats[1].touches_border);
        assert!((stats[1].saliency_sum - 40.0).abs() < 1e-12);
        assert!(!stats[2].touches_border);
    }

    #[test]
    fn interior_segment_above_twice_average_is_selected_alone() {
        let lab = framed_labels();
        // avg = (4·10 + 4·1) / 36; only label 1 clears twice that.
        let map = map_from_labels(&lab, &[100.0, 10.0, 1.0]);
        let agg = select_salient_segments(&map, &lab, 2.0).unwrap();
        assert!(!agg.used_fallback);
        assert_eq!(agg.selected_labels, vec![1]);
        let expected: Vec<bool> = lab.labels.iter().map(|&l| l == 1).collect();
        assert_eq!(agg.mask.selected, expected);
        assert!((agg.image_average - 44.0 / 36.0).abs() < 1e-12);
        assert_eq!(agg.segment_means[0], 0.0, "border segment must be forced to zero");
    }

    #[test]
    fn border_segment_never_selected_when_interior_qualifies() {
        let lab = framed_labels();
        let map = map_from_labels(&lab, &[1000.0, 5.0, 0.0]);
        let agg = select_salient_segments(&map, &lab, 2.0).unwrap();
        assert_eq!(agg.selected_labels, vec![1]);
        assert!(lab
            .labels
            .iter()
            .zip(&agg.mask.selected)
            .all(|(&l, &s)| !(l == 0 && s)));
    }

    #[test]
    fn all_border_segments_fall_back_to_first_label() {
        // 4×4: label 0 = left half, label 1 = right half; both touch the frame.
        #[rustfmt::skip]
        let labels = vec![
            0, 0, 1, 1,
            0, 0, 1, 1,
            0, 0, 1, 1,
            0, 0, 1, 1,
        ];
        let lab = labeling(4, 4, labels, 2);
        let map = map_from_labels(&lab, &[10.0, 50.0]);
        let agg = select_salient_segments(&map, &lab, 2.0).unwrap();
        assert!(agg.used_fallback);
        assert_eq!(agg.image_average, 0.0);
        // Means are compared after forcing, so both are zero and label 0 wins the tie.
        assert_eq!(agg.selected_labels, vec![0]);
        let count = agg.mask.selected.iter().filter(|&&s| s).count();
        assert_eq!(count, 8);
    }

    #[test]
    fn fallback_picks_highest_interior_mean() {
        let lab = framed_labels();
        // Uniform interior saliency below threshold with multiplier 100.
        let map = map_from_labels(&lab, &[0.0, 2.0, 3.0]);
        let agg = select_salient_segments(&map, &lab, 100.0).unwrap();
        assert!(agg.used_fallback);
        assert_eq!(agg.selected_labels, vec![2]);
    }

    #[test]
    fn empty_segmentation_is_rejected() {
        let lab = SegmentLabeling {
            w: 0,
            h: 0,
            labels: Vec::new(),
            numlabels: 0,
        };
        let map = SaliencyMap::new(0, 0);
        assert_eq!(
            select_salient_segments(&map, &lab, 2.0).unwrap_err(),
            SaliencyError::EmptySegmentation
        );
    }

    #[test]
    fn mismatched_map_is_rejected() {
        let lab = framed_labels();
        let map = SaliencyMap::new(5, 6);
        assert!(matches!(
            select_salient_segments(&map, &lab, 2.0),
            Err(SaliencyError::InvalidDimensions { .. })
        ));
    }
}
