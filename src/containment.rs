//! Containment filter
//!
//! Decides which candidate boxes lie inside a container (a panel) by the
//! share of the candidate's own area that overlaps the container.

use serde::{Deserialize, Serialize};

use crate::geometry::BBox;

/// Default minimum containment ratio
pub const DEFAULT_CONTAINMENT_THRESHOLD: f64 = 0.5;

/// Containment filter options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainmentOptions {
    /// Minimum overlap / candidate area ratio for a candidate to be kept
    pub threshold: f64,
}

impl Default for ContainmentOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CONTAINMENT_THRESHOLD,
        }
    }
}

impl ContainmentOptions {
    /// Options with a custom threshold, clamped to 0.0-1.0
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }
}

/// Share of `candidate`'s area that lies inside `container`.
///
/// The denominator is the candidate's own area, not the union. Returns
/// `None` for zero-area candidates.
pub fn containment_ratio(container: &BBox, candidate: &BBox) -> Option<f64> {
    let area = candidate.area();
    if area <= 0 {
        return None;
    }
    Some(container.overlap_area(candidate) as f64 / area as f64)
}

/// Candidates whose containment ratio is at least `threshold`, in input order
pub fn contained(container: &BBox, candidates: &[BBox], threshold: f64) -> Vec<BBox> {
    candidates
        .iter()
        .filter(|c| containment_ratio(container, c).is_some_and(|r| r >= threshold))
        .cloned()
        .collect()
}

/// [`contained`] with options
pub fn contained_with(
    container: &BBox,
    candidates: &[BBox],
    options: &ContainmentOptions,
) -> Vec<BBox> {
    contained(container, candidates, options.threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoxKind;

    fn bx(id: &str, xmin: i64, ymin: i64, xmax: i64, ymax: i64) -> BBox {
        BBox::new(xmin, ymin, xmax, ymax, BoxKind::Text, id).unwrap()
    }

    fn panel() -> BBox {
        BBox::new(0, 0, 100, 100, BoxKind::Panel, "p").unwrap()
    }

    #[test]
    fn test_fully_inside_retained() {
        let inside = bx("in", 10, 10, 20, 20);
        assert_eq!(containment_ratio(&panel(), &inside), Some(1.0));
        assert_eq!(contained(&panel(), &[inside.clone()], 0.5), vec![inside]);
    }

    #[test]
    fn test_mostly_outside_excluded() {
        let corner = bx("corner", 90, 90, 110, 110);
        let ratio = containment_ratio(&panel(), &corner).unwrap();
        assert!((ratio - 0.25).abs() < 1e-9);
        assert!(contained(&panel(), &[corner], 0.5).is_empty());
    }

    #[test]
    fn test_ratio_uses_candidate_area() {
        // Tiny box fully inside a huge container is fully contained
        let big = BBox::new(0, 0, 10_000, 10_000, BoxKind::Panel, "big").unwrap();
        let tiny = bx("tiny", 5, 5, 6, 6);
        assert_eq!(containment_ratio(&big, &tiny), Some(1.0));
    }

    #[test]
    fn test_zero_area_candidate_excluded() {
        let line = bx("line", 10, 10, 10, 50);
        assert_eq!(containment_ratio(&panel(), &line), None);
        assert!(contained(&panel(), &[line], 0.0).is_empty());
    }

    #[test]
    fn test_preserves_input_order() {
        let a = bx("a", 60, 60, 70, 70);
        let b = bx("b", 200, 200, 210, 210);
        let c = bx("c", 10, 10, 20, 20);
        let kept = contained(&panel(), &[a, b, c], 0.5);
        let ids: Vec<&str> = kept.iter().map(|b| b.id()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_empty_candidates() {
        assert!(contained(&panel(), &[], 0.5).is_empty());
    }

    #[test]
    fn test_monotonic_in_threshold() {
        let candidates = vec![
            bx("full", 10, 10, 20, 20),
            bx("half", 90, 10, 110, 20),
            bx("quarter", 90, 90, 110, 110),
            bx("outside", 150, 150, 160, 160),
            bx("sliver", 95, 10, 115, 20),
        ];
        let thresholds = [0.0, 0.1, 0.25, 0.5, 0.75, 1.0];
        for pair in thresholds.windows(2) {
            let loose = contained(&panel(), &candidates, pair[0]);
            let strict = contained(&panel(), &candidates, pair[1]);
            assert!(strict.iter().all(|s| loose.contains(s)));
        }
    }

    #[test]
    fn test_options_clamp() {
        assert_eq!(ContainmentOptions::with_threshold(2.0).threshold, 1.0);
        assert_eq!(ContainmentOptions::with_threshold(-1.0).threshold, 0.0);
        assert_eq!(
            ContainmentOptions::default().threshold,
            DEFAULT_CONTAINMENT_THRESHOLD
        );
    }
}
