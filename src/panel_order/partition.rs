//! Panel partitioning
//!
//! Overlapping panels are replaced by pseudo-regions: each panel that
//! overlaps others has its right edge clipped to the x-midpoint of the
//! mean overlap rectangle. This targets two panels sharing a near-vertical
//! border. With three or more mutual overlaps the mean rectangle is only an
//! approximation and the clipped region may be narrower than the unshared
//! part of the panel.

use tracing::debug;

use super::types::PseudoRegion;
use crate::geometry::BBox;

/// One pseudo-region per panel, in input order
pub fn partition(panels: &[BBox]) -> Vec<PseudoRegion> {
    panels
        .iter()
        .enumerate()
        .map(|(i, panel)| pseudo_region(i, panel, panels))
        .collect()
}

fn pseudo_region(index: usize, panel: &BBox, panels: &[BBox]) -> PseudoRegion {
    let overlaps: Vec<(i64, i64, i64, i64)> = panels
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != index)
        .filter_map(|(_, other)| panel.intersection(other))
        .collect();

    let mut region = PseudoRegion::from_panel(index, panel);
    if overlaps.is_empty() {
        return region;
    }

    let n = overlaps.len() as f64;
    let mean_x1 = overlaps.iter().map(|o| o.0 as f64).sum::<f64>() / n;
    let mean_x2 = overlaps.iter().map(|o| o.2 as f64).sum::<f64>() / n;
    region.xmax = (mean_x1 + mean_x2) / 2.0;

    debug!(
        panel = panel.id(),
        overlaps = overlaps.len(),
        clipped_xmax = region.xmax,
        "Clipped overlapping panel"
    );
    region
}
