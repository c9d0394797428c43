//! Frontier scan over pseudo-regions
//!
//! Repeatedly takes, among the regions with nothing left above them, the
//! one whose top-right corner is closest to the page's top-right corner.
//! When that region is not at the left end of its row, the nearest region
//! below and to the right of it is read next.

use tracing::debug;

use super::types::{PageSize, PanelOrder, PseudoRegion, Result};

/// Order pseudo-regions for right-to-left, top-to-bottom reading.
///
/// Indices in the result are the regions' `source` panel indices. A scan
/// that stalls returns a partial order with the rest in `unplaced`. The
/// region with the smallest bottom edge is always a frontier candidate, so
/// only hand-built regions with `ymin > ymax` can stall.
pub fn order_panels(
    regions: &[PseudoRegion],
    page_width: f64,
    page_height: f64,
) -> Result<PanelOrder> {
    let page = PageSize::new(page_width, page_height)?;
    Ok(order_regions(regions, &page))
}

/// [`order_panels`] with a validated page size
pub fn order_regions(regions: &[PseudoRegion], page: &PageSize) -> PanelOrder {
    let mut remaining: Vec<usize> = (0..regions.len()).collect();
    let mut order = Vec::with_capacity(regions.len());
    let page_corner = page.top_right();

    while !remaining.is_empty() {
        let Some(chosen) = closest_top_candidate(regions, &remaining, page) else {
            debug!(
                placed = order.len(),
                remaining = remaining.len(),
                "No frontier candidate, panel order is incomplete"
            );
            break;
        };
        remaining.retain(|&i| i != chosen);
        order.push(chosen);

        let current = &regions[chosen];
        let at_left_end = !remaining.iter().any(|&i| regions[i].xmax < current.xmin);
        if at_left_end {
            continue;
        }

        if let Some(next) = next_in_row(regions, &remaining, current) {
            remaining.retain(|&i| i != next);
            order.push(next);
        }
    }

    debug!(
        page_corner = ?page_corner,
        placed = order.len(),
        unplaced = remaining.len(),
        "Panel order computed"
    );

    PanelOrder {
        order: order.into_iter().map(|i| regions[i].source).collect(),
        unplaced: remaining.into_iter().map(|i| regions[i].source).collect(),
    }
}

/// Whether no other remaining region lies strictly above region `i`
fn is_top_candidate(regions: &[PseudoRegion], remaining: &[usize], i: usize) -> bool {
    remaining
        .iter()
        .filter(|&&j| j != i)
        .all(|&j| regions[i].ymin <= regions[j].ymax)
}

fn closest_top_candidate(
    regions: &[PseudoRegion],
    remaining: &[usize],
    page: &PageSize,
) -> Option<usize> {
    let corner = page.top_right();
    let mut best: Option<(usize, f64)> = None;

    for &i in remaining {
        if !is_top_candidate(regions, remaining, i) {
            continue;
        }
        let d = regions[i].top_right().distance_to(&corner);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((i, d));
        }
    }

    best.map(|(i, _)| i)
}

/// Nearest remaining region below and right of `current`, measured from
/// `current`'s bottom-right corner to the candidate's top-left corner
fn next_in_row(
    regions: &[PseudoRegion],
    remaining: &[usize],
    current: &PseudoRegion,
) -> Option<usize> {
    let anchor = current.bottom_right();
    let mut best: Option<(usize, f64)> = None;

    for &i in remaining {
        let r = &regions[i];
        if r.ymin < current.ymax || r.xmin < current.xmax {
            continue;
        }
        let d = r.top_left().distance_to(&anchor);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((i, d));
        }
    }

    best.map(|(i, _)| i)
}
