//! Element ordering inside a panel
//!
//! Orders speech balloons (or any element boxes) of one panel along the
//! shortest path from the element nearest the panel's top-right corner to
//! the panel's bottom-left corner.

mod solve;
mod types;

pub use solve::{path_length, solve, solve_with, start_element};
pub use types::{
    ElementOrder, ElementOrderError, ElementOrderOptions, ElementOrderOptionsBuilder,
    OverflowPolicy, Result, Strategy, DEFAULT_MAX_EXACT, DEFAULT_MAX_EXHAUSTIVE,
    MAX_EXACT_CLAMP, MAX_EXHAUSTIVE_CLAMP,
};

use crate::geometry::BBox;

/// Order the elements of `panel` with default options.
///
/// `elements` should already be filtered to the panel (see
/// [`crate::containment::contained`]). Panels with more elements than the
/// default exact cap are ordered with the nearest-neighbour heuristic.
pub fn order_elements(panel: &BBox, elements: &[BBox]) -> Vec<BBox> {
    let options = ElementOrderOptions::default();
    let strategy = options
        .select_strategy(elements.len())
        .unwrap_or(Strategy::NearestNeighbor);
    solve_with(panel, elements, strategy).into_boxes()
}
