//! Panel ordering for a page
//!
//! Overlapping panels are first reduced to disjoint pseudo-regions, which
//! are then scanned right-to-left, top-to-bottom.

mod partition;
mod scan;
mod types;

pub use partition::partition;
pub use scan::{order_panels, order_regions};
pub use types::{PageSize, PanelOrder, PanelOrderError, PseudoRegion, Result};

use crate::geometry::BBox;

/// Partition `panels` and order them on a page of the given size
pub fn order_page_panels(panels: &[BBox], page: &PageSize) -> PanelOrder {
    order_regions(&partition(panels), page)
}
