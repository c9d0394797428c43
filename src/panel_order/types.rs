//! Panel ordering core types

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{BBox, Point};

// ============================================================
// Error Types
// ============================================================

/// Panel ordering error types
#[derive(Debug, Error)]
pub enum PanelOrderError {
    #[error("Invalid page size: {width}x{height}")]
    InvalidPageSize { width: f64, height: f64 },
}

pub type Result<T> = std::result::Result<T, PanelOrderError>;

// ============================================================
// Page Size
// ============================================================

/// Page dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// Create a page size, rejecting non-finite or non-positive dimensions
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(PanelOrderError::InvalidPageSize { width, height });
        }
        Ok(Self { width, height })
    }

    /// Top-right corner of the page, where right-to-left reading starts
    pub fn top_right(&self) -> Point {
        Point::new(self.width, 0.0)
    }
}

// ============================================================
// Pseudo Region
// ============================================================

/// Stand-in for a panel with overlaps clipped away.
///
/// Always lies within the panel it was derived from; `source` is that
/// panel's index in the partitioned slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PseudoRegion {
    pub source: usize,
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl PseudoRegion {
    /// Region covering the whole panel
    pub fn from_panel(source: usize, panel: &BBox) -> Self {
        Self {
            source,
            xmin: panel.xmin() as f64,
            ymin: panel.ymin() as f64,
            xmax: panel.xmax() as f64,
            ymax: panel.ymax() as f64,
        }
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.xmax, self.ymin)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.xmax, self.ymax)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.xmin, self.ymin)
    }

    /// Whether the region lies within `panel`
    pub fn within(&self, panel: &BBox) -> bool {
        self.xmin >= panel.xmin() as f64
            && self.ymin >= panel.ymin() as f64
            && self.xmax <= panel.xmax() as f64
            && self.ymax <= panel.ymax() as f64
    }
}

// ============================================================
// Result
// ============================================================

/// Panel reading order for one page.
///
/// The scan can stall when no remaining region is free of regions above
/// it; whatever was not reached is listed in `unplaced`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelOrder {
    /// Panel indices in reading order
    pub order: Vec<usize>,
    /// Panel indices the scan could not place, in the order their regions
    /// were given
    pub unplaced: Vec<usize>,
}

impl PanelOrder {
    /// Whether every panel was placed
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
