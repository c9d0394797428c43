//! Geometry primitives for page layout boxes
//!
//! Axis-aligned bounding boxes with a semantic kind and an opaque id,
//! plus the real-valued points used by the ordering solvers.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================
// Constants
// ============================================================

/// Largest accepted coordinate magnitude in pixels. Widths, areas and
/// center sums of boxes within this range stay inside `i64`.
pub const MAX_COORDINATE: i64 = 1 << 30;

// ============================================================
// Error Types
// ============================================================

/// Box construction error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("Inverted bounds: ({xmin}, {ymin}, {xmax}, {ymax})")]
    InvertedBounds {
        xmin: i64,
        ymin: i64,
        xmax: i64,
        ymax: i64,
    },

    #[error("Coordinate out of range: {value}")]
    OutOfRange { value: i64 },
}

// ============================================================
// Box Kind
// ============================================================

/// Semantic type of a box on a page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BoxKind {
    /// Panel (koma); `frame` on the wire
    Panel,
    /// Speech balloon or other text region
    Text,
    /// Character body
    Body,
    /// Character face
    Face,
    /// Any other annotation label
    Other(String),
}

impl BoxKind {
    /// Wire name of this kind
    pub fn as_str(&self) -> &str {
        match self {
            BoxKind::Panel => "frame",
            BoxKind::Text => "text",
            BoxKind::Body => "body",
            BoxKind::Face => "face",
            BoxKind::Other(label) => label.as_str(),
        }
    }
}

impl From<&str> for BoxKind {
    fn from(label: &str) -> Self {
        match label.trim() {
            "frame" | "panel" => BoxKind::Panel,
            "text" => BoxKind::Text,
            "body" => BoxKind::Body,
            "face" => BoxKind::Face,
            other => BoxKind::Other(other.to_string()),
        }
    }
}

impl From<String> for BoxKind {
    fn from(label: String) -> Self {
        BoxKind::from(label.as_str())
    }
}

impl From<BoxKind> for String {
    fn from(kind: BoxKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for BoxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================
// Point
// ============================================================

/// Real-valued 2D point
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

// ============================================================
// Bounding Box
// ============================================================

/// Axis-aligned bounding box with integer pixel coordinates.
///
/// Invariant: `xmin <= xmax` and `ymin <= ymax`. Fields are private so a
/// box cannot be mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBox", into = "RawBox")]
pub struct BBox {
    xmin: i64,
    ymin: i64,
    xmax: i64,
    ymax: i64,
    kind: BoxKind,
    id: String,
}

#[derive(Serialize, Deserialize)]
struct RawBox {
    xmin: i64,
    ymin: i64,
    xmax: i64,
    ymax: i64,
    #[serde(rename = "type")]
    kind: BoxKind,
    #[serde(default)]
    id: String,
}

impl TryFrom<RawBox> for BBox {
    type Error = GeometryError;

    fn try_from(raw: RawBox) -> Result<Self, Self::Error> {
        BBox::new(raw.xmin, raw.ymin, raw.xmax, raw.ymax, raw.kind, raw.id)
    }
}

impl From<BBox> for RawBox {
    fn from(b: BBox) -> Self {
        Self {
            xmin: b.xmin,
            ymin: b.ymin,
            xmax: b.xmax,
            ymax: b.ymax,
            kind: b.kind,
            id: b.id,
        }
    }
}

impl BBox {
    /// Create a new box, rejecting inverted bounds and coordinates beyond
    /// [`MAX_COORDINATE`]
    pub fn new(
        xmin: i64,
        ymin: i64,
        xmax: i64,
        ymax: i64,
        kind: BoxKind,
        id: impl Into<String>,
    ) -> Result<Self, GeometryError> {
        if let Some(&value) = [xmin, ymin, xmax, ymax]
            .iter()
            .find(|v| v.unsigned_abs() > MAX_COORDINATE.unsigned_abs())
        {
            return Err(GeometryError::OutOfRange { value });
        }
        if xmin > xmax || ymin > ymax {
            return Err(GeometryError::InvertedBounds {
                xmin,
                ymin,
                xmax,
                ymax,
            });
        }
        Ok(Self {
            xmin,
            ymin,
            xmax,
            ymax,
            kind,
            id: id.into(),
        })
    }

    /// Create a box from two arbitrary opposite corners, clamped to
    /// [`MAX_COORDINATE`]
    pub fn from_corners(
        (x1, y1): (i64, i64),
        (x2, y2): (i64, i64),
        kind: BoxKind,
        id: impl Into<String>,
    ) -> Self {
        let clamp = |v: i64| v.clamp(-MAX_COORDINATE, MAX_COORDINATE);
        let (x1, y1, x2, y2) = (clamp(x1), clamp(y1), clamp(x2), clamp(y2));
        Self {
            xmin: x1.min(x2),
            ymin: y1.min(y2),
            xmax: x1.max(x2),
            ymax: y1.max(y2),
            kind,
            id: id.into(),
        }
    }

    pub fn xmin(&self) -> i64 {
        self.xmin
    }

    pub fn ymin(&self) -> i64 {
        self.ymin
    }

    pub fn xmax(&self) -> i64 {
        self.xmax
    }

    pub fn ymax(&self) -> i64 {
        self.ymax
    }

    pub fn kind(&self) -> &BoxKind {
        &self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn width(&self) -> i64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> i64 {
        self.ymax - self.ymin
    }

    /// Area in square pixels (zero for degenerate boxes)
    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }

    /// Whether the box has zero width or height
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Center point, computed on demand
    pub fn center(&self) -> Point {
        Point::new(
            (self.xmin + self.xmax) as f64 / 2.0,
            (self.ymin + self.ymax) as f64 / 2.0,
        )
    }

    /// Top-right corner `(xmax, ymin)`
    pub fn top_right(&self) -> Point {
        Point::new(self.xmax as f64, self.ymin as f64)
    }

    /// Bottom-left corner `(xmin, ymax)`
    pub fn bottom_left(&self) -> Point {
        Point::new(self.xmin as f64, self.ymax as f64)
    }

    /// Overlap area with another box (zero when disjoint or touching)
    pub fn overlap_area(&self, other: &BBox) -> i64 {
        let ox1 = self.xmin.max(other.xmin);
        let oy1 = self.ymin.max(other.ymin);
        let ox2 = self.xmax.min(other.xmax);
        let oy2 = self.ymax.min(other.ymax);
        (ox2 - ox1).max(0) * (oy2 - oy1).max(0)
    }

    /// Non-degenerate intersection rectangle as `(x1, y1, x2, y2)`
    pub fn intersection(&self, other: &BBox) -> Option<(i64, i64, i64, i64)> {
        let ox1 = self.xmin.max(other.xmin);
        let oy1 = self.ymin.max(other.ymin);
        let ox2 = self.xmax.min(other.xmax);
        let oy2 = self.ymax.min(other.ymax);

        if ox2 > ox1 && oy2 > oy1 {
            Some((ox1, oy1, ox2, oy2))
        } else {
            None
        }
    }
}
