//! Annotation record parsing boundary
//!
//! Loaders and detectors hand over loosely typed records whose coordinates
//! usually arrive as strings. Records are converted to [`BBox`] exactly
//! once here; nothing downstream re-parses text.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::geometry::{BBox, BoxKind, GeometryError, MAX_COORDINATE};

/// Record conversion error
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Invalid coordinate {field}={value:?} in record {id:?}")]
    InvalidCoordinate {
        id: String,
        field: &'static str,
        value: String,
    },

    #[error("Invalid box in record {id:?}: {source}")]
    InvalidBox {
        id: String,
        #[source]
        source: GeometryError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A coordinate as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCoordinate {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawCoordinate {
    /// Parse to integer pixels. Fractional values are truncated toward zero;
    /// values beyond [`MAX_COORDINATE`] are rejected.
    fn to_pixels(&self) -> Option<i64> {
        let pixels = match self {
            RawCoordinate::Int(v) => Some(*v),
            RawCoordinate::Float(v) => float_to_pixels(*v),
            RawCoordinate::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(float_to_pixels))
            }
        };
        pixels.filter(|v| v.unsigned_abs() <= MAX_COORDINATE.unsigned_abs())
    }

    fn display(&self) -> String {
        match self {
            RawCoordinate::Int(v) => v.to_string(),
            RawCoordinate::Float(v) => v.to_string(),
            RawCoordinate::Text(s) => s.clone(),
        }
    }
}

fn float_to_pixels(v: f64) -> Option<i64> {
    let v = v.trunc();
    (v.is_finite() && v.abs() <= MAX_COORDINATE as f64).then(|| v as i64)
}

impl From<&str> for RawCoordinate {
    fn from(s: &str) -> Self {
        RawCoordinate::Text(s.to_string())
    }
}

impl From<i64> for RawCoordinate {
    fn from(v: i64) -> Self {
        RawCoordinate::Int(v)
    }
}

/// Box record as supplied by an annotation loader or a detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxRecord {
    pub xmin: RawCoordinate,
    pub ymin: RawCoordinate,
    pub xmax: RawCoordinate,
    pub ymax: RawCoordinate,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub id: String,
}

impl BoxRecord {
    /// Create a record with string coordinates, the usual wire shape
    pub fn new(
        kind: impl Into<String>,
        id: impl Into<String>,
        xmin: &str,
        ymin: &str,
        xmax: &str,
        ymax: &str,
    ) -> Self {
        Self {
            xmin: xmin.into(),
            ymin: ymin.into(),
            xmax: xmax.into(),
            ymax: ymax.into(),
            kind: kind.into(),
            id: id.into(),
        }
    }

    fn coordinate(&self, field: &'static str, raw: &RawCoordinate) -> Result<i64, RecordError> {
        raw.to_pixels().ok_or_else(|| RecordError::InvalidCoordinate {
            id: self.id.clone(),
            field,
            value: raw.display(),
        })
    }
}

impl TryFrom<&BoxRecord> for BBox {
    type Error = RecordError;

    fn try_from(record: &BoxRecord) -> Result<Self, Self::Error> {
        let xmin = record.coordinate("xmin", &record.xmin)?;
        let ymin = record.coordinate("ymin", &record.ymin)?;
        let xmax = record.coordinate("xmax", &record.xmax)?;
        let ymax = record.coordinate("ymax", &record.ymax)?;

        BBox::new(
            xmin,
            ymin,
            xmax,
            ymax,
            BoxKind::from(record.kind.as_str()),
            record.id.clone(),
        )
        .map_err(|source| RecordError::InvalidBox {
            id: record.id.clone(),
            source,
        })
    }
}

/// Convert records to boxes, skipping records that fail to parse
pub fn parse_records(records: &[BoxRecord]) -> Vec<BBox> {
    records
        .iter()
        .filter_map(|record| match BBox::try_from(record) {
            Ok(b) => Some(b),
            Err(e) => {
                warn!("Skipping record: {e}");
                None
            }
        })
        .collect()
}

/// Parse a JSON array of records, skipping records that fail to convert
pub fn parse_records_json(json: &str) -> Result<Vec<BBox>, RecordError> {
    let records: Vec<BoxRecord> = serde_json::from_str(json)?;
    Ok(parse_records(&records))
}
