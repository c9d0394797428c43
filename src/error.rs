//! Crate-level error type

use thiserror::Error;

use crate::config::ConfigError;
use crate::element_order::ElementOrderError;
use crate::geometry::GeometryError;
use crate::panel_order::PanelOrderError;
use crate::record::RecordError;

/// Any error produced while ordering a page
#[derive(Debug, Error)]
pub enum ReadingOrderError {
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("Element ordering error: {0}")]
    ElementOrder(#[from] ElementOrderError),

    #[error("Panel ordering error: {0}")]
    PanelOrder(#[from] PanelOrderError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ReadingOrderError>;
