//! Page-level reading order
//!
//! Runs the full flow for a page: partition and order the panels, then
//! collect and order the elements of each panel. Pages share no state, so
//! batches are processed in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{ConfigError, ReadingOrderConfig};
use crate::containment::contained_with;
use crate::element_order::{self, Strategy};
use crate::error::Result;
use crate::geometry::{BBox, BoxKind};
use crate::panel_order::{order_page_panels, PageSize};
use crate::record::{parse_records, BoxRecord};

/// One page: its size and every annotated box on it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub width: f64,
    pub height: f64,
    pub boxes: Vec<BBox>,
}

impl Page {
    pub fn new(width: f64, height: f64, boxes: Vec<BBox>) -> Self {
        Self {
            width,
            height,
            boxes,
        }
    }

    /// Build a page from raw records, skipping records that fail to parse
    pub fn from_records(width: f64, height: f64, records: &[BoxRecord]) -> Self {
        Self::new(width, height, parse_records(records))
    }

    /// Panel boxes in input order
    pub fn panels(&self) -> Vec<BBox> {
        self.boxes
            .iter()
            .filter(|b| *b.kind() == BoxKind::Panel)
            .cloned()
            .collect()
    }

    /// Non-panel boxes whose kind is in `kinds`, in input order
    pub fn elements(&self, kinds: &[BoxKind]) -> Vec<BBox> {
        self.boxes
            .iter()
            .filter(|b| *b.kind() != BoxKind::Panel && kinds.contains(b.kind()))
            .cloned()
            .collect()
    }
}

/// Ordered elements of one panel
#[derive(Debug, Clone, Serialize)]
pub struct PanelReading {
    /// Index among the page's panels (input order)
    pub index: usize,
    pub panel: BBox,
    /// Panel elements in reading order
    pub elements: Vec<BBox>,
    pub strategy: Strategy,
}

/// Reading order of a whole page
#[derive(Debug, Clone, Serialize)]
pub struct PageReadingOrder {
    /// Panels in reading order
    pub panels: Vec<PanelReading>,
    /// Panels the scan could not place
    pub unplaced_panels: Vec<usize>,
    /// Whether every panel was placed
    pub complete: bool,
}

impl PageReadingOrder {
    /// Panel indices in reading order
    pub fn panel_indices(&self) -> Vec<usize> {
        self.panels.iter().map(|p| p.index).collect()
    }

    /// Every element on the page in reading order, panel by panel
    pub fn element_sequence(&self) -> impl Iterator<Item = &BBox> {
        self.panels.iter().flat_map(|p| p.elements.iter())
    }
}

/// Orders pages with a fixed configuration
pub struct PageOrderer {
    config: ReadingOrderConfig,
    pool: Option<rayon::ThreadPool>,
}

impl PageOrderer {
    /// Create an orderer. A dedicated thread pool is built only when
    /// `runtime.threads` is set; otherwise the global rayon pool is used.
    pub fn new(config: ReadingOrderConfig) -> Result<Self> {
        config.validate()?;
        let pool = match config.runtime.threads {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| ConfigError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &ReadingOrderConfig {
        &self.config
    }

    /// Order the panels of `page` and the elements of each panel
    pub fn order_page(&self, page: &Page) -> Result<PageReadingOrder> {
        let size = PageSize::new(page.width, page.height)?;
        let panels = page.panels();
        let elements = page.elements(&self.config.elements.kinds);

        let panel_order = order_page_panels(&panels, &size);
        if !panel_order.is_complete() {
            warn!(
                unplaced = panel_order.unplaced.len(),
                "Panel order is incomplete"
            );
        }

        let mut readings = Vec::with_capacity(panel_order.len());
        for &index in &panel_order.order {
            let panel = &panels[index];
            let inside = contained_with(panel, &elements, &self.config.containment);
            let ordered = element_order::solve(panel, &inside, &self.config.elements.order)?;
            readings.push(PanelReading {
                index,
                panel: panel.clone(),
                strategy: ordered.strategy,
                elements: ordered.into_boxes(),
            });
        }

        debug!(
            panels = panels.len(),
            elements = elements.len(),
            "Page ordered"
        );

        Ok(PageReadingOrder {
            panels: readings,
            complete: panel_order.is_complete(),
            unplaced_panels: panel_order.unplaced,
        })
    }

    /// Order many pages in parallel. Results keep the input order.
    pub fn order_pages(&self, pages: &[Page]) -> Vec<Result<PageReadingOrder>> {
        let run = || -> Vec<Result<PageReadingOrder>> {
            pages.par_iter().map(|p| self.order_page(p)).collect()
        };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}

/// Order one page with `config`
pub fn order_page(page: &Page, config: &ReadingOrderConfig) -> Result<PageReadingOrder> {
    config.validate()?;
    PageOrderer {
        config: config.clone(),
        pool: None,
    }
    .order_page(page)
}
