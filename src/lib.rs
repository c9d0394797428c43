//! Reading order estimation for manga and comic pages
//!
//! Given the bounding boxes on a page (panels, speech balloons, faces, ...)
//! this crate estimates the order a reader follows:
//!
//! - **Panels** are read right-to-left, top-to-bottom. Overlapping panels
//!   are first reduced to disjoint pseudo-regions ([`panel_order`]).
//! - **Elements inside a panel** are read along the shortest path from the
//!   element nearest the panel's top-right corner to the panel's
//!   bottom-left corner ([`element_order`]).
//!
//! Elements are assigned to panels by the share of their area inside the
//! panel ([`containment`]). Raw annotation records with string coordinates
//! are converted once at the [`record`] boundary.
//!
//! ```
//! use manga_reading_order::{order_page, BBox, BoxKind, Page, ReadingOrderConfig};
//!
//! let page = Page::new(
//!     800.0,
//!     1200.0,
//!     vec![
//!         BBox::new(0, 0, 800, 1200, BoxKind::Panel, "p0").unwrap(),
//!         BBox::new(600, 50, 700, 300, BoxKind::Text, "t0").unwrap(),
//!         BBox::new(100, 700, 200, 950, BoxKind::Text, "t1").unwrap(),
//!     ],
//! );
//! let order = order_page(&page, &ReadingOrderConfig::default()).unwrap();
//! let ids: Vec<&str> = order.element_sequence().map(|b| b.id()).collect();
//! assert_eq!(ids, ["t0", "t1"]);
//! ```

pub mod config;
pub mod containment;
pub mod element_order;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod page;
pub mod panel_order;
pub mod record;

pub use config::{ConfigError, ElementsConfig, ReadingOrderConfig, RuntimeConfig};
pub use containment::{contained, containment_ratio, ContainmentOptions};
pub use element_order::{
    order_elements, ElementOrder, ElementOrderError, ElementOrderOptions, OverflowPolicy,
    Strategy,
};
pub use error::{ReadingOrderError, Result};
pub use geometry::{BBox, BoxKind, GeometryError, Point, MAX_COORDINATE};
pub use page::{order_page, Page, PageOrderer, PageReadingOrder, PanelReading};
pub use panel_order::{
    order_page_panels, order_panels, partition, PageSize, PanelOrder, PanelOrderError,
    PseudoRegion,
};
pub use record::{parse_records, parse_records_json, BoxRecord, RawCoordinate, RecordError};
