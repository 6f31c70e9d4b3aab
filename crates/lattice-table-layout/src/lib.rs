//! Table layout manager for flat collection surfaces.
//!
//! Collection-style rendering surfaces address their content as sections of
//! linear items. This crate lets such a surface display a table (rows,
//! columns, optional row and column headers, sticky header flags, column
//! backgrounds and per-cell selection) supplied by a [`TableDataSource`].
//!
//! # Core Types
//!
//! - [`TableLayoutManager`]: the adapter; implements the surface protocols
//! - [`SectionShape`]: item counting and the linear/grid index mapping
//! - [`ItemIndex`] / [`TableItem`]: linear and grid addressing
//! - [`TableDataSource`]: the data owner, plus optional capability traits
//! - [`GridTableSource`]: an in-memory data source
//!
//! # Surface Protocols
//!
//! - [`CollectionSource`]: section count, item count, item content
//! - [`TableGeometry`]: column widths, row heights, header sizes and views,
//!   stickiness, column backgrounds
//! - [`SelectionDelegate`]: should-select, did-select, did-deselect
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lattice_table_layout::{
//!     CollectionSource, GridSection, GridTableSource, ItemIndex, SelectionDelegate,
//!     TableItem, TableLayoutManager,
//! };
//!
//! let source = Arc::new(GridTableSource::new().with_section(
//!     GridSection::new(3, 2)
//!         .with_row_headers(40.0)
//!         .with_column_headers(20.0),
//! ));
//! let manager = TableLayoutManager::new().with_source(&source);
//!
//! // 3 * 2 cells, 3 row headers and 2 column headers.
//! assert_eq!(manager.item_count(0).unwrap(), 11);
//!
//! let index = ItemIndex::new(0, 4);
//! assert_eq!(
//!     manager.table_item(index).unwrap(),
//!     TableItem::Cell { row: 0, column: 1 }
//! );
//!
//! manager.did_select(index).unwrap();
//! assert!(source.is_cell_selected(0, 0, 1));
//! ```
//!
//! # Threading
//!
//! Every query is synchronous and cheap. The manager performs no locking of
//! its own; callers sharing it across threads must serialize their queries.

mod error;
mod geometry;
mod grid_source;
mod index;
pub mod logging;
mod manager;
mod shape;
mod source;
mod surface;

pub use error::{Axis, LayoutError, Result};
pub use geometry::{Point, Rect, SectionGeometry, Size};
pub use grid_source::{
    CellExtractor, CellKey, GridCell, GridSection, GridTableSource, GridView, GridViewKind,
    HeaderExtractor, Orientation,
};
pub use index::{ItemIndex, TableItem};
pub use manager::TableLayoutManager;
pub use shape::SectionShape;
pub use source::{
    Capabilities, CellSelection, ColumnBackgrounds, HeaderContent, HeaderExtents, StickyHeaders,
    TableDataSource,
};
pub use surface::{CollectionSource, ItemContent, SelectionDelegate, TableGeometry};
