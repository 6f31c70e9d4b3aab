//! Protocols the table layout manager exposes to a rendering surface.
//!
//! A collection-style rendering surface only understands sections of linear
//! items. It drives the manager through three traits:
//!
//! - [`CollectionSource`]: section and item counts, item content
//! - [`TableGeometry`]: the table-specific sizing, header and decoration queries
//! - [`SelectionDelegate`]: user selection events
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐ ItemIndex ┌────────────────────┐ (row, column) ┌─────────────────┐
//! │  Rendering  │──────────>│ TableLayoutManager │──────────────>│ TableDataSource │
//! │   surface   │<──────────│                    │<──────────────│                 │
//! └─────────────┘  content  └────────────────────┘ content/sizes └─────────────────┘
//! ```

use crate::error::Result;
use crate::index::ItemIndex;

/// Content for one linear item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemContent<C, V> {
    /// A data cell.
    Cell(C),
    /// A row header view.
    RowHeader(V),
    /// A column header view.
    ColumnHeader(V),
}

impl<C, V> ItemContent<C, V> {
    /// Returns the cell content, if this is a cell.
    pub fn into_cell(self) -> Option<C> {
        match self {
            Self::Cell(cell) => Some(cell),
            Self::RowHeader(_) | Self::ColumnHeader(_) => None,
        }
    }

    /// Returns the header view, if this is a header.
    pub fn into_header(self) -> Option<V> {
        match self {
            Self::Cell(_) => None,
            Self::RowHeader(view) | Self::ColumnHeader(view) => Some(view),
        }
    }

    /// Returns `true` for data cells.
    pub fn is_cell(&self) -> bool {
        matches!(self, Self::Cell(_))
    }
}

/// Flat section/item data queries.
pub trait CollectionSource {
    /// Content produced for a data cell.
    type Cell;
    /// Content produced for headers.
    type View;

    /// Returns the number of sections.
    fn section_count(&self) -> usize;

    /// Returns the number of linear items in `section`.
    fn item_count(&self, section: usize) -> Result<usize>;

    /// Returns the content for the item at `index`.
    ///
    /// `Ok(None)` means the item exists but has nothing to show.
    fn item_content(&self, index: ItemIndex)
    -> Result<Option<ItemContent<Self::Cell, Self::View>>>;
}

/// Table-specific geometry and decoration queries.
///
/// These are relays: each answers exactly what the data source answers, or
/// the documented default when the source lacks the capability.
pub trait TableGeometry {
    /// View type for headers and backgrounds.
    type View;

    /// Returns the width of `column` in `section`.
    fn column_width(&self, column: usize, section: usize) -> f32;

    /// Returns the height of `row` in `section`.
    fn row_height(&self, row: usize, section: usize) -> f32;

    /// Returns the row header width for `section`, `0.0` when disabled.
    fn row_header_width(&self, section: usize) -> f32;

    /// Returns the column header height for `section`, `0.0` when disabled.
    fn column_header_height(&self, section: usize) -> f32;

    /// Returns the header view for `column`.
    fn column_header_view(&self, column: usize, index: ItemIndex) -> Option<Self::View>;

    /// Returns the header view for `row`.
    fn row_header_view(&self, row: usize, index: ItemIndex) -> Option<Self::View>;

    /// Returns the column background view at `index`.
    fn column_background_view(&self, index: ItemIndex) -> Option<Self::View>;

    /// Returns whether row headers in `section` stick to the leading edge.
    fn sticky_row_headers(&self, section: usize) -> bool;

    /// Returns whether column headers in `section` stick to the top edge.
    fn sticky_column_headers(&self, section: usize) -> bool;
}

/// Selection events from the rendering surface.
pub trait SelectionDelegate {
    /// Returns whether the item at `index` may be selected.
    fn should_select(&self, index: ItemIndex) -> Result<bool>;

    /// Notifies that the item at `index` was selected.
    fn did_select(&self, index: ItemIndex) -> Result<()>;

    /// Notifies that the item at `index` was deselected.
    fn did_deselect(&self, index: ItemIndex) -> Result<()>;
}
