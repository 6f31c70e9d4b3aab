//! Data source traits consumed by the table layout manager.
//!
//! A data source owns the table: its sections, row and column counts, sizes
//! and content. The required surface is [`TableDataSource`]. Everything else
//! is split into small optional capability traits that a source opts into by
//! overriding the matching `as_*` accessor:
//!
//! | Capability | Provides | Default when absent |
//! |---|---|---|
//! | [`HeaderExtents`] | row header width, column header height | `0.0` (headers disabled) |
//! | [`HeaderContent`] | row and column header views | no header view |
//! | [`ColumnBackgrounds`] | column background views | no background |
//! | [`StickyHeaders`] | sticky row/column header flags | `false` |
//! | [`CellSelection`] | selection callbacks and veto | always selectable, events dropped |
//!
//! # Example
//!
//! ```ignore
//! use lattice_table_layout::{HeaderExtents, ItemIndex, TableDataSource};
//!
//! struct Scores;
//!
//! impl TableDataSource for Scores {
//!     type Cell = String;
//!     type View = String;
//!
//!     fn section_count(&self) -> usize { 1 }
//!     fn column_count(&self, _section: usize) -> usize { 2 }
//!     fn row_count(&self, _section: usize) -> usize { 3 }
//!     fn column_width(&self, _column: usize, _section: usize) -> f32 { 80.0 }
//!     fn row_height(&self, _row: usize, _section: usize) -> f32 { 24.0 }
//!     fn cell(&self, row: usize, column: usize, _index: ItemIndex) -> String {
//!         format!("{row}:{column}")
//!     }
//!
//!     fn as_header_extents(&self) -> Option<&dyn HeaderExtents> {
//!         Some(self)
//!     }
//! }
//!
//! impl HeaderExtents for Scores {
//!     fn column_header_height(&self, _section: usize) -> f32 { 20.0 }
//! }
//! ```

use std::fmt;

use crate::index::ItemIndex;

/// The required data source interface.
///
/// Counts and sizes are asked for on every query and never cached, so a
/// source may change between calls. It must keep them stable for the
/// duration of one layout pass.
pub trait TableDataSource: Send + Sync {
    /// Content produced for a data cell.
    type Cell;
    /// Content produced for headers and column backgrounds.
    type View;

    /// Returns the number of sections.
    fn section_count(&self) -> usize;

    /// Returns the number of columns in `section`.
    fn column_count(&self, section: usize) -> usize;

    /// Returns the number of rows in `section`.
    fn row_count(&self, section: usize) -> usize;

    /// Returns the width of `column` in `section`.
    fn column_width(&self, column: usize, section: usize) -> f32;

    /// Returns the height of `row` in `section`.
    fn row_height(&self, row: usize, section: usize) -> f32;

    /// Returns the content for the cell at `(row, column)`.
    ///
    /// `index` is the linear identity the rendering surface uses for the cell.
    fn cell(&self, row: usize, column: usize, index: ItemIndex) -> Self::Cell;

    // -------------------------------------------------------------------------
    // Capability accessors
    // -------------------------------------------------------------------------

    /// Returns the header extents capability, if implemented.
    fn as_header_extents(&self) -> Option<&dyn HeaderExtents> {
        None
    }

    /// Returns the header content capability, if implemented.
    fn as_header_content(&self) -> Option<&dyn HeaderContent<View = Self::View>> {
        None
    }

    /// Returns the column background capability, if implemented.
    fn as_column_backgrounds(&self) -> Option<&dyn ColumnBackgrounds<View = Self::View>> {
        None
    }

    /// Returns the sticky header capability, if implemented.
    fn as_sticky_headers(&self) -> Option<&dyn StickyHeaders> {
        None
    }

    /// Returns the cell selection capability, if implemented.
    fn as_cell_selection(&self) -> Option<&dyn CellSelection> {
        None
    }
}

/// Header sizes. Returning `0.0` (or less) disables that header in a section.
pub trait HeaderExtents {
    /// Returns the width of the row headers in `section`.
    fn row_header_width(&self, _section: usize) -> f32 {
        0.0
    }

    /// Returns the height of the column headers in `section`.
    fn column_header_height(&self, _section: usize) -> f32 {
        0.0
    }
}

/// Views for row and column headers.
pub trait HeaderContent {
    /// The view type produced for headers.
    type View;

    /// Returns the view for the header of `column`.
    fn column_header(&self, _column: usize, _index: ItemIndex) -> Option<Self::View> {
        None
    }

    /// Returns the view for the header of `row`.
    fn row_header(&self, _row: usize, _index: ItemIndex) -> Option<Self::View> {
        None
    }
}

/// Decorative views drawn behind each column.
pub trait ColumnBackgrounds {
    /// The view type produced for backgrounds.
    type View;

    /// Returns the background view at `index`.
    fn column_background(&self, index: ItemIndex) -> Self::View;
}

/// Header pinning.
pub trait StickyHeaders {
    /// Returns `true` if row headers in `section` stick to the leading edge.
    fn sticky_row_headers(&self, _section: usize) -> bool {
        false
    }

    /// Returns `true` if column headers in `section` stick to the top edge.
    fn sticky_column_headers(&self, _section: usize) -> bool {
        false
    }
}

/// Cell selection callbacks.
///
/// Only data cells are ever routed here; headers are never selectable.
pub trait CellSelection {
    /// Called after the user selected the cell at `(row, column)`.
    fn did_select(&self, _row: usize, _column: usize, _index: ItemIndex) {}

    /// Called after the user deselected the cell at `(row, column)`.
    fn did_deselect(&self, _row: usize, _column: usize, _index: ItemIndex) {}

    /// Returns whether the cell at `(row, column)` may be selected.
    fn should_select(&self, _row: usize, _column: usize, _index: ItemIndex) -> bool {
        true
    }
}

/// The optional capabilities a data source reported when it was attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// [`HeaderExtents`] is available.
    pub header_extents: bool,
    /// [`HeaderContent`] is available.
    pub header_content: bool,
    /// [`ColumnBackgrounds`] is available.
    pub column_backgrounds: bool,
    /// [`StickyHeaders`] is available.
    pub sticky_headers: bool,
    /// [`CellSelection`] is available.
    pub cell_selection: bool,
}

impl Capabilities {
    /// No optional capability.
    pub const NONE: Self = Self {
        header_extents: false,
        header_content: false,
        column_backgrounds: false,
        sticky_headers: false,
        cell_selection: false,
    };

    /// Asks `source` which optional capabilities it implements.
    pub fn probe<S: TableDataSource + ?Sized>(source: &S) -> Self {
        Self {
            header_extents: source.as_header_extents().is_some(),
            header_content: source.as_header_content().is_some(),
            column_backgrounds: source.as_column_backgrounds().is_some(),
            sticky_headers: source.as_sticky_headers().is_some(),
            cell_selection: source.as_cell_selection().is_some(),
        }
    }

    /// Returns `true` if no optional capability is available.
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.header_extents, "header_extents"),
            (self.header_content, "header_content"),
            (self.column_backgrounds, "column_backgrounds"),
            (self.sticky_headers, "sticky_headers"),
            (self.cell_selection, "cell_selection"),
        ];
        let present: Vec<&str> = names
            .iter()
            .filter(|(enabled, _)| *enabled)
            .map(|(_, name)| *name)
            .collect();
        if present.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", present.join(", "))
        }
    }
}
