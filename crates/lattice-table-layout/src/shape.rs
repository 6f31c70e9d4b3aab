//! Section shape and the linear item ordering.
//!
//! [`SectionShape`] is a snapshot of one section's grid: its row and column
//! counts and whether row and column headers are enabled. The same value
//! computes the item count, decodes linear items and encodes grid positions,
//! so the three can never disagree.
//!
//! # Item Ordering
//!
//! Items are laid out as a row-major walk over the table including its
//! headers, with the top-left corner left out:
//!
//! ```text
//!            col 0   col 1        (column header band, if enabled)
//!          ┌───────┬───────┐
//!          │   0   │   1   │
//! ┌────────┼───────┼───────┤
//! │ row 0  │   3   │   4   │      item 2 is the header of row 0
//! ├────────┼───────┼───────┤
//! │ row 1  │   6   │   7   │      item 5 is the header of row 1
//! └────────┴───────┴───────┘
//! ```
//!
//! 1. With column headers enabled, items `0..columns` are the column headers.
//! 2. Each row then occupies `columns + 1` items (row header first) when row
//!    headers are enabled, or `columns` items otherwise.

use crate::error::{Axis, LayoutError, Result};
use crate::index::TableItem;

/// Grid shape of a single section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SectionShape {
    /// The section this shape describes (used for error reporting).
    pub section: usize,
    /// Number of data rows.
    pub rows: usize,
    /// Number of data columns.
    pub columns: usize,
    /// Whether each row has a header item.
    pub row_headers: bool,
    /// Whether each column has a header item.
    pub column_headers: bool,
}

impl SectionShape {
    /// Creates a shape without headers.
    pub const fn new(section: usize, rows: usize, columns: usize) -> Self {
        Self {
            section,
            rows,
            columns,
            row_headers: false,
            column_headers: false,
        }
    }

    /// Enables or disables row headers.
    pub const fn with_row_headers(mut self, enabled: bool) -> Self {
        self.row_headers = enabled;
        self
    }

    /// Enables or disables column headers.
    pub const fn with_column_headers(mut self, enabled: bool) -> Self {
        self.column_headers = enabled;
        self
    }

    /// Number of items in the column header band.
    #[inline]
    pub fn header_band(&self) -> usize {
        if self.column_headers { self.columns } else { 0 }
    }

    #[inline]
    fn row_header_slot(&self) -> usize {
        usize::from(self.row_headers)
    }

    /// Number of items taken by one row, including its header.
    #[inline]
    pub fn stride(&self) -> Option<usize> {
        self.columns.checked_add(self.row_header_slot())
    }

    /// Returns the number of linear items in the section.
    ///
    /// This is `rows * columns`, plus `rows` with row headers, plus `columns`
    /// with column headers.
    pub fn item_count(&self) -> Result<usize> {
        self.stride()
            .and_then(|stride| self.rows.checked_mul(stride))
            .and_then(|cells| cells.checked_add(self.header_band()))
            .ok_or(LayoutError::ShapeOverflow {
                section: self.section,
            })
    }

    /// Returns `true` if the section has no items.
    pub fn is_empty(&self) -> bool {
        matches!(self.item_count(), Ok(0))
    }

    /// Decodes a linear item into a cell or header.
    ///
    /// Fails with [`LayoutError::OutOfRange`] when `item` is not below
    /// [`item_count`](Self::item_count).
    pub fn decode(&self, item: usize) -> Result<TableItem> {
        let count = self.item_count()?;
        if item >= count {
            return Err(LayoutError::out_of_range(
                Axis::Item,
                self.section,
                item,
                count,
            ));
        }

        let band = self.header_band();
        if item < band {
            return Ok(TableItem::ColumnHeader { column: item });
        }

        // item < count implies rows > 0 and a non-zero stride
        let stride = self.columns + self.row_header_slot();
        let offset = item - band;
        let row = offset / stride;
        let slot = offset % stride;

        if self.row_headers {
            if slot == 0 {
                Ok(TableItem::RowHeader { row })
            } else {
                Ok(TableItem::Cell {
                    row,
                    column: slot - 1,
                })
            }
        } else {
            Ok(TableItem::Cell { row, column: slot })
        }
    }

    /// Encodes a cell or header into its linear item.
    ///
    /// Headers that are disabled for this section report a count of zero on
    /// their axis.
    pub fn encode(&self, item: TableItem) -> Result<usize> {
        // Rejects shapes whose arithmetic would overflow.
        self.item_count()?;
        let stride = self.columns + self.row_header_slot();
        let band = self.header_band();

        match item {
            TableItem::ColumnHeader { column } => {
                self.check(Axis::Column, column, band)?;
                Ok(column)
            }
            TableItem::RowHeader { row } => {
                let rows = if self.row_headers { self.rows } else { 0 };
                self.check(Axis::Row, row, rows)?;
                Ok(band + row * stride)
            }
            TableItem::Cell { row, column } => {
                self.check(Axis::Row, row, self.rows)?;
                self.check(Axis::Column, column, self.columns)?;
                Ok(band + row * stride + self.row_header_slot() + column)
            }
        }
    }

    fn check(&self, axis: Axis, index: usize, count: usize) -> Result<()> {
        if index < count {
            Ok(())
        } else {
            Err(LayoutError::out_of_range(axis, self.section, index, count))
        }
    }
}
