//! Linear and grid addressing.
//!
//! The rendering surface addresses everything by [`ItemIndex`], a
//! `(section, item)` pair. The data source addresses the same things by grid
//! position, described by [`TableItem`]. The mapping between the two lives in
//! [`SectionShape`](crate::SectionShape).

use std::fmt;

/// Linear position of an item on the rendering surface.
///
/// This is the identity the surface uses for view recycling, so it is passed
/// through to the data source alongside the decoded grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ItemIndex {
    /// The section within the surface.
    pub section: usize,
    /// The item within the section.
    pub item: usize,
}

impl ItemIndex {
    /// Creates a new linear index.
    #[inline]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// Returns the index at `item` within the same section.
    #[inline]
    pub const fn sibling(&self, item: usize) -> Self {
        Self {
            section: self.section,
            item,
        }
    }
}

impl fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}

impl From<(usize, usize)> for ItemIndex {
    fn from((section, item): (usize, usize)) -> Self {
        Self { section, item }
    }
}

/// What a linear item decodes to within its section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableItem {
    /// A data cell at `(row, column)`.
    Cell { row: usize, column: usize },
    /// The header of `row`, shown at the leading edge.
    RowHeader { row: usize },
    /// The header of `column`, shown at the top edge.
    ColumnHeader { column: usize },
}

impl TableItem {
    /// Returns `true` for data cells.
    #[inline]
    pub fn is_cell(&self) -> bool {
        matches!(self, Self::Cell { .. })
    }

    /// Returns `true` for row or column headers.
    #[inline]
    pub fn is_header(&self) -> bool {
        !self.is_cell()
    }

    /// Returns the row this item belongs to, if any.
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::Cell { row, .. } | Self::RowHeader { row } => Some(*row),
            Self::ColumnHeader { .. } => None,
        }
    }

    /// Returns the column this item belongs to, if any.
    pub fn column(&self) -> Option<usize> {
        match self {
            Self::Cell { column, .. } | Self::ColumnHeader { column } => Some(*column),
            Self::RowHeader { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_index_ordering() {
        let a = ItemIndex::new(0, 5);
        let b = ItemIndex::new(1, 0);
        assert!(a < b);
        assert_eq!(a.sibling(2), ItemIndex::new(0, 2));
        assert_eq!(ItemIndex::from((3, 4)).to_string(), "[3, 4]");
    }

    #[test]
    fn test_table_item_accessors() {
        let cell = TableItem::Cell { row: 1, column: 2 };
        assert!(cell.is_cell());
        assert_eq!(cell.row(), Some(1));
        assert_eq!(cell.column(), Some(2));

        let row_header = TableItem::RowHeader { row: 3 };
        assert!(row_header.is_header());
        assert_eq!(row_header.column(), None);

        let column_header = TableItem::ColumnHeader { column: 0 };
        assert_eq!(column_header.row(), None);
        assert_eq!(column_header.column(), Some(0));
    }
}
