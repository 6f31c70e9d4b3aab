//! The table layout manager.
//!
//! [`TableLayoutManager`] sits between a flat, section/item rendering surface
//! and a [`TableDataSource`]. It implements the three surface protocols
//! ([`CollectionSource`], [`TableGeometry`], [`SelectionDelegate`]) by
//! translating linear item indices into grid positions with
//! [`SectionShape`] and relaying every question to the source.
//!
//! The manager caches nothing. Every call asks the source for the current
//! counts and extents, so there is no invalidation step: the surface simply
//! queries again.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use lattice_table_layout::{
//!     CollectionSource, GridSection, GridTableSource, ItemIndex, SelectionDelegate,
//!     TableLayoutManager,
//! };
//!
//! let source = Arc::new(
//!     GridTableSource::new()
//!         .with_section(GridSection::new(3, 2).with_row_headers(40.0).with_column_headers(20.0)),
//! );
//! let manager = TableLayoutManager::new().with_source(&source);
//!
//! assert_eq!(manager.item_count(0)?, 11);
//! manager.did_select(ItemIndex::new(0, 3))?; // cell (0, 0)
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use crate::error::{Axis, LayoutError, Result};
use crate::geometry::{Point, Rect, SectionGeometry, Size};
use crate::index::{ItemIndex, TableItem};
use crate::logging::targets;
use crate::shape::SectionShape;
use crate::source::{
    Capabilities, CellSelection, ColumnBackgrounds, HeaderContent, HeaderExtents, StickyHeaders,
    TableDataSource,
};
use crate::surface::{CollectionSource, ItemContent, SelectionDelegate, TableGeometry};

/// Adapts a [`TableDataSource`] to a flat section/item rendering surface.
///
/// The manager holds only a weak reference to its source and never extends
/// its lifetime. Once the source is dropped or detached the manager is inert:
/// counts are zero, sizes are zero, content is empty and selection is refused.
pub struct TableLayoutManager<S: ?Sized> {
    source: Option<Weak<S>>,
    capabilities: Capabilities,
}

impl<S: ?Sized> Default for TableLayoutManager<S> {
    fn default() -> Self {
        Self {
            source: None,
            capabilities: Capabilities::NONE,
        }
    }
}

impl<S: ?Sized> fmt::Debug for TableLayoutManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableLayoutManager")
            .field(
                "attached",
                &self.source.as_ref().is_some_and(|weak| weak.strong_count() > 0),
            )
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

impl<S: TableDataSource + ?Sized> TableLayoutManager<S> {
    /// Creates a manager with no data source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `source` and returns the manager.
    pub fn with_source(mut self, source: &Arc<S>) -> Self {
        self.set_source(Some(source));
        self
    }

    /// Attaches a new data source, or detaches with `None`.
    ///
    /// The source's optional capabilities are probed once here.
    pub fn set_source(&mut self, source: Option<&Arc<S>>) {
        match source {
            Some(source) => {
                self.capabilities = Capabilities::probe(&**source);
                self.source = Some(Arc::downgrade(source));
                tracing::debug!(
                    target: targets::SOURCE,
                    capabilities = %self.capabilities,
                    "attached table data source"
                );
            }
            None => self.detach(),
        }
    }

    /// Detaches the current data source.
    pub fn detach(&mut self) {
        if self.source.take().is_some() {
            tracing::debug!(target: targets::SOURCE, "detached table data source");
        }
        self.capabilities = Capabilities::NONE;
    }

    /// Returns `true` if a data source is attached and still alive.
    pub fn is_attached(&self) -> bool {
        self.upgrade().is_some()
    }

    /// Returns the capabilities probed when the current source was attached.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Returns the attached data source, if it is still alive.
    pub fn source(&self) -> Option<Arc<S>> {
        self.upgrade()
    }

    // -------------------------------------------------------------------------
    // Coordinate translation
    // -------------------------------------------------------------------------

    /// Returns the current shape of `section`.
    ///
    /// A detached manager reports an empty shape.
    pub fn section_shape(&self, section: usize) -> Result<SectionShape> {
        match self.upgrade() {
            Some(source) => self.shape_in(&source, section),
            None => Ok(SectionShape::new(section, 0, 0)),
        }
    }

    /// Decodes a linear index into a cell or header.
    pub fn table_item(&self, index: ItemIndex) -> Result<TableItem> {
        match self.upgrade() {
            Some(source) => self.resolve(&source, index),
            None => SectionShape::new(index.section, 0, 0).decode(index.item),
        }
    }

    /// Returns the linear index of the cell at `(row, column)` in `section`.
    pub fn index_of_cell(&self, section: usize, row: usize, column: usize) -> Result<ItemIndex> {
        self.encode(section, TableItem::Cell { row, column })
    }

    /// Returns the linear index of the header of `row` in `section`.
    pub fn index_of_row_header(&self, section: usize, row: usize) -> Result<ItemIndex> {
        self.encode(section, TableItem::RowHeader { row })
    }

    /// Returns the linear index of the header of `column` in `section`.
    pub fn index_of_column_header(&self, section: usize, column: usize) -> Result<ItemIndex> {
        self.encode(section, TableItem::ColumnHeader { column })
    }

    fn encode(&self, section: usize, item: TableItem) -> Result<ItemIndex> {
        let shape = self.section_shape(section)?;
        shape
            .encode(item)
            .map(|item| ItemIndex::new(section, item))
    }

    // -------------------------------------------------------------------------
    // Aggregated geometry
    // -------------------------------------------------------------------------

    /// Returns the shape, header extents and sticky flags of `section`.
    pub fn section_geometry(&self, section: usize) -> Result<SectionGeometry> {
        let Some(source) = self.upgrade() else {
            return Ok(SectionGeometry {
                shape: SectionShape::new(section, 0, 0),
                ..Default::default()
            });
        };
        self.geometry_in(&source, section)
    }

    /// Returns the size of the item at `index`.
    pub fn item_size(&self, index: ItemIndex) -> Result<Size> {
        let Some(source) = self.upgrade() else {
            return Ok(Size::ZERO);
        };
        Ok(self.item_frame_in(&source, index)?.size)
    }

    /// Returns the frame of the item at `index`, relative to its section origin.
    ///
    /// Cells are offset by the row header width and the column header height.
    /// Sticky headers are reported in their resting position.
    pub fn item_frame(&self, index: ItemIndex) -> Result<Rect> {
        let Some(source) = self.upgrade() else {
            return Ok(Rect::ZERO);
        };
        self.item_frame_in(&source, index)
    }

    /// Returns the total size of `section`, headers included.
    pub fn section_size(&self, section: usize) -> Result<Size> {
        let Some(source) = self.upgrade() else {
            return Ok(Size::ZERO);
        };
        let geometry = self.geometry_in(&source, section)?;
        let shape = geometry.shape;
        let width = geometry.leading_inset() + columns_extent(&*source, section, shape.columns);
        let height = geometry.top_inset() + rows_extent(&*source, section, shape.rows);
        Ok(Size::new(width, height))
    }

    /// Returns the background view for `column` in `section`.
    ///
    /// The background's linear identity is `(section, column)`.
    pub fn column_background(&self, section: usize, column: usize) -> Result<Option<S::View>> {
        let Some(source) = self.upgrade() else {
            return Ok(None);
        };
        let shape = self.shape_in(&source, section)?;
        if column >= shape.columns {
            return Err(LayoutError::out_of_range(
                Axis::Column,
                section,
                column,
                shape.columns,
            ));
        }
        Ok(self
            .column_backgrounds(&source)
            .map(|backgrounds| backgrounds.column_background(ItemIndex::new(section, column))))
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn upgrade(&self) -> Option<Arc<S>> {
        self.source.as_ref().and_then(Weak::upgrade)
    }

    fn header_extents<'a>(&self, source: &'a S) -> Option<&'a dyn HeaderExtents> {
        if self.capabilities.header_extents {
            source.as_header_extents()
        } else {
            None
        }
    }

    fn header_content<'a>(&self, source: &'a S) -> Option<&'a dyn HeaderContent<View = S::View>> {
        if self.capabilities.header_content {
            source.as_header_content()
        } else {
            None
        }
    }

    fn column_backgrounds<'a>(
        &self,
        source: &'a S,
    ) -> Option<&'a dyn ColumnBackgrounds<View = S::View>> {
        if self.capabilities.column_backgrounds {
            source.as_column_backgrounds()
        } else {
            None
        }
    }

    fn sticky_headers<'a>(&self, source: &'a S) -> Option<&'a dyn StickyHeaders> {
        if self.capabilities.sticky_headers {
            source.as_sticky_headers()
        } else {
            None
        }
    }

    fn cell_selection<'a>(&self, source: &'a S) -> Option<&'a dyn CellSelection> {
        if self.capabilities.cell_selection {
            source.as_cell_selection()
        } else {
            None
        }
    }

    fn check_section(&self, source: &S, section: usize) -> Result<()> {
        let count = source.section_count();
        if section < count {
            Ok(())
        } else {
            Err(LayoutError::out_of_range(
                Axis::Section,
                section,
                section,
                count,
            ))
        }
    }

    fn extents_in(&self, source: &S, section: usize) -> (f32, f32) {
        match self.header_extents(source) {
            Some(extents) => (
                extents.row_header_width(section),
                extents.column_header_height(section),
            ),
            None => (0.0, 0.0),
        }
    }

    fn shape_with_extents(&self, source: &S, section: usize) -> Result<(SectionShape, f32, f32)> {
        self.check_section(source, section)?;
        let (row_header_width, column_header_height) = self.extents_in(source, section);
        let shape = SectionShape::new(
            section,
            source.row_count(section),
            source.column_count(section),
        )
        .with_row_headers(row_header_width > 0.0)
        .with_column_headers(column_header_height > 0.0);
        Ok((shape, row_header_width, column_header_height))
    }

    fn shape_in(&self, source: &S, section: usize) -> Result<SectionShape> {
        self.shape_with_extents(source, section)
            .map(|(shape, _, _)| shape)
    }

    fn geometry_in(&self, source: &S, section: usize) -> Result<SectionGeometry> {
        let (shape, row_header_width, column_header_height) =
            self.shape_with_extents(source, section)?;
        let (sticky_row_headers, sticky_column_headers) = match self.sticky_headers(source) {
            Some(sticky) => (
                sticky.sticky_row_headers(section),
                sticky.sticky_column_headers(section),
            ),
            None => (false, false),
        };
        Ok(SectionGeometry {
            shape,
            row_header_width,
            column_header_height,
            sticky_row_headers,
            sticky_column_headers,
        })
    }

    fn resolve(&self, source: &S, index: ItemIndex) -> Result<TableItem> {
        self.shape_in(source, index.section)
            .and_then(|shape| shape.decode(index.item))
            .inspect_err(|err| {
                tracing::debug!(
                    target: targets::INDEX,
                    %index,
                    error = %err,
                    "rejected linear index"
                );
            })
    }

    fn item_frame_in(&self, source: &S, index: ItemIndex) -> Result<Rect> {
        let section = index.section;
        let geometry = self.geometry_in(source, section)?;
        let item = geometry.shape.decode(index.item)?;
        let leading = geometry.leading_inset();
        let top = geometry.top_inset();

        let frame = match item {
            TableItem::Cell { row, column } => Rect::from_origin_size(
                Point::new(
                    leading + columns_extent(source, section, column),
                    top + rows_extent(source, section, row),
                ),
                Size::new(
                    source.column_width(column, section),
                    source.row_height(row, section),
                ),
            ),
            TableItem::RowHeader { row } => Rect::new(
                0.0,
                top + rows_extent(source, section, row),
                geometry.row_header_width,
                source.row_height(row, section),
            ),
            TableItem::ColumnHeader { column } => Rect::new(
                leading + columns_extent(source, section, column),
                0.0,
                source.column_width(column, section),
                geometry.column_header_height,
            ),
        };
        Ok(frame)
    }

    fn route(&self, index: ItemIndex, selected: bool) -> Result<()> {
        let Some(source) = self.upgrade() else {
            return Ok(());
        };
        let TableItem::Cell { row, column } = self.resolve(&source, index)? else {
            return Ok(());
        };
        let Some(selection) = self.cell_selection(&source) else {
            return Ok(());
        };

        tracing::trace!(
            target: targets::SELECTION,
            %index,
            row,
            column,
            selected,
            "routing selection change"
        );
        if selected {
            selection.did_select(row, column, index);
        } else {
            selection.did_deselect(row, column, index);
        }
        Ok(())
    }
}

/// Sum of the widths of the first `count` columns.
fn columns_extent<S: TableDataSource + ?Sized>(source: &S, section: usize, count: usize) -> f32 {
    (0..count)
        .map(|column| source.column_width(column, section))
        .sum()
}

/// Sum of the heights of the first `count` rows.
fn rows_extent<S: TableDataSource + ?Sized>(source: &S, section: usize, count: usize) -> f32 {
    (0..count).map(|row| source.row_height(row, section)).sum()
}

impl<S: TableDataSource + ?Sized> CollectionSource for TableLayoutManager<S> {
    type Cell = S::Cell;
    type View = S::View;

    fn section_count(&self) -> usize {
        self.upgrade().map_or(0, |source| source.section_count())
    }

    fn item_count(&self, section: usize) -> Result<usize> {
        self.section_shape(section)?.item_count()
    }

    fn item_content(&self, index: ItemIndex) -> Result<Option<ItemContent<S::Cell, S::View>>> {
        let Some(source) = self.upgrade() else {
            return Ok(None);
        };
        let content = match self.resolve(&source, index)? {
            TableItem::Cell { row, column } => {
                Some(ItemContent::Cell(source.cell(row, column, index)))
            }
            TableItem::RowHeader { row } => self
                .header_content(&source)
                .and_then(|headers| headers.row_header(row, index))
                .map(ItemContent::RowHeader),
            TableItem::ColumnHeader { column } => self
                .header_content(&source)
                .and_then(|headers| headers.column_header(column, index))
                .map(ItemContent::ColumnHeader),
        };
        Ok(content)
    }
}

impl<S: TableDataSource + ?Sized> TableGeometry for TableLayoutManager<S> {
    type View = S::View;

    fn column_width(&self, column: usize, section: usize) -> f32 {
        self.upgrade()
            .map_or(0.0, |source| source.column_width(column, section))
    }

    fn row_height(&self, row: usize, section: usize) -> f32 {
        self.upgrade()
            .map_or(0.0, |source| source.row_height(row, section))
    }

    fn row_header_width(&self, section: usize) -> f32 {
        self.upgrade()
            .map_or(0.0, |source| self.extents_in(&source, section).0)
    }

    fn column_header_height(&self, section: usize) -> f32 {
        self.upgrade()
            .map_or(0.0, |source| self.extents_in(&source, section).1)
    }

    fn column_header_view(&self, column: usize, index: ItemIndex) -> Option<S::View> {
        let source = self.upgrade()?;
        self.header_content(&source)?.column_header(column, index)
    }

    fn row_header_view(&self, row: usize, index: ItemIndex) -> Option<S::View> {
        let source = self.upgrade()?;
        self.header_content(&source)?.row_header(row, index)
    }

    fn column_background_view(&self, index: ItemIndex) -> Option<S::View> {
        let source = self.upgrade()?;
        let backgrounds = self.column_backgrounds(&source)?;
        Some(backgrounds.column_background(index))
    }

    fn sticky_row_headers(&self, section: usize) -> bool {
        self.upgrade().is_some_and(|source| {
            self.sticky_headers(&source)
                .is_some_and(|sticky| sticky.sticky_row_headers(section))
        })
    }

    fn sticky_column_headers(&self, section: usize) -> bool {
        self.upgrade().is_some_and(|source| {
            self.sticky_headers(&source)
                .is_some_and(|sticky| sticky.sticky_column_headers(section))
        })
    }
}

impl<S: TableDataSource + ?Sized> SelectionDelegate for TableLayoutManager<S> {
    fn should_select(&self, index: ItemIndex) -> Result<bool> {
        let Some(source) = self.upgrade() else {
            return Ok(false);
        };
        match self.resolve(&source, index)? {
            TableItem::Cell { row, column } => Ok(self
                .cell_selection(&source)
                .is_none_or(|selection| selection.should_select(row, column, index))),
            TableItem::RowHeader { .. } | TableItem::ColumnHeader { .. } => Ok(false),
        }
    }

    fn did_select(&self, index: ItemIndex) -> Result<()> {
        self.route(index, true)
    }

    fn did_deselect(&self, index: ItemIndex) -> Result<()> {
        self.route(index, false)
    }
}

static_assertions::assert_impl_all!(TableLayoutManager<crate::GridTableSource>: Send, Sync);
