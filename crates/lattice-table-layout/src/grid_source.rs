//! In-memory table data source.
//!
//! [`GridTableSource`] stores a list of [`GridSection`] descriptions and
//! implements every optional capability. Cell text and header titles come from
//! extractor closures, and selection state is tracked so the effect of routed
//! selection events can be observed.
//!
//! # Example
//!
//! ```ignore
//! use lattice_table_layout::{GridSection, GridTableSource, Orientation};
//!
//! let source = GridTableSource::new()
//!     .with_section(
//!         GridSection::new(3, 2)
//!             .with_column_widths(vec![120.0, 80.0])
//!             .with_row_headers(40.0)
//!             .with_column_headers(20.0)
//!             .with_sticky_column_headers(true),
//!     )
//!     .with_cells(|_section, row, column| format!("R{row}C{column}"))
//!     .with_headers(|_section, position, orientation| match orientation {
//!         Orientation::Horizontal => Some(format!("Column {position}")),
//!         Orientation::Vertical => Some(format!("{}", position + 1)),
//!     });
//! ```

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::index::ItemIndex;
use crate::source::{
    CellSelection, ColumnBackgrounds, HeaderContent, HeaderExtents, StickyHeaders,
    TableDataSource,
};

/// Type alias for a cell text extractor: (section, row, column) -> text.
pub type CellExtractor = Arc<dyn Fn(usize, usize, usize) -> String + Send + Sync>;

/// Type alias for a header title extractor: (section, position, orientation) -> title.
pub type HeaderExtractor = Arc<dyn Fn(usize, usize, Orientation) -> Option<String> + Send + Sync>;

const DEFAULT_ROW_HEIGHT: f32 = 24.0;
const DEFAULT_COLUMN_WIDTH: f32 = 100.0;

/// Header orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Column headers, along the top edge.
    Horizontal,
    /// Row headers, along the leading edge.
    Vertical,
}

/// A cell produced by [`GridTableSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    /// Linear identity on the rendering surface.
    pub index: ItemIndex,
    pub row: usize,
    pub column: usize,
    pub text: String,
}

/// What a [`GridView`] decorates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridViewKind {
    /// Header of the given column.
    ColumnHeader(usize),
    /// Header of the given row.
    RowHeader(usize),
    /// Background behind a column.
    ColumnBackground,
}

/// A header or background view produced by [`GridTableSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    /// Linear identity on the rendering surface.
    pub index: ItemIndex,
    pub kind: GridViewKind,
    /// Header title; empty for backgrounds.
    pub title: String,
}

/// Shape and sizing of one section of a [`GridTableSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridSection {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub columns: usize,
    /// Width used for columns without an explicit width.
    pub default_column_width: f32,
    /// Height used for rows without an explicit height.
    pub default_row_height: f32,
    /// Explicit column widths, by column.
    pub column_widths: Vec<f32>,
    /// Explicit row heights, by row.
    pub row_heights: Vec<f32>,
    /// Row header width; `0.0` disables row headers.
    pub row_header_width: f32,
    /// Column header height; `0.0` disables column headers.
    pub column_header_height: f32,
    pub sticky_row_headers: bool,
    pub sticky_column_headers: bool,
}

impl Default for GridSection {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl GridSection {
    /// Creates a section with default sizes and no headers.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            default_row_height: DEFAULT_ROW_HEIGHT,
            column_widths: Vec::new(),
            row_heights: Vec::new(),
            row_header_width: 0.0,
            column_header_height: 0.0,
            sticky_row_headers: false,
            sticky_column_headers: false,
        }
    }

    /// Sets the default column width.
    pub fn with_default_column_width(mut self, width: f32) -> Self {
        self.default_column_width = width;
        self
    }

    /// Sets the default row height.
    pub fn with_default_row_height(mut self, height: f32) -> Self {
        self.default_row_height = height;
        self
    }

    /// Sets explicit column widths.
    pub fn with_column_widths(mut self, widths: Vec<f32>) -> Self {
        self.column_widths = widths;
        self
    }

    /// Sets explicit row heights.
    pub fn with_row_heights(mut self, heights: Vec<f32>) -> Self {
        self.row_heights = heights;
        self
    }

    /// Enables row headers with the given width.
    pub fn with_row_headers(mut self, width: f32) -> Self {
        self.row_header_width = width;
        self
    }

    /// Enables column headers with the given height.
    pub fn with_column_headers(mut self, height: f32) -> Self {
        self.column_header_height = height;
        self
    }

    /// Sets whether row headers stick to the leading edge.
    pub fn with_sticky_row_headers(mut self, sticky: bool) -> Self {
        self.sticky_row_headers = sticky;
        self
    }

    /// Sets whether column headers stick to the top edge.
    pub fn with_sticky_column_headers(mut self, sticky: bool) -> Self {
        self.sticky_column_headers = sticky;
        self
    }

    /// Returns the width of `column`.
    pub fn column_width(&self, column: usize) -> f32 {
        self.column_widths
            .get(column)
            .copied()
            .unwrap_or(self.default_column_width)
    }

    /// Returns the height of `row`.
    pub fn row_height(&self, row: usize) -> f32 {
        self.row_heights
            .get(row)
            .copied()
            .unwrap_or(self.default_row_height)
    }
}

/// Address of a cell across sections: (section, row, column).
pub type CellKey = (usize, usize, usize);

/// A table data source backed by in-memory section descriptions.
///
/// All state sits behind `RwLock`s, so the source can be shared through an
/// `Arc` and still be reshaped between layout passes.
pub struct GridTableSource {
    sections: RwLock<Vec<GridSection>>,
    cell_extractor: CellExtractor,
    header_extractor: Option<HeaderExtractor>,
    column_backgrounds: bool,
    selected: RwLock<BTreeSet<CellKey>>,
    unselectable: RwLock<HashSet<CellKey>>,
}

impl Default for GridTableSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GridTableSource {
    /// Creates an empty source with no sections.
    ///
    /// Cells render as empty text until a cell extractor is set.
    pub fn new() -> Self {
        Self {
            sections: RwLock::new(Vec::new()),
            cell_extractor: Arc::new(|_, _, _| String::new()),
            header_extractor: None,
            column_backgrounds: false,
            selected: RwLock::new(BTreeSet::new()),
            unselectable: RwLock::new(HashSet::new()),
        }
    }

    /// Appends a section.
    pub fn with_section(self, section: GridSection) -> Self {
        self.sections.write().push(section);
        self
    }

    /// Sets the cell text extractor.
    pub fn with_cells<F>(mut self, extractor: F) -> Self
    where
        F: Fn(usize, usize, usize) -> String + Send + Sync + 'static,
    {
        self.cell_extractor = Arc::new(extractor);
        self
    }

    /// Sets the header title extractor.
    ///
    /// Without one, headers still take up space but produce no view.
    pub fn with_headers<F>(mut self, extractor: F) -> Self
    where
        F: Fn(usize, usize, Orientation) -> Option<String> + Send + Sync + 'static,
    {
        self.header_extractor = Some(Arc::new(extractor));
        self
    }

    /// Enables column background views.
    pub fn with_column_backgrounds(mut self, enabled: bool) -> Self {
        self.column_backgrounds = enabled;
        self
    }

    /// Returns a copy of the section description.
    pub fn section(&self, section: usize) -> Option<GridSection> {
        self.sections.read().get(section).cloned()
    }

    /// Appends a section and returns its index.
    pub fn push_section(&self, section: GridSection) -> usize {
        let mut sections = self.sections.write();
        sections.push(section);
        sections.len() - 1
    }

    /// Removes and returns the section at `section`.
    pub fn remove_section(&self, section: usize) -> Option<GridSection> {
        let mut sections = self.sections.write();
        if section >= sections.len() {
            return None;
        }
        let removed = sections.remove(section);
        drop(sections);

        let mut selected = self.selected.write();
        let kept: BTreeSet<CellKey> = selected
            .iter()
            .filter_map(|key| shift_after_removal(*key, section))
            .collect();
        *selected = kept;
        drop(selected);

        let mut unselectable = self.unselectable.write();
        let kept: HashSet<CellKey> = unselectable
            .iter()
            .filter_map(|key| shift_after_removal(*key, section))
            .collect();
        *unselectable = kept;
        Some(removed)
    }

    /// Provides mutable access to a section via a closure.
    pub fn modify_section<F, R>(&self, section: usize, f: F) -> Option<R>
    where
        F: FnOnce(&mut GridSection) -> R,
    {
        let mut sections = self.sections.write();
        sections.get_mut(section).map(f)
    }

    /// Removes all sections and selection state.
    pub fn clear(&self) {
        self.sections.write().clear();
        self.selected.write().clear();
        self.unselectable.write().clear();
    }

    /// Marks a cell as selectable or not.
    pub fn set_cell_selectable(&self, section: usize, row: usize, column: usize, selectable: bool) {
        let mut unselectable = self.unselectable.write();
        if selectable {
            unselectable.remove(&(section, row, column));
        } else {
            unselectable.insert((section, row, column));
        }
    }

    /// Returns `true` if the cell is currently selected.
    pub fn is_cell_selected(&self, section: usize, row: usize, column: usize) -> bool {
        self.selected.read().contains(&(section, row, column))
    }

    /// Returns the selected cells in (section, row, column) order.
    pub fn selected_cells(&self) -> Vec<CellKey> {
        self.selected.read().iter().copied().collect()
    }

    fn with_section_ref<R>(&self, section: usize, default: R, f: impl FnOnce(&GridSection) -> R) -> R {
        self.sections.read().get(section).map_or(default, f)
    }

    fn header_view(&self, index: ItemIndex, position: usize, orientation: Orientation) -> Option<GridView> {
        let extractor = self.header_extractor.as_ref()?;
        let title = extractor(index.section, position, orientation)?;
        let kind = match orientation {
            Orientation::Horizontal => GridViewKind::ColumnHeader(position),
            Orientation::Vertical => GridViewKind::RowHeader(position),
        };
        Some(GridView { index, kind, title })
    }
}

/// Renumbers a cell key after `removed` was deleted; keys in it are dropped.
fn shift_after_removal((section, row, column): CellKey, removed: usize) -> Option<CellKey> {
    match section.cmp(&removed) {
        std::cmp::Ordering::Less => Some((section, row, column)),
        std::cmp::Ordering::Equal => None,
        std::cmp::Ordering::Greater => Some((section - 1, row, column)),
    }
}

impl TableDataSource for GridTableSource {
    type Cell = GridCell;
    type View = GridView;

    fn section_count(&self) -> usize {
        self.sections.read().len()
    }

    fn column_count(&self, section: usize) -> usize {
        self.with_section_ref(section, 0, |s| s.columns)
    }

    fn row_count(&self, section: usize) -> usize {
        self.with_section_ref(section, 0, |s| s.rows)
    }

    fn column_width(&self, column: usize, section: usize) -> f32 {
        self.with_section_ref(section, 0.0, |s| s.column_width(column))
    }

    fn row_height(&self, row: usize, section: usize) -> f32 {
        self.with_section_ref(section, 0.0, |s| s.row_height(row))
    }

    fn cell(&self, row: usize, column: usize, index: ItemIndex) -> GridCell {
        GridCell {
            index,
            row,
            column,
            text: (self.cell_extractor)(index.section, row, column),
        }
    }

    fn as_header_extents(&self) -> Option<&dyn HeaderExtents> {
        Some(self)
    }

    fn as_header_content(&self) -> Option<&dyn HeaderContent<View = GridView>> {
        Some(self)
    }

    fn as_column_backgrounds(&self) -> Option<&dyn ColumnBackgrounds<View = GridView>> {
        if self.column_backgrounds {
            Some(self)
        } else {
            None
        }
    }

    fn as_sticky_headers(&self) -> Option<&dyn StickyHeaders> {
        Some(self)
    }

    fn as_cell_selection(&self) -> Option<&dyn CellSelection> {
        Some(self)
    }
}

impl HeaderExtents for GridTableSource {
    fn row_header_width(&self, section: usize) -> f32 {
        self.with_section_ref(section, 0.0, |s| s.row_header_width)
    }

    fn column_header_height(&self, section: usize) -> f32 {
        self.with_section_ref(section, 0.0, |s| s.column_header_height)
    }
}

impl HeaderContent for GridTableSource {
    type View = GridView;

    fn column_header(&self, column: usize, index: ItemIndex) -> Option<GridView> {
        self.header_view(index, column, Orientation::Horizontal)
    }

    fn row_header(&self, row: usize, index: ItemIndex) -> Option<GridView> {
        self.header_view(index, row, Orientation::Vertical)
    }
}

impl ColumnBackgrounds for GridTableSource {
    type View = GridView;

    fn column_background(&self, index: ItemIndex) -> GridView {
        GridView {
            index,
            kind: GridViewKind::ColumnBackground,
            title: String::new(),
        }
    }
}

impl StickyHeaders for GridTableSource {
    fn sticky_row_headers(&self, section: usize) -> bool {
        self.with_section_ref(section, false, |s| s.sticky_row_headers)
    }

    fn sticky_column_headers(&self, section: usize) -> bool {
        self.with_section_ref(section, false, |s| s.sticky_column_headers)
    }
}

impl CellSelection for GridTableSource {
    fn did_select(&self, row: usize, column: usize, index: ItemIndex) {
        self.selected.write().insert((index.section, row, column));
    }

    fn did_deselect(&self, row: usize, column: usize, index: ItemIndex) {
        self.selected.write().remove(&(index.section, row, column));
    }

    fn should_select(&self, row: usize, column: usize, index: ItemIndex) -> bool {
        !self.unselectable.read().contains(&(index.section, row, column))
    }
}
