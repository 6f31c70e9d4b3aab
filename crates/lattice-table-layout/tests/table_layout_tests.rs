//! Integration tests for the table layout manager driven through the surface
//! protocols.

use std::collections::HashSet;
use std::sync::Arc;

use lattice_table_layout::{
    Axis, CellSelection, CollectionSource, GridSection, GridTableSource, GridViewKind,
    HeaderExtents, ItemContent, ItemIndex, LayoutError, Orientation, Rect, SelectionDelegate,
    Size, TableDataSource, TableGeometry, TableItem, TableLayoutManager,
};
use parking_lot::Mutex;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A source implementing only the required interface.
struct PlainSource {
    rows: usize,
    columns: usize,
}

impl TableDataSource for PlainSource {
    type Cell = (usize, usize);
    type View = String;

    fn section_count(&self) -> usize {
        1
    }
    fn column_count(&self, _section: usize) -> usize {
        self.columns
    }
    fn row_count(&self, _section: usize) -> usize {
        self.rows
    }
    fn column_width(&self, column: usize, _section: usize) -> f32 {
        10.0 * (column + 1) as f32
    }
    fn row_height(&self, _row: usize, _section: usize) -> f32 {
        20.0
    }
    fn cell(&self, row: usize, column: usize, _index: ItemIndex) -> (usize, usize) {
        (row, column)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Select(usize, usize, ItemIndex),
    Deselect(usize, usize, ItemIndex),
}

/// A source with headers that records selection callbacks and vetoes one cell.
struct RecordingSource {
    rows: usize,
    columns: usize,
    row_header_width: f32,
    column_header_height: f32,
    veto: Option<(usize, usize)>,
    events: Mutex<Vec<Event>>,
}

impl RecordingSource {
    fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            row_header_width: 0.0,
            column_header_height: 0.0,
            veto: None,
            events: Mutex::new(Vec::new()),
        }
    }

    fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }
}

impl TableDataSource for RecordingSource {
    type Cell = (usize, usize);
    type View = String;

    fn section_count(&self) -> usize {
        1
    }
    fn column_count(&self, _section: usize) -> usize {
        self.columns
    }
    fn row_count(&self, _section: usize) -> usize {
        self.rows
    }
    fn column_width(&self, _column: usize, _section: usize) -> f32 {
        50.0
    }
    fn row_height(&self, _row: usize, _section: usize) -> f32 {
        25.0
    }
    fn cell(&self, row: usize, column: usize, _index: ItemIndex) -> (usize, usize) {
        (row, column)
    }

    fn as_header_extents(&self) -> Option<&dyn HeaderExtents> {
        Some(self)
    }
    fn as_cell_selection(&self) -> Option<&dyn CellSelection> {
        Some(self)
    }
}

impl HeaderExtents for RecordingSource {
    fn row_header_width(&self, _section: usize) -> f32 {
        self.row_header_width
    }
    fn column_header_height(&self, _section: usize) -> f32 {
        self.column_header_height
    }
}

impl CellSelection for RecordingSource {
    fn did_select(&self, row: usize, column: usize, index: ItemIndex) {
        self.events.lock().push(Event::Select(row, column, index));
    }
    fn did_deselect(&self, row: usize, column: usize, index: ItemIndex) {
        self.events.lock().push(Event::Deselect(row, column, index));
    }
    fn should_select(&self, row: usize, column: usize, _index: ItemIndex) -> bool {
        self.veto != Some((row, column))
    }
}

fn items(manager: &TableLayoutManager<impl TableDataSource>, section: usize) -> Vec<TableItem> {
    let count = manager.item_count(section).unwrap();
    (0..count)
        .map(|item| manager.table_item(ItemIndex::new(section, item)).unwrap())
        .collect()
}

// =========================================================================
// Item counts and decoding
// =========================================================================

#[test]
fn test_plain_grid_decodes_every_cell_once() {
    setup();
    let source = Arc::new(PlainSource { rows: 4, columns: 5 });
    let manager = TableLayoutManager::new().with_source(&source);

    assert_eq!(manager.section_count(), 1);
    assert_eq!(manager.item_count(0).unwrap(), 20);

    let cells: HashSet<TableItem> = items(&manager, 0).into_iter().collect();
    assert_eq!(cells.len(), 20);
    assert!(cells.iter().all(TableItem::is_cell));
}

#[test]
fn test_header_slots_add_rows_and_columns() {
    setup();
    let mut recording = RecordingSource::new(4, 6);
    recording.row_header_width = 30.0;
    let source = Arc::new(recording);
    let manager = TableLayoutManager::new().with_source(&source);
    assert_eq!(manager.item_count(0).unwrap(), 24 + 4);

    let mut recording = RecordingSource::new(4, 6);
    recording.column_header_height = 18.0;
    let source = Arc::new(recording);
    let manager = TableLayoutManager::new().with_source(&source);
    assert_eq!(manager.item_count(0).unwrap(), 24 + 6);

    let mut recording = RecordingSource::new(4, 6);
    recording.row_header_width = 30.0;
    recording.column_header_height = 18.0;
    let source = Arc::new(recording);
    let manager = TableLayoutManager::new().with_source(&source);
    assert_eq!(manager.item_count(0).unwrap(), 24 + 4 + 6);
}

#[test]
fn test_three_by_two_with_headers_has_eleven_items() {
    setup();
    let source = Arc::new(GridTableSource::new().with_section(
        GridSection::new(3, 2)
            .with_row_headers(40.0)
            .with_column_headers(20.0),
    ));
    let manager = TableLayoutManager::new().with_source(&source);
    assert_eq!(manager.item_count(0).unwrap(), 11);
}

#[test]
fn test_cell_index_round_trip() {
    setup();
    let source = Arc::new(GridTableSource::new().with_section(
        GridSection::new(5, 3)
            .with_row_headers(40.0)
            .with_column_headers(20.0),
    ));
    let manager = TableLayoutManager::new().with_source(&source);

    for row in 0..5 {
        for column in 0..3 {
            let index = manager.index_of_cell(0, row, column).unwrap();
            assert_eq!(
                manager.table_item(index).unwrap(),
                TableItem::Cell { row, column }
            );
        }
    }
    let header = manager.index_of_row_header(0, 2).unwrap();
    assert_eq!(manager.table_item(header).unwrap(), TableItem::RowHeader { row: 2 });
    let header = manager.index_of_column_header(0, 1).unwrap();
    assert_eq!(header, ItemIndex::new(0, 1));
}

#[test]
fn test_out_of_range_items() {
    setup();
    let source = Arc::new(PlainSource { rows: 3, columns: 2 });
    let manager = TableLayoutManager::new().with_source(&source);

    let err = manager.item_content(ItemIndex::new(0, 6)).unwrap_err();
    assert_eq!(err, LayoutError::out_of_range(Axis::Item, 0, 6, 6));

    let err = manager.item_count(1).unwrap_err();
    assert_eq!(err.axis(), Some(Axis::Section));

    let err = manager.should_select(ItemIndex::new(3, 0)).unwrap_err();
    assert_eq!(err.axis(), Some(Axis::Section));
}

#[test]
fn test_empty_sections_have_no_items() {
    setup();
    for (rows, columns) in [(0, 4), (4, 0)] {
        let source = Arc::new(PlainSource { rows, columns });
        let manager = TableLayoutManager::new().with_source(&source);
        assert_eq!(manager.item_count(0).unwrap(), 0);
        assert!(matches!(
            manager.item_content(ItemIndex::new(0, 0)),
            Err(LayoutError::OutOfRange { axis: Axis::Item, .. })
        ));
    }
}

// =========================================================================
// Content
// =========================================================================

#[test]
fn test_item_content_passes_linear_identity() {
    setup();
    let source = Arc::new(
        GridTableSource::new()
            .with_section(
                GridSection::new(2, 2)
                    .with_row_headers(40.0)
                    .with_column_headers(20.0),
            )
            .with_cells(|_, row, column| format!("{row}x{column}"))
            .with_headers(|_, position, orientation| match orientation {
                Orientation::Horizontal => Some(format!("col {position}")),
                Orientation::Vertical => Some(format!("row {position}")),
            }),
    );
    let manager = TableLayoutManager::new().with_source(&source);

    // Items: C0 C1 | R0 (0,0) (0,1) | R1 (1,0) (1,1)
    let index = ItemIndex::new(0, 7);
    let cell = manager.item_content(index).unwrap().unwrap().into_cell().unwrap();
    assert_eq!((cell.row, cell.column), (1, 1));
    assert_eq!(cell.index, index);
    assert_eq!(cell.text, "1x1");

    let Some(ItemContent::ColumnHeader(view)) = manager.item_content(ItemIndex::new(0, 1)).unwrap()
    else {
        panic!("expected a column header");
    };
    assert_eq!(view.kind, GridViewKind::ColumnHeader(1));
    assert_eq!(view.title, "col 1");

    let Some(ItemContent::RowHeader(view)) = manager.item_content(ItemIndex::new(0, 5)).unwrap()
    else {
        panic!("expected a row header");
    };
    assert_eq!(view.title, "row 1");
    assert_eq!(view.index, ItemIndex::new(0, 5));
}

#[test]
fn test_headers_without_content_capability_are_empty() {
    setup();
    let mut recording = RecordingSource::new(2, 2);
    recording.column_header_height = 20.0;
    let source = Arc::new(recording);
    let manager = TableLayoutManager::new().with_source(&source);

    assert_eq!(manager.item_content(ItemIndex::new(0, 0)).unwrap(), None);
    assert_eq!(
        manager.item_content(ItemIndex::new(0, 2)).unwrap(),
        Some(ItemContent::Cell((0, 0)))
    );
}

// =========================================================================
// Optional capabilities
// =========================================================================

#[test]
fn test_source_without_optional_capabilities() {
    setup();
    let source = Arc::new(PlainSource { rows: 2, columns: 3 });
    let manager = TableLayoutManager::new().with_source(&source);

    assert!(manager.capabilities().is_empty());
    assert_eq!(manager.row_header_width(0), 0.0);
    assert_eq!(manager.column_header_height(0), 0.0);
    assert!(!manager.sticky_row_headers(0));
    assert!(!manager.sticky_column_headers(0));
    assert_eq!(manager.column_header_view(0, ItemIndex::new(0, 0)), None);
    assert_eq!(manager.row_header_view(0, ItemIndex::new(0, 0)), None);
    assert_eq!(manager.column_background_view(ItemIndex::new(0, 0)), None);
    assert_eq!(manager.column_background(0, 1).unwrap(), None);

    assert!(items(&manager, 0).iter().all(TableItem::is_cell));
    for item in 0..6 {
        let index = ItemIndex::new(0, item);
        assert!(manager.should_select(index).unwrap());
        manager.did_select(index).unwrap();
        manager.did_deselect(index).unwrap();
    }
}

#[test]
fn test_geometry_relays() {
    setup();
    let source = Arc::new(
        GridTableSource::new()
            .with_section(
                GridSection::new(2, 3)
                    .with_column_widths(vec![60.0, 70.0, 80.0])
                    .with_row_heights(vec![30.0, 32.0])
                    .with_row_headers(44.0)
                    .with_column_headers(22.0)
                    .with_sticky_row_headers(true),
            )
            .with_column_backgrounds(true),
    );
    let manager = TableLayoutManager::new().with_source(&source);

    assert_eq!(manager.column_width(2, 0), 80.0);
    assert_eq!(manager.row_height(1, 0), 32.0);
    assert_eq!(manager.row_header_width(0), 44.0);
    assert_eq!(manager.column_header_height(0), 22.0);
    assert!(manager.sticky_row_headers(0));
    assert!(!manager.sticky_column_headers(0));

    let background = manager.column_background(0, 2).unwrap().unwrap();
    assert_eq!(background.kind, GridViewKind::ColumnBackground);
    assert_eq!(background.index, ItemIndex::new(0, 2));
    assert_eq!(
        manager.column_background(0, 3).unwrap_err().axis(),
        Some(Axis::Column)
    );
}

// =========================================================================
// Selection routing
// =========================================================================

#[test]
fn test_headers_are_never_selectable() {
    setup();
    let mut recording = RecordingSource::new(3, 3);
    recording.row_header_width = 30.0;
    recording.column_header_height = 20.0;
    let source = Arc::new(recording);
    let manager = TableLayoutManager::new().with_source(&source);

    for (item, decoded) in items(&manager, 0).into_iter().enumerate() {
        let index = ItemIndex::new(0, item);
        assert_eq!(manager.should_select(index).unwrap(), decoded.is_cell());
    }
}

#[test]
fn test_should_select_veto_applies_to_one_cell() {
    setup();
    let mut recording = RecordingSource::new(3, 3);
    recording.veto = Some((1, 1));
    let source = Arc::new(recording);
    let manager = TableLayoutManager::new().with_source(&source);

    for row in 0..3 {
        for column in 0..3 {
            let index = manager.index_of_cell(0, row, column).unwrap();
            assert_eq!(
                manager.should_select(index).unwrap(),
                (row, column) != (1, 1)
            );
        }
    }
}

#[test]
fn test_selection_events_are_routed_to_grid_coordinates() {
    setup();
    let mut recording = RecordingSource::new(2, 2);
    recording.row_header_width = 30.0;
    let source = Arc::new(recording);
    let manager = TableLayoutManager::new().with_source(&source);

    // Items: R0 (0,0) (0,1) | R1 (1,0) (1,1)
    manager.did_select(ItemIndex::new(0, 4)).unwrap();
    manager.did_select(ItemIndex::new(0, 3)).unwrap(); // row header
    manager.did_deselect(ItemIndex::new(0, 2)).unwrap();

    assert_eq!(
        source.events(),
        vec![
            Event::Select(1, 0, ItemIndex::new(0, 4)),
            Event::Deselect(0, 1, ItemIndex::new(0, 2)),
        ]
    );

    assert!(manager.did_select(ItemIndex::new(0, 6)).is_err());
    assert_eq!(source.events().len(), 2);
}

#[test]
fn test_grid_source_tracks_routed_selection() {
    setup();
    let source = Arc::new(GridTableSource::new().with_section(GridSection::new(2, 2)));
    source.set_cell_selectable(0, 0, 1, false);
    let manager = TableLayoutManager::new().with_source(&source);

    let index = manager.index_of_cell(0, 1, 0).unwrap();
    assert!(manager.should_select(index).unwrap());
    manager.did_select(index).unwrap();
    assert!(source.is_cell_selected(0, 1, 0));

    manager.did_deselect(index).unwrap();
    assert!(source.selected_cells().is_empty());

    let vetoed = manager.index_of_cell(0, 0, 1).unwrap();
    assert!(!manager.should_select(vetoed).unwrap());
}

// =========================================================================
// Aggregated geometry
// =========================================================================

#[test]
fn test_item_frames_and_section_size() {
    setup();
    let source = Arc::new(GridTableSource::new().with_section(
        GridSection::new(2, 2)
            .with_column_widths(vec![100.0, 50.0])
            .with_row_heights(vec![24.0, 30.0])
            .with_row_headers(40.0)
            .with_column_headers(20.0),
    ));
    let manager = TableLayoutManager::new().with_source(&source);

    let cell = manager.index_of_cell(0, 1, 1).unwrap();
    assert_eq!(manager.item_frame(cell).unwrap(), Rect::new(140.0, 44.0, 50.0, 30.0));
    assert_eq!(manager.item_size(cell).unwrap(), Size::new(50.0, 30.0));

    let row_header = manager.index_of_row_header(0, 1).unwrap();
    assert_eq!(manager.item_frame(row_header).unwrap(), Rect::new(0.0, 44.0, 40.0, 30.0));

    let column_header = manager.index_of_column_header(0, 1).unwrap();
    assert_eq!(
        manager.item_frame(column_header).unwrap(),
        Rect::new(140.0, 0.0, 50.0, 20.0)
    );

    assert_eq!(manager.section_size(0).unwrap(), Size::new(190.0, 74.0));

    let geometry = manager.section_geometry(0).unwrap();
    assert!(geometry.shape.row_headers && geometry.shape.column_headers);
    assert_eq!(geometry.row_header_width, 40.0);
}

#[test]
fn test_frames_without_headers_start_at_origin() {
    setup();
    let source = Arc::new(PlainSource { rows: 2, columns: 2 });
    let manager = TableLayoutManager::new().with_source(&source);

    assert_eq!(
        manager.item_frame(ItemIndex::new(0, 0)).unwrap(),
        Rect::new(0.0, 0.0, 10.0, 20.0)
    );
    assert_eq!(
        manager.item_frame(ItemIndex::new(0, 3)).unwrap(),
        Rect::new(10.0, 20.0, 20.0, 20.0)
    );
    assert_eq!(manager.section_size(0).unwrap(), Size::new(30.0, 40.0));
}

// =========================================================================
// Lifecycle
// =========================================================================

#[test]
fn test_manager_does_not_keep_source_alive() {
    setup();
    let source = Arc::new(GridTableSource::new().with_section(GridSection::new(2, 2)));
    let manager = TableLayoutManager::new().with_source(&source);
    assert!(manager.is_attached());
    assert_eq!(Arc::strong_count(&source), 1);

    drop(source);
    assert!(!manager.is_attached());
    assert_eq!(manager.section_count(), 0);
    assert_eq!(manager.item_count(0).unwrap(), 0);
    assert_eq!(manager.item_content(ItemIndex::new(0, 0)).unwrap(), None);
    assert_eq!(manager.column_width(0, 0), 0.0);
    assert_eq!(manager.item_frame(ItemIndex::new(0, 0)).unwrap(), Rect::ZERO);
    assert!(!manager.should_select(ItemIndex::new(0, 0)).unwrap());
    manager.did_select(ItemIndex::new(0, 0)).unwrap();
}

#[test]
fn test_detach_and_reattach() {
    setup();
    let first = Arc::new(GridTableSource::new().with_section(GridSection::new(1, 1)));
    let second = Arc::new(PlainSource { rows: 3, columns: 3 });

    let mut manager: TableLayoutManager<dyn TableDataSource<Cell = (usize, usize), View = String>> =
        TableLayoutManager::new();
    assert!(!manager.is_attached());

    let second: Arc<dyn TableDataSource<Cell = (usize, usize), View = String>> = second;
    manager.set_source(Some(&second));
    assert_eq!(manager.item_count(0).unwrap(), 9);

    manager.detach();
    assert!(manager.capabilities().is_empty());
    assert_eq!(manager.section_count(), 0);

    let mut grid_manager = TableLayoutManager::new().with_source(&first);
    assert!(grid_manager.capabilities().cell_selection);
    grid_manager.set_source(None);
    assert!(!grid_manager.is_attached());
}

#[test]
fn test_counts_are_read_fresh_on_every_query() {
    setup();
    let source = Arc::new(GridTableSource::new().with_section(GridSection::new(2, 2)));
    let manager = TableLayoutManager::new().with_source(&source);
    assert_eq!(manager.item_count(0).unwrap(), 4);

    source.modify_section(0, |section| {
        section.rows = 3;
        section.row_header_width = 40.0;
    });
    assert_eq!(manager.item_count(0).unwrap(), 9);
    assert_eq!(
        manager.table_item(ItemIndex::new(0, 6)).unwrap(),
        TableItem::RowHeader { row: 2 }
    );
}
