//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use gridbind::headless;
use gridbind::prelude::*;
use serde_json::json;
use simplelog::{Config, LevelFilter, TestLogger};

pub type Binding = GridBinding<fn(GridSetup<'_>) -> HeadlessGrid>;

pub fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

pub fn col(id: &str, name: &str) -> ColumnDefinition {
    ColumnDefinition::new(id, name, id.to_lowercase())
}

pub fn heroes_columns() -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::new("colId", "Id", "id").sortable(),
        ColumnDefinition::new("colName", "Name", "name").sortable(),
        ColumnDefinition::new("colCreatedDate", "Created", "createdDate"),
    ]
}

/// `rows` hero records with ids `0..rows`.
pub fn heroes_data(rows: usize) -> SharedDataSource {
    let records = (0..rows)
        .map(|i| json!({"id": i, "name": format!("Hero {i}"), "createdDate": "2024-01-01"}))
        .collect();
    gridbind::data::shared(VecDataSource::new(records))
}

pub fn binding(options: GridOptions) -> (Binding, EventCollector) {
    init_logging();
    let factory: fn(GridSetup<'_>) -> HeadlessGrid = HeadlessGrid::new;
    let mut binding = GridBinding::new(factory, options, headless::registry());
    let events = EventCollector::new();
    binding.subscribe(events.callback());
    (binding, events)
}

/// Binding with the hero columns over `rows` rows, with the creation calls
/// and events already drained.
pub fn loaded(options: GridOptions, rows: usize) -> (Binding, EventCollector) {
    let (mut binding, events) = binding(options);
    binding.apply(
        PropertyChanges::new()
            .columns(heroes_columns())
            .data_source(heroes_data(rows)),
    );
    grid(&mut binding).take_calls();
    events.clear();
    (binding, events)
}

pub fn grid(binding: &mut Binding) -> &mut HeadlessGrid {
    binding.grid_mut().expect("grid should be created")
}

pub fn row_events(events: &[HostEvent]) -> Vec<HostEvent> {
    events
        .iter()
        .filter(|e| matches!(e, HostEvent::RowEditBegin { .. } | HostEvent::RowEditExit { .. }))
        .cloned()
        .collect()
}

pub fn begin_edit(binding: &mut Binding, row: usize, column_id: &str) -> EventResult {
    binding.handle_event(GridEvent::BeforeEditCell {
        row,
        column_id: column_id.to_string(),
    })
}

pub fn change_cell(binding: &mut Binding, row: usize, column_id: &str, value: CellValue) -> EventResult {
    binding.handle_event(GridEvent::CellChanged {
        row,
        column_id: column_id.to_string(),
        value,
    })
}
