mod common;

use common::*;
use gridbind::prelude::*;
use serde_json::json;

fn editable(rows: usize) -> (Binding, EventCollector) {
    loaded(GridOptions::default().with_editing(true), rows)
}

// ============================================================================
// Row lifecycle
// ============================================================================

#[test]
fn test_single_exit_for_dirty_row() {
    let (mut binding, events) = editable(5);

    begin_edit(&mut binding, 1, "colName");
    change_cell(&mut binding, 1, "colName", json!("Renamed"));
    begin_edit(&mut binding, 2, "colName");
    begin_edit(&mut binding, 3, "colName");

    assert_eq!(
        row_events(&events.events()),
        vec![
            HostEvent::RowEditBegin { row: 1 },
            HostEvent::RowEditExit { row: 1 },
            HostEvent::RowEditBegin { row: 2 },
            HostEvent::RowEditBegin { row: 3 },
        ]
    );
}

#[test]
fn test_clean_rows_never_exit() {
    let (mut binding, events) = editable(5);

    begin_edit(&mut binding, 1, "colId");
    begin_edit(&mut binding, 2, "colId");

    assert_eq!(
        row_events(&events.events()),
        vec![HostEvent::RowEditBegin { row: 1 }, HostEvent::RowEditBegin { row: 2 }]
    );
}

#[test]
fn test_same_row_edits_stay_in_session() {
    let (mut binding, events) = editable(5);

    begin_edit(&mut binding, 4, "colId");
    change_cell(&mut binding, 4, "colId", json!(40));
    begin_edit(&mut binding, 4, "colName");
    change_cell(&mut binding, 4, "colName", json!("Forty"));

    assert_eq!(row_events(&events.events()), vec![HostEvent::RowEditBegin { row: 4 }]);
    assert_eq!(binding.session().active_row(), Some(4));
    assert!(binding.session().has_changes());
}

#[test]
fn test_header_of_next_row_exits_without_entering() {
    let (mut binding, events) = editable(5);

    begin_edit(&mut binding, 1, "colName");
    change_cell(&mut binding, 1, "colName", json!("Renamed"));
    events.clear();

    let result = binding.handle_event(GridEvent::ActiveCellChanged {
        row: 2,
        cell: HEADER_COLUMN,
    });

    assert_eq!(result, EventResult::Handled);
    assert_eq!(
        events.events(),
        vec![
            HostEvent::ActiveRowChanged { row: 2 },
            HostEvent::RowEditExit { row: 1 },
        ]
    );
    assert_eq!(binding.session().active_row(), None);

    // The next begin on any row is a fresh entry with no exit.
    events.clear();
    begin_edit(&mut binding, 1, "colName");
    assert_eq!(row_events(&events.events()), vec![HostEvent::RowEditBegin { row: 1 }]);
}

#[test]
fn test_data_cell_navigation_keeps_session() {
    let (mut binding, events) = editable(5);

    begin_edit(&mut binding, 1, "colName");
    change_cell(&mut binding, 1, "colName", json!("Renamed"));
    events.clear();

    binding.handle_event(GridEvent::ActiveCellChanged { row: 2, cell: 1 });

    assert_eq!(events.events(), vec![HostEvent::ActiveRowChanged { row: 2 }]);
    assert_eq!(binding.session().active_row(), Some(1));
}

#[test]
fn test_header_navigation_ignored_when_not_editable() {
    let (mut binding, events) = editable(5);

    begin_edit(&mut binding, 1, "colName");
    change_cell(&mut binding, 1, "colName", json!("Renamed"));
    binding.end_edit_session();
    events.clear();

    binding.handle_event(GridEvent::ActiveCellChanged { row: 2, cell: 0 });

    assert_eq!(events.events(), vec![HostEvent::ActiveRowChanged { row: 2 }]);
    assert!(binding.session().has_changes());
}

#[test]
fn test_change_before_any_begin_is_ignored() {
    let (mut binding, events) = editable(5);

    change_cell(&mut binding, 0, "colId", json!(9));
    begin_edit(&mut binding, 0, "colId");
    begin_edit(&mut binding, 1, "colId");

    assert_eq!(
        row_events(&events.events()),
        vec![HostEvent::RowEditBegin { row: 0 }, HostEvent::RowEditBegin { row: 1 }]
    );
}

// ============================================================================
// Cell events
// ============================================================================

#[test]
fn test_cell_events_carry_data_column_index() {
    let (mut binding, events) = editable(5);

    begin_edit(&mut binding, 2, "colCreatedDate");
    change_cell(&mut binding, 2, "colCreatedDate", json!("2025-06-01"));

    assert_eq!(
        events.events(),
        vec![
            HostEvent::RowEditBegin { row: 2 },
            HostEvent::CellEditBegin { row: 2, column: 2 },
            HostEvent::CellEditExit {
                row: 2,
                column: 2,
                new_value: json!("2025-06-01")
            },
        ]
    );
}

#[test]
fn test_row_exit_precedes_cell_begin() {
    let (mut binding, events) = editable(5);

    begin_edit(&mut binding, 0, "colName");
    change_cell(&mut binding, 0, "colName", json!("Zero"));
    events.clear();
    begin_edit(&mut binding, 3, "colId");

    assert_eq!(
        events.events(),
        vec![
            HostEvent::RowEditExit { row: 0 },
            HostEvent::RowEditBegin { row: 3 },
            HostEvent::CellEditBegin { row: 3, column: 0 },
        ]
    );
}

#[test]
fn test_unknown_column_skips_cell_event_but_tracks_row() {
    let (mut binding, events) = editable(5);

    let result = begin_edit(&mut binding, 1, "colMissing");
    change_cell(&mut binding, 1, "colMissing", json!(1));

    assert_eq!(result, EventResult::Handled);
    assert_eq!(events.events(), vec![HostEvent::RowEditBegin { row: 1 }]);
    assert!(binding.session().has_changes());
}

#[test]
fn test_cell_index_follows_column_replacement() {
    let (mut binding, events) = editable(5);
    binding.apply(PropertyChanges::new().columns(vec![
        ColumnDefinition::new("colName", "Name", "name"),
        ColumnDefinition::new("colId", "Id", "id"),
    ]));
    events.clear();

    begin_edit(&mut binding, 0, "colId");
    assert_eq!(events.events().last(), Some(&HostEvent::CellEditBegin { row: 0, column: 1 }));
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn test_destroy_discards_dirty_session_silently() {
    let (mut binding, events) = editable(5);

    begin_edit(&mut binding, 1, "colName");
    change_cell(&mut binding, 1, "colName", json!("Renamed"));
    events.clear();

    binding.destroy();

    assert!(events.is_empty());
    assert!(binding.grid().is_none());
    assert_eq!(binding.session().active_row(), None);
    assert_eq!(
        binding.handle_event(GridEvent::BeforeEditCell {
            row: 2,
            column_id: "colName".to_string()
        }),
        EventResult::Ignored
    );
    assert!(events.is_empty());
}

#[test]
fn test_recreated_grid_starts_idle() {
    let (mut binding, events) = editable(5);
    begin_edit(&mut binding, 1, "colName");
    change_cell(&mut binding, 1, "colName", json!("Renamed"));
    binding.destroy();
    events.clear();

    binding.apply(
        PropertyChanges::new()
            .columns(heroes_columns())
            .data_source(heroes_data(3)),
    );
    begin_edit(&mut binding, 2, "colName");

    assert_eq!(
        row_events(&events.events()),
        vec![HostEvent::RowEditBegin { row: 2 }]
    );
    assert_eq!(events.events().first(), Some(&HostEvent::LoadFinished));
}
