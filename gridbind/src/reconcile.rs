//! Structural reconciliation.
//!
//! Decides whether a property change requires rebuilding the grid's column
//! and data binding, performs the rebuild, and keeps the cursor on the same
//! logical column across it.
//!
//! Within one pass the order is fixed: columns are replaced, then data is
//! rebound, then the cursor is restored, then the editor is reopened.

use crate::column::{ColumnDefinition, position_of};
use crate::cursor::{ActiveCell, HEADER_COLUMN};
use crate::data::SharedDataSource;
use crate::widget::GridWidget;

/// One reconciliation request.
#[derive(Debug, Clone, Copy, Default)]
pub struct Change<'a> {
    /// Columns the grid was last built with.
    pub previous_columns: Option<&'a [ColumnDefinition]>,
    /// Columns requested by the host.
    pub current_columns: Option<&'a [ColumnDefinition]>,
    /// `Some` when the data source identity changed, holding the new source.
    pub data: Option<Option<&'a SharedDataSource>>,
}

impl Change<'_> {
    /// Whether the column sequences differ in any field of any entry.
    pub fn columns_changed(&self) -> bool {
        self.previous_columns != self.current_columns
    }

    pub fn data_changed(&self) -> bool {
        self.data.is_some()
    }

    /// Whether this change requires a structural rebuild.
    pub fn is_structural(&self) -> bool {
        self.columns_changed() || self.data_changed()
    }
}

/// What a reconciliation pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// The widget was created during this pass.
    pub created: bool,
    pub columns_replaced: bool,
    pub data_refreshed: bool,
    /// Active cell reasserted after the rebuild; `None` means it was cleared.
    pub cursor: Option<ActiveCell>,
    pub editor_reopened: bool,
}

impl ReconcileReport {
    pub fn is_structural(&self) -> bool {
        self.columns_replaced || self.data_refreshed
    }
}

/// Where the cursor should land after the column set changes.
///
/// The column under the cursor is looked up by id in the new sequence. If it
/// survived, the cursor follows it; otherwise it falls back to the row
/// header. An empty or absent new sequence leaves no cursor at all.
pub fn relocate_cursor(
    active: ActiveCell,
    previous: Option<&[ColumnDefinition]>,
    current: Option<&[ColumnDefinition]>,
) -> Option<ActiveCell> {
    let current = current.filter(|c| !c.is_empty())?;

    let cell = previous
        .and_then(|prev| prev.get(active.data_column()))
        .and_then(|column| position_of(current, &column.id))
        .map_or(HEADER_COLUMN, |k| k + 1);

    Some(ActiveCell::new(active.row, cell))
}

/// Run one reconciliation pass against the grid in `slot`.
///
/// `create` builds the widget when `slot` is empty and the columns changed.
/// A data source change with no grid yet does nothing; the caller keeps the
/// source and hands it to `create` later.
pub fn reconcile<W, C>(slot: &mut Option<W>, change: Change<'_>, create: C) -> ReconcileReport
where
    W: GridWidget,
    C: FnOnce(&[ColumnDefinition]) -> W,
{
    let mut report = ReconcileReport::default();
    if !change.is_structural() {
        return report;
    }

    let (mut cursor, was_editing) = match slot.as_ref() {
        Some(grid) => (grid.active_cell(), grid.cell_editor().is_some()),
        None => (None, false),
    };

    if change.columns_changed() {
        let current = change.current_columns.unwrap_or_default();
        match slot.as_mut() {
            Some(grid) => {
                log::debug!("[reconcile] replacing {} columns", current.len());
                grid.reset_active_cell();
                grid.set_columns(current);
            }
            None => {
                log::debug!("[reconcile] creating grid with {} columns", current.len());
                *slot = Some(create(current));
                report.created = true;
            }
        }
        report.columns_replaced = true;
        cursor = cursor.and_then(|active| {
            relocate_cursor(active, change.previous_columns, change.current_columns)
        });
    }

    let Some(grid) = slot.as_mut() else {
        log::debug!("[reconcile] data source changed before the grid exists");
        return report;
    };

    if let Some(data) = change.data {
        grid.set_data_source(data.cloned());
        grid.update_row_count();
        let columns = grid.columns();
        grid.set_columns(&columns);
        grid.invalidate_all_rows();
        grid.render();
        report.data_refreshed = true;
    }

    let row_count = grid.row_count();
    let restored = cursor.filter(|c| c.row < row_count);
    match restored {
        Some(c) => grid.set_active_cell(c.row, c.cell),
        None => {
            if let Some(c) = cursor {
                log::debug!(
                    "[reconcile] dropping cursor on row {} (row count {})",
                    c.row,
                    row_count
                );
            }
            grid.reset_active_cell();
        }
    }
    report.cursor = restored;

    if was_editing && restored.is_some() {
        grid.edit_active_cell();
        report.editor_reopened = true;
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(id: &str, name: &str) -> ColumnDefinition {
        ColumnDefinition::new(id, name, id.to_lowercase())
    }

    #[test]
    fn test_column_gained_ahead_of_cursor() {
        let previous = vec![col("A", "Id")];
        let current = vec![col("B", "Name"), col("A", "Id")];
        let moved = relocate_cursor(ActiveCell::new(3, 1), Some(previous.as_slice()), Some(current.as_slice()));
        assert_eq!(moved, Some(ActiveCell::new(3, 2)));
    }

    #[test]
    fn test_column_removed_falls_back_to_header() {
        let previous = vec![col("A", "Id"), col("B", "Name")];
        let current = vec![col("A", "Id")];
        let moved = relocate_cursor(ActiveCell::new(0, 2), Some(previous.as_slice()), Some(current.as_slice()));
        assert_eq!(moved, Some(ActiveCell::new(0, HEADER_COLUMN)));
    }

    #[test]
    fn test_header_cursor_follows_first_column() {
        let previous = vec![col("A", "Id"), col("B", "Name")];
        let current = vec![col("B", "Name"), col("A", "Id")];
        let moved = relocate_cursor(ActiveCell::new(1, 0), Some(previous.as_slice()), Some(current.as_slice()));
        assert_eq!(moved, Some(ActiveCell::new(1, 2)));
    }

    #[test]
    fn test_no_previous_columns_falls_back_to_header() {
        let current = vec![col("A", "Id")];
        let moved = relocate_cursor(ActiveCell::new(1, 1), None, Some(current.as_slice()));
        assert_eq!(moved, Some(ActiveCell::new(1, HEADER_COLUMN)));
    }

    #[test]
    fn test_empty_or_absent_columns_discard_cursor() {
        let previous = vec![col("A", "Id")];
        let empty: Vec<ColumnDefinition> = Vec::new();
        assert_eq!(
            relocate_cursor(ActiveCell::new(0, 1), Some(previous.as_slice()), Some(empty.as_slice())),
            None
        );
        assert_eq!(relocate_cursor(ActiveCell::new(0, 1), Some(previous.as_slice()), None), None);
    }

    #[test]
    fn test_change_detection_is_deep() {
        let previous = vec![col("A", "Id")];
        let same = vec![col("A", "Id")];
        let wider = vec![col("A", "Id").width(80)];

        let unchanged = Change {
            previous_columns: Some(previous.as_slice()),
            current_columns: Some(same.as_slice()),
            data: None,
        };
        assert!(!unchanged.is_structural());

        let resized = Change {
            current_columns: Some(wider.as_slice()),
            ..unchanged
        };
        assert!(resized.columns_changed());

        let data_only = Change {
            data: Some(None),
            ..unchanged
        };
        assert!(data_only.is_structural());
        assert!(!data_only.columns_changed());
    }

    #[test]
    fn test_absent_and_empty_columns_differ() {
        let empty: Vec<ColumnDefinition> = Vec::new();
        let change = Change {
            previous_columns: None,
            current_columns: Some(empty.as_slice()),
            data: None,
        };
        assert!(change.columns_changed());
    }
}
