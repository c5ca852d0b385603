//! Row-level edit session tracking.
//!
//! The widget only reports cell-level signals. [`EditSession`] folds them
//! into a row lifecycle: a row is entered on its first begin-edit, and
//! exited when the cursor leaves it, but only if something in it actually
//! changed.

use crate::cursor::HEADER_COLUMN;

/// Row transitions produced by one cell-level event, in emission order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowTransition {
    /// Row whose dirty session was closed.
    pub exited: Option<usize>,
    /// Row whose session was opened.
    pub entered: Option<usize>,
}

impl RowTransition {
    pub fn is_empty(&self) -> bool {
        self.exited.is_none() && self.entered.is_none()
    }
}

/// State of the logical row edit session.
///
/// `Idle` while `active_row` is `None`, otherwise editing that row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    active_row: Option<usize>,
    has_changes: bool,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row currently being edited.
    pub fn active_row(&self) -> Option<usize> {
        self.active_row
    }

    /// Whether the current row has uncommitted changes.
    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    /// An editor is opening on `row`.
    pub fn begin_cell_edit(&mut self, row: usize) -> RowTransition {
        let mut transition = RowTransition::default();
        if self.active_row == Some(row) {
            return transition;
        }

        if self.has_changes {
            transition.exited = self.active_row;
            self.has_changes = false;
        }

        self.active_row = Some(row);
        transition.entered = Some(row);
        transition
    }

    /// A cell value was committed in the current row.
    ///
    /// Ignored while idle: there is no row to attribute the change to.
    pub fn record_change(&mut self) {
        if self.active_row.is_some() {
            self.has_changes = true;
        } else {
            log::trace!("[session] value change with no active row");
        }
    }

    /// The cursor moved to `(row, cell)`.
    ///
    /// Only a move onto the row header of another row, with editing enabled
    /// and unsaved changes pending, closes the session. It does not open a
    /// new one since the header is not editable.
    pub fn active_cell_changed(&mut self, row: usize, cell: usize, editing_enabled: bool) -> RowTransition {
        if !editing_enabled || cell != HEADER_COLUMN {
            return RowTransition::default();
        }

        match self.active_row {
            Some(previous) if previous != row && self.has_changes => {
                self.reset();
                RowTransition {
                    exited: Some(previous),
                    entered: None,
                }
            }
            _ => RowTransition::default(),
        }
    }

    /// Drop any open session without reporting an exit.
    pub fn discard(&mut self) {
        if let Some(row) = self.active_row {
            log::debug!(
                "[session] discarding session on row {} (unsaved changes: {})",
                row,
                self.has_changes
            );
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.active_row = None;
        self.has_changes = false;
    }
}
