//! Cursor, editor and range types shared by the reconciler and the widget.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::data::CellValue;

/// Ordinal of the row-header (gutter) column. Data columns start at 1.
pub const HEADER_COLUMN: usize = 0;

/// The widget's focused cell.
///
/// `cell` is a grid ordinal: 0 is the row header, data column `i` sits at
/// ordinal `i + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveCell {
    pub row: usize,
    pub cell: usize,
}

impl ActiveCell {
    pub fn new(row: usize, cell: usize) -> Self {
        Self { row, cell }
    }

    /// True when the cursor sits on the row header.
    pub fn is_header(&self) -> bool {
        self.cell == HEADER_COLUMN
    }

    /// Data-column position under the cursor. The header maps to column 0.
    pub fn data_column(&self) -> usize {
        self.cell.saturating_sub(1)
    }
}

/// Snapshot of an open cell editor.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    /// Current (pending) value in the editor.
    pub value: CellValue,
    /// Whether the pending value differs from the value the editor opened with.
    pub changed: bool,
}

/// Inclusive rectangular cell range, as reported by selection models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRange {
    pub start_row: usize,
    pub end_row: usize,
    pub start_column: usize,
    pub end_column: usize,
}

impl CellRange {
    /// Range from two corners, normalized so start <= end.
    pub fn new(from_row: usize, from_cell: usize, to_row: usize, to_cell: usize) -> Self {
        Self {
            start_row: from_row.min(to_row),
            end_row: from_row.max(to_row),
            start_column: from_cell.min(to_cell),
            end_column: from_cell.max(to_cell),
        }
    }

    /// Single-cell range.
    pub fn cell(row: usize, cell: usize) -> Self {
        Self::new(row, cell, row, cell)
    }

    pub fn contains(&self, row: usize, cell: usize) -> bool {
        (self.start_row..=self.end_row).contains(&row)
            && (self.start_column..=self.end_column).contains(&cell)
    }

    /// Rows covered by this range.
    pub fn rows(&self) -> RangeInclusive<usize> {
        self.start_row..=self.end_row
    }
}
