//! Row-range invalidation that survives an open editor.

use std::ops::Range;

use crate::widget::GridWidget;

/// Re-render rows `[rows.start, rows.end)`.
///
/// Redrawing a row can reset an editor open on it. If the active cell is in
/// the range and its editor held a changed value, that value is put back
/// after the redraw.
pub fn invalidate_range<W: GridWidget + ?Sized>(grid: &mut W, rows: Range<usize>) {
    let editor = grid.cell_editor();

    let indices: Vec<usize> = rows.clone().collect();
    grid.invalidate_rows(&indices);
    grid.render();

    let Some(editor) = editor else {
        return;
    };
    let in_range = grid.active_cell().is_some_and(|c| rows.contains(&c.row));
    if in_range && editor.changed && !editor.value.is_null() {
        log::trace!("[invalidate] restoring editor value {}", editor.value);
        grid.set_editor_value(editor.value);
    }
}
