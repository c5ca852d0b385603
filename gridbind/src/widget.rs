//! The grid widget capability the binding drives.
//!
//! Rendering, layout, virtualization and editors all live behind
//! [`GridWidget`]. The binding only calls these methods; it never reaches
//! into widget state directly.

use crate::column::ColumnDefinition;
use crate::config::GridOptions;
use crate::cursor::{ActiveCell, EditorState};
use crate::data::{CellValue, SharedDataSource};
use crate::registry::{GridPlugin, SelectionModel};

/// Operations a grid widget exposes to the binding.
pub trait GridWidget {
    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    /// Current column set.
    fn columns(&self) -> Vec<ColumnDefinition>;

    /// Replace the column set.
    fn set_columns(&mut self, columns: &[ColumnDefinition]);

    fn set_options(&mut self, options: &GridOptions);

    /// Bind a (new) data source. Does not update the row count.
    fn set_data_source(&mut self, data: Option<SharedDataSource>);

    /// Re-read the row count from the bound data source.
    fn update_row_count(&mut self);

    /// Row count as of the last [`update_row_count`](Self::update_row_count).
    fn row_count(&self) -> usize;

    // -------------------------------------------------------------------------
    // Cursor and editor
    // -------------------------------------------------------------------------

    fn active_cell(&self) -> Option<ActiveCell>;

    fn set_active_cell(&mut self, row: usize, cell: usize);

    /// Clear the active cell (and close any editor).
    fn reset_active_cell(&mut self);

    /// The open cell editor, if any.
    fn cell_editor(&self) -> Option<EditorState>;

    /// Overwrite the pending value of the open editor. No-op without one.
    fn set_editor_value(&mut self, value: CellValue);

    /// Open an editor on the active cell. No-op without one.
    fn edit_active_cell(&mut self);

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Mark the given rows for re-render.
    fn invalidate_rows(&mut self, rows: &[usize]);

    fn invalidate_all_rows(&mut self);

    /// Invalidate everything, including row count and headers.
    fn invalidate(&mut self);

    /// Redraw whatever was invalidated.
    fn render(&mut self);

    /// Recompute the canvas size after the container resized.
    fn resize_canvas(&mut self);

    fn scroll_row_to_top(&mut self, row: usize);

    fn focus(&mut self);

    // -------------------------------------------------------------------------
    // Extensions
    // -------------------------------------------------------------------------

    fn register_plugin(&mut self, plugin: Box<dyn GridPlugin>);

    fn set_selection_model(&mut self, model: Box<dyn SelectionModel>);

    /// Rows selected through the selection model, ascending.
    fn selected_rows(&self) -> Vec<usize>;
}

/// Everything needed to create a widget.
#[derive(Debug, Clone, Copy)]
pub struct GridSetup<'a> {
    pub columns: &'a [ColumnDefinition],
    pub data: Option<&'a SharedDataSource>,
    pub options: &'a GridOptions,
}

/// Creates the widget the first time the binding receives columns.
///
/// Any `FnMut(GridSetup<'_>) -> W` closure is a factory.
pub trait GridFactory {
    type Grid: GridWidget;

    fn create(&mut self, setup: GridSetup<'_>) -> Self::Grid;
}

impl<W, F> GridFactory for F
where
    W: GridWidget,
    F: FnMut(GridSetup<'_>) -> W,
{
    type Grid = W;

    fn create(&mut self, setup: GridSetup<'_>) -> W {
        self(setup)
    }
}
