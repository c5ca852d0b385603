//! Headless in-memory grid widget.
//!
//! [`HeadlessGrid`] keeps the state a real widget would (columns, cursor,
//! editor, dirty rows, plugins) without drawing anything, and records every
//! mutating call in order. It backs the demo and the integration tests, and
//! lets a host run the binding without a UI.

use std::collections::BTreeSet;

use crate::column::ColumnDefinition;
use crate::config::GridOptions;
use crate::cursor::{ActiveCell, CellRange, EditorState, HEADER_COLUMN};
use crate::data::{CellValue, SharedDataSource};
use crate::registry::{
    GridPlugin, PluginKind, PluginRegistry, SelectionModel, SelectionModelKind,
};
use crate::widget::{GridSetup, GridWidget};

/// A mutating call made on a [`HeadlessGrid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCall {
    SetColumns(Vec<String>),
    SetOptions,
    SetDataSource,
    UpdateRowCount,
    SetActiveCell(usize, usize),
    ResetActiveCell,
    SetEditorValue,
    EditActiveCell,
    InvalidateRows(Vec<usize>),
    InvalidateAllRows,
    Invalidate,
    Render,
    ResizeCanvas,
    ScrollRowToTop(usize),
    Focus,
    RegisterPlugin(PluginKind),
    SetSelectionModel(SelectionModelKind),
}

#[derive(Debug, Clone, PartialEq)]
struct Editor {
    row: usize,
    cell: usize,
    original: CellValue,
    value: CellValue,
}

/// In-memory [`GridWidget`].
#[derive(Debug)]
pub struct HeadlessGrid {
    columns: Vec<ColumnDefinition>,
    options: GridOptions,
    data: Option<SharedDataSource>,
    row_count: usize,
    active: Option<ActiveCell>,
    editor: Option<Editor>,
    dirty_rows: BTreeSet<usize>,
    top_row: usize,
    focused: bool,
    plugins: Vec<Box<dyn GridPlugin>>,
    selection_model: Option<Box<dyn SelectionModel>>,
    calls: Vec<GridCall>,
}

impl HeadlessGrid {
    /// Create a grid from a setup; usable directly as a [`GridFactory`](crate::widget::GridFactory).
    pub fn new(setup: GridSetup<'_>) -> Self {
        let data = setup.data.cloned();
        let row_count = data.as_ref().map_or(0, |d| d.borrow().len());
        Self {
            columns: setup.columns.to_vec(),
            options: setup.options.clone(),
            data,
            row_count,
            active: None,
            editor: None,
            dirty_rows: BTreeSet::new(),
            top_row: 0,
            focused: false,
            plugins: Vec::new(),
            selection_model: None,
            calls: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    /// Every mutating call since creation (or the last [`take_calls`](Self::take_calls)).
    pub fn calls(&self) -> &[GridCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<GridCall> {
        std::mem::take(&mut self.calls)
    }

    /// Rows marked for re-render, ascending.
    pub fn dirty_rows(&self) -> Vec<usize> {
        self.dirty_rows.iter().copied().collect()
    }

    pub fn clear_dirty_rows(&mut self) {
        self.dirty_rows.clear();
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn top_row(&self) -> usize {
        self.top_row
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn plugin_kinds(&self) -> Vec<PluginKind> {
        self.plugins.iter().map(|p| p.kind()).collect()
    }

    pub fn selection_model_kind(&self) -> Option<SelectionModelKind> {
        self.selection_model.as_ref().map(|m| m.kind())
    }

    pub fn selection_model_mut(&mut self) -> Option<&mut (dyn SelectionModel + 'static)> {
        self.selection_model.as_deref_mut()
    }

    /// Cell the open editor is attached to.
    pub fn editor_cell(&self) -> Option<ActiveCell> {
        self.editor.as_ref().map(|e| ActiveCell::new(e.row, e.cell))
    }

    // -------------------------------------------------------------------------
    // User simulation
    // -------------------------------------------------------------------------

    /// Move the cursor to `(row, cell)` and open an editor there, as a click
    /// on an editable cell would. Not recorded as a call.
    pub fn open_editor(&mut self, row: usize, cell: usize) {
        self.active = Some(ActiveCell::new(row, cell));
        let original = self.cell_value(row, cell);
        self.editor = Some(Editor {
            row,
            cell,
            value: original.clone(),
            original,
        });
    }

    /// Type a value into the open editor. Not recorded as a call.
    pub fn type_into_editor(&mut self, value: CellValue) {
        if let Some(editor) = self.editor.as_mut() {
            editor.value = value;
        }
    }

    /// Value of the record field behind grid cell `(row, cell)`.
    pub fn cell_value(&self, row: usize, cell: usize) -> CellValue {
        if cell == HEADER_COLUMN {
            return CellValue::Null;
        }
        let Some(column) = self.columns.get(cell - 1) else {
            return CellValue::Null;
        };
        self.data
            .as_ref()
            .and_then(|d| d.borrow().item(row))
            .and_then(|record| record.get(&column.field).cloned())
            .unwrap_or(CellValue::Null)
    }

    /// Drop pending input of an editor on one of `rows`.
    fn redraw_editor<I: IntoIterator<Item = usize>>(&mut self, rows: I) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        if rows.into_iter().any(|r| r == editor.row) {
            editor.value = editor.original.clone();
        }
    }
}

impl GridWidget for HeadlessGrid {
    fn columns(&self) -> Vec<ColumnDefinition> {
        self.columns.clone()
    }

    fn set_columns(&mut self, columns: &[ColumnDefinition]) {
        self.calls
            .push(GridCall::SetColumns(columns.iter().map(|c| c.id.clone()).collect()));
        self.columns = columns.to_vec();
    }

    fn set_options(&mut self, options: &GridOptions) {
        self.calls.push(GridCall::SetOptions);
        self.options = options.clone();
    }

    fn set_data_source(&mut self, data: Option<SharedDataSource>) {
        self.calls.push(GridCall::SetDataSource);
        self.data = data;
    }

    fn update_row_count(&mut self) {
        self.calls.push(GridCall::UpdateRowCount);
        self.row_count = self.data.as_ref().map_or(0, |d| d.borrow().len());
    }

    fn row_count(&self) -> usize {
        self.row_count
    }

    fn active_cell(&self) -> Option<ActiveCell> {
        self.active
    }

    fn set_active_cell(&mut self, row: usize, cell: usize) {
        self.calls.push(GridCall::SetActiveCell(row, cell));
        self.active = Some(ActiveCell::new(row, cell));
        self.editor = None;
    }

    fn reset_active_cell(&mut self) {
        self.calls.push(GridCall::ResetActiveCell);
        self.active = None;
        self.editor = None;
    }

    fn cell_editor(&self) -> Option<EditorState> {
        self.editor.as_ref().map(|e| EditorState {
            value: e.value.clone(),
            changed: e.value != e.original,
        })
    }

    fn set_editor_value(&mut self, value: CellValue) {
        self.calls.push(GridCall::SetEditorValue);
        if let Some(editor) = self.editor.as_mut() {
            editor.value = value;
        }
    }

    fn edit_active_cell(&mut self) {
        self.calls.push(GridCall::EditActiveCell);
        match self.active {
            Some(cell) if self.options.editable && !cell.is_header() => {
                self.open_editor(cell.row, cell.cell);
            }
            _ => log::trace!("[headless] edit_active_cell ignored"),
        }
    }

    fn invalidate_rows(&mut self, rows: &[usize]) {
        self.calls.push(GridCall::InvalidateRows(rows.to_vec()));
        self.dirty_rows.extend(rows.iter().copied());
        self.redraw_editor(rows.iter().copied());
    }

    fn invalidate_all_rows(&mut self) {
        self.calls.push(GridCall::InvalidateAllRows);
        self.dirty_rows.extend(0..self.row_count);
        self.redraw_editor(0..self.row_count);
    }

    fn invalidate(&mut self) {
        self.calls.push(GridCall::Invalidate);
        self.dirty_rows.extend(0..self.row_count);
        self.redraw_editor(0..self.row_count);
    }

    fn render(&mut self) {
        self.calls.push(GridCall::Render);
    }

    fn resize_canvas(&mut self) {
        self.calls.push(GridCall::ResizeCanvas);
    }

    fn scroll_row_to_top(&mut self, row: usize) {
        self.calls.push(GridCall::ScrollRowToTop(row));
        self.top_row = row.min(self.row_count.saturating_sub(1));
    }

    fn focus(&mut self) {
        self.calls.push(GridCall::Focus);
        self.focused = true;
    }

    fn register_plugin(&mut self, plugin: Box<dyn GridPlugin>) {
        self.calls.push(GridCall::RegisterPlugin(plugin.kind()));
        self.plugins.push(plugin);
    }

    fn set_selection_model(&mut self, model: Box<dyn SelectionModel>) {
        self.calls.push(GridCall::SetSelectionModel(model.kind()));
        self.selection_model = Some(model);
    }

    fn selected_rows(&self) -> Vec<usize> {
        self.selection_model
            .as_ref()
            .map(|m| m.selected_rows())
            .unwrap_or_default()
    }
}

/// Plugin stand-in that only remembers its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessPlugin(pub PluginKind);

impl GridPlugin for HeadlessPlugin {
    fn kind(&self) -> PluginKind {
        self.0
    }
}

/// Selection model that stores ranges as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessSelectionModel {
    kind: SelectionModelKind,
    ranges: Vec<CellRange>,
}

impl HeadlessSelectionModel {
    pub fn new(kind: SelectionModelKind) -> Self {
        Self {
            kind,
            ranges: Vec::new(),
        }
    }
}

impl SelectionModel for HeadlessSelectionModel {
    fn kind(&self) -> SelectionModelKind {
        self.kind
    }

    fn selected_ranges(&self) -> Vec<CellRange> {
        self.ranges.clone()
    }

    fn set_selected_ranges(&mut self, ranges: Vec<CellRange>) {
        self.ranges = ranges;
    }
}

/// Registry with a headless constructor for every known kind.
pub fn registry() -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    for kind in PluginKind::ALL {
        registry.register_plugin(kind, move || Box::new(HeadlessPlugin(kind)));
    }
    for kind in [SelectionModelKind::Cell, SelectionModelKind::Row] {
        registry.register_selection_model(kind, move || Box::new(HeadlessSelectionModel::new(kind)));
    }
    registry
}
