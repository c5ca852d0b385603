//! The host-facing binding.
//!
//! [`GridBinding`] owns the widget, the column index and the edit session.
//! The host feeds it property changes through [`GridBinding::apply`] and
//! widget events through [`GridBinding::handle_event`]; lifecycle events
//! come back through subscribers.

use std::fmt;
use std::ops::Range;
use std::time::Instant;

use crate::column::{ColumnDefinition, ColumnIndex};
use crate::config::GridOptions;
use crate::data::{SharedDataSource, SortColumn, same_source};
use crate::error::ConfigError;
use crate::events::{EventResult, GridEvent, HostEvent, Subscribers};
use crate::invalidate::invalidate_range;
use crate::reconcile::{Change, ReconcileReport, reconcile};
use crate::registry::PluginRegistry;
use crate::session::{EditSession, RowTransition};
use crate::throttle::Throttle;
use crate::widget::{GridFactory, GridSetup, GridWidget};

/// A batch of property changes applied in one reconciliation pass.
///
/// Properties left untouched keep their current value.
#[derive(Debug, Clone, Default)]
pub struct PropertyChanges {
    columns: Option<Option<Vec<ColumnDefinition>>>,
    data_source: Option<Option<SharedDataSource>>,
}

impl PropertyChanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column definitions.
    pub fn columns(mut self, columns: Vec<ColumnDefinition>) -> Self {
        self.columns = Some(Some(columns));
        self
    }

    /// Unset the column definitions.
    pub fn clear_columns(mut self) -> Self {
        self.columns = Some(None);
        self
    }

    /// Set the data source. Only a different source (by identity) counts as a change.
    pub fn data_source(mut self, data: SharedDataSource) -> Self {
        self.data_source = Some(Some(data));
        self
    }

    pub fn clear_data_source(mut self) -> Self {
        self.data_source = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_none() && self.data_source.is_none()
    }
}

/// Drives a grid widget from declarative properties.
pub struct GridBinding<F: GridFactory> {
    factory: F,
    grid: Option<F::Grid>,
    options: GridOptions,
    registry: PluginRegistry,
    /// Columns the grid was last reconciled with.
    columns: Option<Vec<ColumnDefinition>>,
    data: Option<SharedDataSource>,
    column_index: ColumnIndex,
    session: EditSession,
    /// Last top row reported to the host.
    top_row: usize,
    resize: Throttle,
    subscribers: Subscribers,
}

impl<F: GridFactory> fmt::Debug for GridBinding<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridBinding")
            .field("created", &self.grid.is_some())
            .field("options", &self.options)
            .field("columns", &self.columns)
            .field("session", &self.session)
            .field("top_row", &self.top_row)
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}

impl<F: GridFactory> GridBinding<F> {
    /// Create a binding. The widget itself is created on the first column change.
    pub fn new(factory: F, options: GridOptions, registry: PluginRegistry) -> Self {
        let resize = Throttle::new(options.resize_throttle());
        Self {
            factory,
            grid: None,
            top_row: options.top_row,
            options,
            registry,
            columns: None,
            data: None,
            column_index: ColumnIndex::default(),
            session: EditSession::new(),
            resize,
            subscribers: Subscribers::new(),
        }
    }

    /// Register a host event callback.
    pub fn subscribe(&mut self, callback: impl FnMut(&HostEvent) + 'static) {
        self.subscribers.subscribe(callback);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The widget, once created.
    pub fn grid(&self) -> Option<&F::Grid> {
        self.grid.as_ref()
    }

    pub fn grid_mut(&mut self) -> Option<&mut F::Grid> {
        self.grid.as_mut()
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Current column definitions (empty when unset).
    pub fn columns(&self) -> &[ColumnDefinition] {
        self.columns.as_deref().unwrap_or_default()
    }

    pub fn data_source(&self) -> Option<&SharedDataSource> {
        self.data.as_ref()
    }

    /// Data-column index of the column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_index.get(name)
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Last top row reported through [`HostEvent::TopRowChanged`].
    pub fn top_row(&self) -> usize {
        self.top_row
    }

    pub fn is_editing_enabled(&self) -> bool {
        self.options.editable
    }

    /// Rows selected through the grid's selection model.
    pub fn selected_rows(&self) -> Vec<usize> {
        self.grid.as_ref().map(GridWidget::selected_rows).unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    /// Apply property changes, rebuilding the grid structure when needed.
    pub fn apply(&mut self, changes: PropertyChanges) -> ReconcileReport {
        let PropertyChanges {
            columns,
            data_source,
        } = changes;

        let data_changed = match data_source {
            Some(next) if !same_source(self.data.as_ref(), next.as_ref()) => {
                self.data = next;
                true
            }
            _ => false,
        };
        let next_columns = columns.unwrap_or_else(|| self.columns.clone());

        let factory = &mut self.factory;
        let options = &self.options;
        let registry = &self.registry;
        let data = self.data.as_ref();
        let change = Change {
            previous_columns: self.columns.as_deref(),
            current_columns: next_columns.as_deref(),
            data: data_changed.then_some(data),
        };
        let report = reconcile(&mut self.grid, change, |columns| {
            let mut grid = factory.create(GridSetup {
                columns,
                data,
                options,
            });
            attach_extensions(&mut grid, registry, options);
            grid
        });

        self.columns = next_columns;
        if report.columns_replaced {
            self.column_index = ColumnIndex::build(self.columns());
        }

        if report.created {
            if let Some(grid) = self.grid.as_mut() {
                grid.resize_canvas();
                grid.scroll_row_to_top(self.options.top_row);
            }
            self.top_row = self.options.top_row;
            self.session = EditSession::new();
            log::info!("[gridbind] grid created with {} columns", self.columns().len());
            self.subscribers.emit(HostEvent::LoadFinished);
        }

        report
    }

    /// Turn editing on.
    pub fn enter_edit_session(&mut self) {
        self.set_editing(true);
    }

    /// Turn editing off.
    pub fn end_edit_session(&mut self) {
        self.set_editing(false);
    }

    fn set_editing(&mut self, enabled: bool) {
        self.options.editable = enabled;
        self.options.enable_add_row = false;
        if let Some(grid) = self.grid.as_mut() {
            grid.set_options(&self.options);
        }
    }

    /// Attach a plugin by name to the existing grid.
    ///
    /// Failures are logged and returned; the grid is left untouched.
    pub fn register_plugin(&mut self, name: &str) -> Result<(), ConfigError> {
        let result = match self.grid.as_mut() {
            Some(grid) => self.registry.create_plugin(name).map(|plugin| grid.register_plugin(plugin)),
            None => Err(ConfigError::GridNotCreated),
        };
        if let Err(e) = &result {
            log::error!("[gridbind] cannot register plugin '{}': {}", name, e);
        }
        result
    }

    // -------------------------------------------------------------------------
    // Host signals
    // -------------------------------------------------------------------------

    /// Re-render rows whose data changed in place, keeping an open editor's input.
    pub fn refresh_rows(&mut self, rows: Range<usize>) {
        if let Some(grid) = self.grid.as_mut() {
            invalidate_range(grid, rows);
        }
    }

    /// Resize the grid canvas now.
    pub fn on_resize(&mut self) {
        if let Some(grid) = self.grid.as_mut() {
            grid.resize_canvas();
        }
    }

    /// Throttled resize notification. Returns whether it was acted on.
    pub fn notify_resized(&mut self, now: Instant) -> bool {
        if !self.resize.accept(now) {
            return false;
        }
        self.on_resize();
        true
    }

    pub fn focus(&mut self) {
        if let Some(grid) = self.grid.as_mut() {
            grid.focus();
        }
    }

    /// Tear down the grid.
    ///
    /// An open edit session is dropped without a row exit event.
    pub fn destroy(&mut self) {
        self.session.discard();
        self.grid = None;
        self.columns = None;
        self.data = None;
        self.column_index = ColumnIndex::default();
        self.resize.reset();
        log::debug!("[gridbind] grid destroyed");
    }

    // -------------------------------------------------------------------------
    // Widget events
    // -------------------------------------------------------------------------

    /// Handle one event fired by the widget.
    pub fn handle_event(&mut self, event: GridEvent) -> EventResult {
        if self.grid.is_none() {
            log::debug!("[gridbind] ignoring {:?}: no grid", event);
            return EventResult::Ignored;
        }

        match event {
            GridEvent::BeforeEditCell { row, column_id } => {
                let transition = self.session.begin_cell_edit(row);
                self.emit_transition(transition);
                if let Some(column) = self.data_column(&column_id) {
                    self.subscribers.emit(HostEvent::CellEditBegin { row, column });
                }
                EventResult::Handled
            }
            GridEvent::CellChanged {
                row,
                column_id,
                value,
            } => {
                self.session.record_change();
                if let Some(column) = self.data_column(&column_id) {
                    self.subscribers.emit(HostEvent::CellEditExit {
                        row,
                        column,
                        new_value: value,
                    });
                }
                EventResult::Handled
            }
            GridEvent::ActiveCellChanged { row, cell } => {
                self.subscribers.emit(HostEvent::ActiveRowChanged { row });
                let transition = self.session.active_cell_changed(row, cell, self.options.editable);
                self.emit_transition(transition);
                EventResult::Handled
            }
            GridEvent::Sort { columns } => self.sort(&columns),
            GridEvent::Scroll { scroll_top } => {
                let row = self.options.row_at_offset(scroll_top);
                if row != self.top_row {
                    self.top_row = row;
                    self.subscribers.emit(HostEvent::TopRowChanged { row });
                }
                EventResult::Handled
            }
            GridEvent::ContextMenu(menu) => {
                self.subscribers.emit(HostEvent::ContextMenu(menu));
                EventResult::Consumed
            }
            GridEvent::SelectedRowsChanged { rows } => {
                self.subscribers.emit(HostEvent::SelectedRowsChanged { rows });
                EventResult::Handled
            }
        }
    }

    fn sort(&mut self, columns: &[SortColumn]) -> EventResult {
        let Some(data) = self.data.as_ref() else {
            log::debug!("[gridbind] sort requested without a data source");
            return EventResult::Ignored;
        };
        match data.try_borrow_mut() {
            Ok(mut source) => source.sort(columns),
            Err(_) => {
                log::warn!("[gridbind] data source busy, sort skipped");
                return EventResult::Ignored;
            }
        }
        if let Some(grid) = self.grid.as_mut() {
            grid.invalidate();
            grid.render();
        }
        EventResult::Handled
    }

    /// Data-column index for a column id, via the column's name.
    fn data_column(&self, column_id: &str) -> Option<usize> {
        let column = self.columns().iter().find(|c| c.id == column_id);
        let index = column.and_then(|c| self.column_index.get(&c.name));
        if index.is_none() {
            log::debug!("[gridbind] no column index for id '{}'", column_id);
        }
        index
    }

    fn emit_transition(&mut self, transition: RowTransition) {
        if let Some(row) = transition.exited {
            self.subscribers.emit(HostEvent::RowEditExit { row });
        }
        if let Some(row) = transition.entered {
            self.subscribers.emit(HostEvent::RowEditBegin { row });
        }
    }
}

/// Resolve and attach the configured selection model and plugins.
///
/// Unresolvable names are logged and skipped.
fn attach_extensions<W: GridWidget>(grid: &mut W, registry: &PluginRegistry, options: &GridOptions) {
    if let Some(name) = options.selection_model.as_deref() {
        match registry.create_selection_model(name) {
            Ok(model) => {
                log::debug!("[gridbind] setting selection model {}", model.kind());
                grid.set_selection_model(model);
            }
            Err(e) => log::error!("[gridbind] skipping selection model: {}", e),
        }
    }

    for name in &options.plugins {
        match registry.create_plugin(name) {
            Ok(plugin) => grid.register_plugin(plugin),
            Err(e) => log::error!("[gridbind] skipping plugin: {}", e),
        }
    }
}
