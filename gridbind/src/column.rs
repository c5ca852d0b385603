//! Column definitions and the name-to-ordinal column index.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::data::CellValue;

/// Per-cell formatter: `(row, cell, value, column) -> display text`.
///
/// Formatters compare by identity: two columns are only equal if they share
/// the same formatter instance.
#[derive(Clone)]
pub struct CellFormatter(Rc<dyn Fn(usize, usize, &CellValue, &ColumnDefinition) -> String>);

impl CellFormatter {
    /// Wrap a formatting function.
    pub fn new(f: impl Fn(usize, usize, &CellValue, &ColumnDefinition) -> String + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Format a cell value.
    pub fn format(&self, row: usize, cell: usize, value: &CellValue, column: &ColumnDefinition) -> String {
        (self.0)(row, cell, value, column)
    }
}

impl PartialEq for CellFormatter {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for CellFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CellFormatter(..)")
    }
}

/// Hook run by the widget after a cell is rendered asynchronously.
///
/// Receives `(cell reference, row, row record, column)`. Compares by identity.
#[derive(Clone)]
pub struct PostRenderHook(Rc<dyn Fn(&str, usize, &CellValue, &ColumnDefinition)>);

impl PostRenderHook {
    /// Wrap a post-render callback.
    pub fn new(f: impl Fn(&str, usize, &CellValue, &ColumnDefinition) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the hook.
    pub fn run(&self, cell_ref: &str, row: usize, record: &CellValue, column: &ColumnDefinition) {
        (self.0)(cell_ref, row, record, column)
    }
}

impl PartialEq for PostRenderHook {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for PostRenderHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PostRenderHook(..)")
    }
}

fn default_resizable() -> bool {
    true
}

/// Column configuration.
///
/// Columns are replaced wholesale by the host; the binding never edits one
/// in place. Equality is deep over every field, in declaration order.
///
/// # Examples
///
/// ```
/// use gridbind::column::ColumnDefinition;
///
/// let columns = vec![
///     ColumnDefinition::new("colId", "Id", "id").sortable(),
///     ColumnDefinition::new("colName", "Name", "name").width(200),
/// ];
/// assert_eq!(columns[1].field, "name");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
    /// Opaque identity used to track the column across rebuilds.
    pub id: String,
    /// Header text; also the key of the column index.
    pub name: String,
    /// Key of the record field shown in this column.
    pub field: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_resizable")]
    pub resizable: bool,
    #[serde(default)]
    pub min_width: Option<u16>,
    #[serde(default)]
    pub width: Option<u16>,
    #[serde(default)]
    pub sortable: bool,
    #[serde(skip)]
    pub formatter: Option<CellFormatter>,
    #[serde(skip)]
    pub async_post_render: Option<PostRenderHook>,
}

impl ColumnDefinition {
    /// Create a resizable column with no explicit width.
    pub fn new(id: impl Into<String>, name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            field: field.into(),
            icon: None,
            resizable: true,
            min_width: None,
            width: None,
            sortable: false,
            formatter: None,
            async_post_render: None,
        }
    }

    /// Set the column width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the minimum column width.
    pub fn min_width(mut self, width: u16) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Mark the column as sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Prevent the user from resizing the column.
    pub fn fixed(mut self) -> Self {
        self.resizable = false;
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Attach a per-cell formatter.
    pub fn formatter(mut self, formatter: CellFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Attach an async post-render hook.
    pub fn post_render(mut self, hook: PostRenderHook) -> Self {
        self.async_post_render = Some(hook);
        self
    }
}

/// Maps column display names to their 0-based data-column ordinal.
///
/// Built in one pass from a column sequence; when two columns share a name
/// the later one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    by_name: HashMap<String, usize>,
}

impl ColumnIndex {
    /// Build the index for a column sequence.
    pub fn build(columns: &[ColumnDefinition]) -> Self {
        let by_name = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        Self { by_name }
    }

    /// Ordinal of the column called `name`, if any.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Position of the column with `id` in `columns`.
pub fn position_of(columns: &[ColumnDefinition], id: &str) -> Option<usize> {
    columns.iter().position(|c| c.id == id)
}
