//! Plugin and selection-model registry.
//!
//! Plugins and selection models are named in configuration, but resolved
//! against a closed set of kinds. The widget integration supplies a
//! constructor per kind it implements; everything else is a
//! [`ConfigError`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::cursor::CellRange;
use crate::error::ConfigError;

/// Known grid plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginKind {
    AutoTooltips,
    CellRangeSelector,
    CellCopyManager,
    CellExternalCopyManager,
    CheckboxSelectColumn,
    HeaderButtons,
    HeaderMenu,
    RowMoveManager,
}

impl PluginKind {
    pub const ALL: [PluginKind; 8] = [
        PluginKind::AutoTooltips,
        PluginKind::CellRangeSelector,
        PluginKind::CellCopyManager,
        PluginKind::CellExternalCopyManager,
        PluginKind::CheckboxSelectColumn,
        PluginKind::HeaderButtons,
        PluginKind::HeaderMenu,
        PluginKind::RowMoveManager,
    ];

    /// Configuration name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            PluginKind::AutoTooltips => "AutoTooltips",
            PluginKind::CellRangeSelector => "CellRangeSelector",
            PluginKind::CellCopyManager => "CellCopyManager",
            PluginKind::CellExternalCopyManager => "CellExternalCopyManager",
            PluginKind::CheckboxSelectColumn => "CheckboxSelectColumn",
            PluginKind::HeaderButtons => "HeaderButtons",
            PluginKind::HeaderMenu => "HeaderMenu",
            PluginKind::RowMoveManager => "RowMoveManager",
        }
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PluginKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PluginKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| ConfigError::UnknownPlugin(s.to_string()))
    }
}

/// Known selection models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionModelKind {
    Cell,
    Row,
}

impl SelectionModelKind {
    pub fn name(self) -> &'static str {
        match self {
            SelectionModelKind::Cell => "CellSelectionModel",
            SelectionModelKind::Row => "RowSelectionModel",
        }
    }
}

impl fmt::Display for SelectionModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SelectionModelKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [SelectionModelKind::Cell, SelectionModelKind::Row]
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| ConfigError::UnknownSelectionModel(s.to_string()))
    }
}

/// A plugin instance attached to a grid.
pub trait GridPlugin: fmt::Debug {
    fn kind(&self) -> PluginKind;
}

/// A selection model instance attached to a grid.
pub trait SelectionModel: fmt::Debug {
    fn kind(&self) -> SelectionModelKind;

    /// Currently selected ranges.
    fn selected_ranges(&self) -> Vec<CellRange>;

    /// Replace the selection.
    fn set_selected_ranges(&mut self, ranges: Vec<CellRange>);

    /// Distinct selected rows in ascending order.
    fn selected_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.selected_ranges().iter().flat_map(CellRange::rows).collect();
        rows.sort_unstable();
        rows.dedup();
        rows
    }
}

type PluginConstructor = Box<dyn Fn() -> Box<dyn GridPlugin>>;
type SelectionModelConstructor = Box<dyn Fn() -> Box<dyn SelectionModel>>;

/// Constructors for the plugin and selection-model kinds a widget provides.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: HashMap<PluginKind, PluginConstructor>,
    selection_models: HashMap<SelectionModelKind, SelectionModelConstructor>,
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.plugins.keys().collect::<Vec<_>>())
            .field("selection_models", &self.selection_models.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the constructor for a plugin kind.
    pub fn register_plugin(
        &mut self,
        kind: PluginKind,
        constructor: impl Fn() -> Box<dyn GridPlugin> + 'static,
    ) -> &mut Self {
        self.plugins.insert(kind, Box::new(constructor));
        self
    }

    /// Register (or replace) the constructor for a selection model kind.
    pub fn register_selection_model(
        &mut self,
        kind: SelectionModelKind,
        constructor: impl Fn() -> Box<dyn SelectionModel> + 'static,
    ) -> &mut Self {
        self.selection_models.insert(kind, Box::new(constructor));
        self
    }

    /// Resolve a plugin name to a fresh plugin instance.
    pub fn create_plugin(&self, name: &str) -> Result<Box<dyn GridPlugin>, ConfigError> {
        let kind: PluginKind = name.parse()?;
        let constructor = self
            .plugins
            .get(&kind)
            .ok_or(ConfigError::PluginNotRegistered(kind))?;
        Ok(constructor())
    }

    /// Resolve a selection model name to a fresh instance.
    pub fn create_selection_model(&self, name: &str) -> Result<Box<dyn SelectionModel>, ConfigError> {
        let kind: SelectionModelKind = name.parse()?;
        let constructor = self
            .selection_models
            .get(&kind)
            .ok_or(ConfigError::SelectionModelNotRegistered(kind))?;
        Ok(constructor())
    }

    pub fn has_plugin(&self, kind: PluginKind) -> bool {
        self.plugins.contains_key(&kind)
    }
}
