//! Error types.

use thiserror::Error;

use crate::registry::{PluginKind, SelectionModelKind};

/// Configuration errors raised while resolving plugins and selection models.
///
/// These never abort the binding: callers log them and skip the offending
/// item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The name does not match any known plugin kind.
    #[error("unknown plugin '{0}'")]
    UnknownPlugin(String),

    /// The name does not match any known selection model kind.
    #[error("unknown selection model '{0}'")]
    UnknownSelectionModel(String),

    /// The kind is known but the widget integration registered no constructor for it.
    #[error("plugin {0} has no registered constructor")]
    PluginNotRegistered(PluginKind),

    #[error("selection model {0} has no registered constructor")]
    SelectionModelNotRegistered(SelectionModelKind),

    /// Plugins can only be attached once the grid exists.
    #[error("grid has not been created yet")]
    GridNotCreated,
}
