//! Declarative binding for virtualized, editable data-grid widgets.
//!
//! A [`GridBinding`](binding::GridBinding) sits between a host that owns
//! column definitions and a data source, and a grid widget that renders
//! them. It rebuilds the widget's structure only when the columns or the
//! data source identity actually change, keeps the cursor on the same
//! column across rebuilds, and turns per-cell edit signals into a row-level
//! edit lifecycle.

pub mod binding;
pub mod column;
pub mod config;
pub mod cursor;
pub mod data;
pub mod error;
pub mod events;
pub mod headless;
pub mod invalidate;
pub mod reconcile;
pub mod registry;
pub mod session;
pub mod throttle;
pub mod widget;

pub use binding::{GridBinding, PropertyChanges};

pub mod prelude {
    pub use crate::binding::{GridBinding, PropertyChanges};
    pub use crate::column::{CellFormatter, ColumnDefinition, ColumnIndex, PostRenderHook};
    pub use crate::config::GridOptions;
    pub use crate::cursor::{ActiveCell, CellRange, EditorState, HEADER_COLUMN};
    pub use crate::data::{CellValue, DataSource, SharedDataSource, SortColumn, VecDataSource};
    pub use crate::error::ConfigError;
    pub use crate::events::{ContextMenuEvent, EventCollector, EventResult, GridEvent, HostEvent};
    pub use crate::headless::HeadlessGrid;
    pub use crate::reconcile::ReconcileReport;
    pub use crate::registry::{
        GridPlugin, PluginKind, PluginRegistry, SelectionModel, SelectionModelKind,
    };
    pub use crate::session::EditSession;
    pub use crate::widget::{GridFactory, GridSetup, GridWidget};
}
