//! Grid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Options for the grid widget and the binding that drives it.
///
/// The widget half is handed to the widget on creation and whenever edit
/// mode toggles. The binding half (selection model, plugins, resize throttle,
/// initial top row) is consumed by [`GridBinding`](crate::binding::GridBinding).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use gridbind::config::GridOptions;
///
/// let options = GridOptions::default()
///     .with_editing(true)
///     .with_selection_model("CellSelectionModel")
///     .with_plugin("AutoTooltips")
///     .with_resize_throttle(Duration::from_millis(250));
/// assert!(options.editable);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridOptions {
    pub enable_cell_navigation: bool,
    pub enable_column_reorder: bool,
    pub force_fit_columns: bool,
    pub render_row_with_range: bool,
    pub show_row_number: bool,
    pub show_data_type_icon: bool,
    pub show_header: bool,
    /// Row height in pixels; also the scroll granularity for top-row tracking.
    ///
    /// Default: 29
    pub row_height: u32,
    /// Default: 120
    pub default_column_width: u16,
    pub multi_column_sort: bool,
    pub editable: bool,
    pub auto_edit: bool,
    /// Always off; row insertion is not supported.
    pub enable_add_row: bool,
    pub enable_async_post_render: bool,

    /// Selection model name, resolved against the plugin registry.
    pub selection_model: Option<String>,
    /// Plugin names, registered in order when the grid is created.
    pub plugins: Vec<String>,
    /// Minimum interval between acted-on resize notifications.
    ///
    /// Default: 100 ms
    pub resize_throttle_ms: u64,
    /// Row scrolled to the top when the grid is created.
    pub top_row: usize,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            enable_cell_navigation: true,
            enable_column_reorder: false,
            force_fit_columns: true,
            render_row_with_range: true,
            show_row_number: false,
            show_data_type_icon: false,
            show_header: true,
            row_height: 29,
            default_column_width: 120,
            multi_column_sort: true,
            editable: false,
            auto_edit: false,
            enable_add_row: false,
            enable_async_post_render: false,
            selection_model: None,
            plugins: Vec::new(),
            resize_throttle_ms: 100,
            top_row: 0,
        }
    }
}

impl GridOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable editing; cells also open their editor on navigation.
    pub fn with_editing(mut self, enabled: bool) -> Self {
        self.editable = enabled;
        self.auto_edit = enabled;
        self
    }

    pub fn with_header(mut self, show: bool) -> Self {
        self.show_header = show;
        self
    }

    pub fn with_column_reorder(mut self, enabled: bool) -> Self {
        self.enable_column_reorder = enabled;
        self
    }

    pub fn with_async_post_render(mut self, enabled: bool) -> Self {
        self.enable_async_post_render = enabled;
        self
    }

    /// Sets the row height. Zero is raised to one pixel.
    pub fn with_row_height(mut self, pixels: u32) -> Self {
        self.row_height = pixels.max(1);
        self
    }

    pub fn with_selection_model(mut self, name: impl Into<String>) -> Self {
        self.selection_model = Some(name.into());
        self
    }

    /// Appends a plugin name.
    pub fn with_plugin(mut self, name: impl Into<String>) -> Self {
        self.plugins.push(name.into());
        self
    }

    pub fn with_resize_throttle(mut self, window: Duration) -> Self {
        self.resize_throttle_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_top_row(mut self, row: usize) -> Self {
        self.top_row = row;
        self
    }

    /// Resize throttle window as a duration.
    pub fn resize_throttle(&self) -> Duration {
        Duration::from_millis(self.resize_throttle_ms)
    }

    /// Top row for a vertical scroll offset in pixels, clamped at zero.
    pub fn row_at_offset(&self, scroll_top: f64) -> usize {
        let row = (scroll_top / f64::from(self.row_height.max(1))).floor();
        if row.is_finite() && row > 0.0 { row as usize } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = GridOptions::default();
        assert_eq!(options.row_height, 29);
        assert_eq!(options.default_column_width, 120);
        assert!(options.multi_column_sort);
        assert!(!options.editable);
        assert!(!options.enable_add_row);
        assert_eq!(options.resize_throttle(), Duration::from_millis(100));
    }

    #[test]
    fn test_row_at_offset() {
        let options = GridOptions::default();
        assert_eq!(options.row_at_offset(0.0), 0);
        assert_eq!(options.row_at_offset(28.9), 0);
        assert_eq!(options.row_at_offset(29.0), 1);
        assert_eq!(options.row_at_offset(300.0), 10);
        assert_eq!(options.row_at_offset(-40.0), 0);
        assert_eq!(options.row_at_offset(f64::NAN), 0);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let json = r#"{"editable": true, "plugins": ["AutoTooltips"], "rowHeight": 20}"#;
        let options: GridOptions = serde_json::from_str(json).unwrap();
        assert!(options.editable);
        assert_eq!(options.row_height, 20);
        assert_eq!(options.plugins, vec!["AutoTooltips".to_string()]);
        assert!(options.show_header);
    }
}
