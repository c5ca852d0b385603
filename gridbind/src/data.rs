//! Data source abstraction.
//!
//! The binding never looks inside records. It asks a source for its length,
//! hands it to the widget, and forwards sort requests to it.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Value of a single cell (and, as an object, of a whole record).
pub type CellValue = serde_json::Value;

/// One entry of a multi-column sort request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortColumn {
    pub column_id: String,
    /// Record field the column displays.
    pub field: String,
    pub ascending: bool,
}

impl SortColumn {
    pub fn ascending(column_id: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            field: field.into(),
            ascending: true,
        }
    }

    pub fn descending(column_id: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            ascending: false,
            ..Self::ascending(column_id, field)
        }
    }
}

/// Row-oriented data backing a grid.
pub trait DataSource: fmt::Debug {
    /// Number of rows.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record at `index`.
    fn item(&self, index: usize) -> Option<CellValue>;

    /// Records in `[start, end)`, clamped to the source length.
    fn range(&self, start: usize, end: usize) -> Vec<CellValue> {
        (start..end.min(self.len()))
            .filter_map(|i| self.item(i))
            .collect()
    }

    /// Reorder rows by the given columns, first column most significant.
    fn sort(&mut self, columns: &[SortColumn]);
}

/// A data source shared between the host, the binding and the widget.
pub type SharedDataSource = Rc<RefCell<dyn DataSource>>;

/// Wrap a data source for sharing.
pub fn shared(source: impl DataSource + 'static) -> SharedDataSource {
    Rc::new(RefCell::new(source))
}

/// Identity comparison of two optional shared sources.
pub fn same_source(a: Option<&SharedDataSource>, b: Option<&SharedDataSource>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// In-memory data source over JSON records.
#[derive(Debug, Clone, Default)]
pub struct VecDataSource {
    rows: Vec<CellValue>,
}

impl VecDataSource {
    pub fn new(rows: Vec<CellValue>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[CellValue] {
        &self.rows
    }

    /// Overwrite one field of one record. Returns false if the row is not an object.
    pub fn set_field(&mut self, row: usize, field: &str, value: CellValue) -> bool {
        match self.rows.get_mut(row).and_then(CellValue::as_object_mut) {
            Some(record) => {
                record.insert(field.to_string(), value);
                true
            }
            None => false,
        }
    }
}

impl DataSource for VecDataSource {
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn item(&self, index: usize) -> Option<CellValue> {
        self.rows.get(index).cloned()
    }

    fn sort(&mut self, columns: &[SortColumn]) {
        self.rows.sort_by(|a, b| {
            columns
                .iter()
                .map(|col| {
                    let ord = compare_values(field(a, &col.field), field(b, &col.field));
                    if col.ascending { ord } else { ord.reverse() }
                })
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
    }
}

fn field<'a>(record: &'a CellValue, name: &str) -> &'a CellValue {
    record.get(name).unwrap_or(&CellValue::Null)
}

/// Total order over JSON values: null < bool < number < string < array < object.
pub fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    use serde_json::Value;

    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x.len().cmp(&y.len()),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn heroes() -> VecDataSource {
        VecDataSource::new(vec![
            json!({"id": 13, "name": "Bombasto"}),
            json!({"id": 1, "name": "Windstorm"}),
            json!({"id": 20, "name": "Tornado"}),
            json!({"id": 15, "name": "Magneta"}),
        ])
    }

    fn ids(source: &VecDataSource) -> Vec<i64> {
        source.rows().iter().map(|r| r["id"].as_i64().unwrap()).collect()
    }

    #[test]
    fn test_sort_ascending_and_descending() {
        let mut source = heroes();
        source.sort(&[SortColumn::ascending("colId", "id")]);
        assert_eq!(ids(&source), vec![1, 13, 15, 20]);
        source.sort(&[SortColumn::descending("colName", "name")]);
        assert_eq!(ids(&source), vec![1, 20, 15, 13]);
    }

    #[test]
    fn test_sort_multi_column_tie_break() {
        let mut source = VecDataSource::new(vec![
            json!({"team": "b", "id": 2}),
            json!({"team": "a", "id": 9}),
            json!({"team": "b", "id": 1}),
        ]);
        source.sort(&[
            SortColumn::ascending("t", "team"),
            SortColumn::descending("i", "id"),
        ]);
        let order: Vec<_> = source.rows().iter().map(|r| r["id"].as_i64().unwrap()).collect();
        assert_eq!(order, vec![9, 2, 1]);
    }

    #[test]
    fn test_range_clamps_to_length() {
        let source = heroes();
        assert_eq!(source.range(2, 10).len(), 2);
        assert!(source.range(5, 8).is_empty());
    }

    #[test]
    fn test_same_source_is_identity() {
        let a = shared(heroes());
        let b = shared(heroes());
        assert!(same_source(Some(&a), Some(&a.clone())));
        assert!(!same_source(Some(&a), Some(&b)));
        assert!(!same_source(None, Some(&a)));
        assert!(same_source(None, None));
    }

    #[test]
    fn test_set_field_writes_into_record() {
        let mut source = heroes();
        assert!(source.set_field(1, "name", json!("Windstorm II")));
        assert_eq!(source.item(1).unwrap()["name"], json!("Windstorm II"));

        assert!(!source.set_field(9, "name", json!("Nobody")));
        let mut scalars = VecDataSource::new(vec![json!(3)]);
        assert!(!scalars.set_field(0, "name", json!("x")));
    }

    #[test]
    fn test_null_sorts_first() {
        assert_eq!(compare_values(&json!(null), &json!(0)), Ordering::Less);
        assert_eq!(compare_values(&json!("a"), &json!(5)), Ordering::Greater);
    }
}
