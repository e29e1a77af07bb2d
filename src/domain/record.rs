//! Loosely-typed records and the field names that give them tree semantics.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered field-name to value mapping. Insertion order is preserved.
pub type Record = Map<String, Value>;

pub(crate) static NULL: Value = Value::Null;

/// Field names used by the record tree builder and the traverser.
///
/// `id` and `parent` carry the hierarchy; `level`, `children` and
/// `parent_item` are written by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub id: String,
    pub parent: String,
    pub level: String,
    pub children: String,
    pub parent_item: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            id: "id".into(),
            parent: "parent".into(),
            level: "level".into(),
            children: "children".into(),
            parent_item: "parentItem".into(),
        }
    }
}

impl FieldNames {
    pub fn new(id: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: parent.into(),
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_children(mut self, children: impl Into<String>) -> Self {
        self.children = children.into();
        self
    }

    pub fn with_parent_item(mut self, parent_item: impl Into<String>) -> Self {
        self.parent_item = parent_item.into();
        self
    }
}

/// Natural ordering of record values.
///
/// Ranks: null < bool < number < string < array < object. Null therefore
/// sorts before any defined value, which is how missing fields are ordered.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
        },
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x
            .iter()
            .zip(y.iter())
            .map(|(x, y)| compare_values(x, y))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        (Value::Object(x), Value::Object(y)) => x.len().cmp(&y.len()),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Value stored under `field`, null when the field or the record is missing.
pub(crate) fn field<'a>(item: &'a Value, field: &str) -> &'a Value {
    item.get(field).unwrap_or(&NULL)
}
