//! Node identifiers shared by record and object trees.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a tree node: either a string or an integer.
///
/// Comparison is strict, `Str("1")` and `Int(1)` are different identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeId {
    Int(i64),
    Str(String),
}

impl TreeId {
    /// Reads an identifier out of a record field value.
    ///
    /// Only strings and integers fitting into `i64` qualify. Null, booleans,
    /// floats, arrays and objects return `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(TreeId::Str(s.clone())),
            Value::Number(n) => n.as_i64().map(TreeId::Int),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            TreeId::Int(i) => Value::from(*i),
            TreeId::Str(s) => Value::from(s.as_str()),
        }
    }

    /// True if `value` holds exactly this identifier.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (TreeId::Str(id), Value::String(s)) => id == s,
            (TreeId::Int(id), Value::Number(n)) => n.as_i64() == Some(*id),
            _ => false,
        }
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeId::Int(i) => write!(f, "{}", i),
            TreeId::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for TreeId {
    fn from(value: &str) -> Self {
        TreeId::Str(value.to_string())
    }
}

impl From<String> for TreeId {
    fn from(value: String) -> Self {
        TreeId::Str(value)
    }
}

impl From<&String> for TreeId {
    fn from(value: &String) -> Self {
        TreeId::Str(value.clone())
    }
}

impl From<i64> for TreeId {
    fn from(value: i64) -> Self {
        TreeId::Int(value)
    }
}

impl From<i32> for TreeId {
    fn from(value: i32) -> Self {
        TreeId::Int(i64::from(value))
    }
}

impl From<u32> for TreeId {
    fn from(value: u32) -> Self {
        TreeId::Int(i64::from(value))
    }
}
