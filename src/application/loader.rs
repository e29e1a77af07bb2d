//! Reading flat record lists from JSON and TOML files.
//!
//! Accepted shapes:
//! - JSON: a top-level array, or an object with an `items` array
//! - TOML: an `items` array of tables (`[[items]]`)

use std::path::Path;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};

const ITEMS_KEY: &str = "items";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Toml,
}

impl InputFormat {
    /// Derives the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(InputFormat::Json),
            "toml" => Some(InputFormat::Toml),
            _ => None,
        }
    }
}

/// Loads the flat record list stored in `path`.
#[instrument(level = "debug")]
pub fn load_records(path: &Path) -> ApplicationResult<Vec<Value>> {
    let format = InputFormat::from_path(path)
        .ok_or_else(|| ApplicationError::UnsupportedFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path).with_path_context(path)?;
    parse_records(&content, format, path)
}

/// Parses a flat record list; `origin` only shows up in error messages.
pub fn parse_records(content: &str, format: InputFormat, origin: &Path) -> ApplicationResult<Vec<Value>> {
    let document: Value = match format {
        InputFormat::Json => serde_json::from_str(content).map_err(|e| ApplicationError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?,
        InputFormat::Toml => toml::from_str(content).map_err(|e| ApplicationError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?,
    };

    let records = match (format, document) {
        (InputFormat::Json, Value::Array(items)) => items,
        (_, Value::Object(mut table)) => match table.remove(ITEMS_KEY) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ApplicationError::InvalidInput {
                    path: origin.to_path_buf(),
                    message: format!("expected an `{}` array", ITEMS_KEY),
                })
            }
        },
        _ => {
            return Err(ApplicationError::InvalidInput {
                path: origin.to_path_buf(),
                message: "expected an array of records".to_string(),
            })
        }
    };

    debug!(count = records.len(), "records loaded");
    Ok(records)
}
