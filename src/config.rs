//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treeable/treeable.toml`
//! 3. Local config: `<dir>/.treeable.toml`
//! 4. Environment variables: `TREEABLE_*` prefix, `__` separates nested keys

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::FieldNames;

/// Markup used when rendering a tree as nested HTML lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HtmlSettings {
    pub list_open: String,
    pub list_close: String,
    pub item_open: String,
    /// Opening tag for records whose `active_field` is `true`
    pub item_open_active: String,
    pub item_close: String,
    /// Field rendered as item text (default: the identifier field)
    pub label_field: Option<String>,
    pub active_field: String,
}

impl Default for HtmlSettings {
    fn default() -> Self {
        Self {
            list_open: "<ul>".into(),
            list_close: "</ul>".into(),
            item_open: "<li>".into(),
            item_open_active: r#"<li class="active">"#.into(),
            item_close: "</li>".into(),
            label_field: None,
            active_field: "active".into(),
        }
    }
}

/// Raw field names for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawFieldNames {
    pub id: Option<String>,
    pub parent: Option<String>,
    pub level: Option<String>,
    pub children: Option<String>,
    pub parent_item: Option<String>,
}

/// Raw HTML settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawHtmlSettings {
    pub list_open: Option<String>,
    pub list_close: Option<String>,
    pub item_open: Option<String>,
    pub item_open_active: Option<String>,
    pub item_close: Option<String>,
    pub label_field: Option<String>,
    pub active_field: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub sort_field: Option<String>,
    pub fields: RawFieldNames,
    pub html: RawHtmlSettings,
}

/// Unified configuration for treeable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Field to sort the flat list by before building
    pub sort_field: Option<String>,
    /// Field names used to build and traverse record trees
    pub fields: FieldNames,
    /// HTML list markup
    pub html: HtmlSettings,
}

/// Get the XDG config directory for treeable.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treeable").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treeable.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".treeable.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn pick(overlay: &Option<String>, base: &str) -> String {
    overlay.clone().unwrap_or_else(|| base.to_string())
}

impl Settings {
    /// Field rendered as item text.
    pub fn label_field(&self) -> &str {
        self.html.label_field.as_deref().unwrap_or(&self.fields.id)
    }

    /// Overlay values win when specified, everything else is kept.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        let fields = &overlay.fields;
        let html = &overlay.html;
        Self {
            sort_field: overlay.sort_field.clone().or_else(|| self.sort_field.clone()),
            fields: FieldNames {
                id: pick(&fields.id, &self.fields.id),
                parent: pick(&fields.parent, &self.fields.parent),
                level: pick(&fields.level, &self.fields.level),
                children: pick(&fields.children, &self.fields.children),
                parent_item: pick(&fields.parent_item, &self.fields.parent_item),
            },
            html: HtmlSettings {
                list_open: pick(&html.list_open, &self.html.list_open),
                list_close: pick(&html.list_close, &self.html.list_close),
                item_open: pick(&html.item_open, &self.html.item_open),
                item_open_active: pick(&html.item_open_active, &self.html.item_open_active),
                item_close: pick(&html.item_close, &self.html.item_close),
                label_field: html.label_field.clone().or_else(|| self.html.label_field.clone()),
                active_field: pick(&html.active_field, &self.html.active_field),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.treeable.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Load a single settings file on top of the defaults.
    pub fn load_file(path: &Path) -> Result<Self, ApplicationError> {
        Ok(Self::default().merge_with(&load_raw_settings(path)?))
    }

    /// Apply TREEABLE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TREEABLE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        let overrides: [(&str, &mut String); 11] = [
            ("fields.id", &mut settings.fields.id),
            ("fields.parent", &mut settings.fields.parent),
            ("fields.level", &mut settings.fields.level),
            ("fields.children", &mut settings.fields.children),
            ("fields.parent_item", &mut settings.fields.parent_item),
            ("html.list_open", &mut settings.html.list_open),
            ("html.list_close", &mut settings.html.list_close),
            ("html.item_open", &mut settings.html.item_open),
            ("html.item_open_active", &mut settings.html.item_open_active),
            ("html.item_close", &mut settings.html.item_close),
            ("html.active_field", &mut settings.html.active_field),
        ];
        for (key, slot) in overrides {
            if let Ok(val) = config.get_string(key) {
                *slot = val;
            }
        }
        if let Ok(val) = config.get_string("sort_field") {
            settings.sort_field = Some(val);
        }
        if let Ok(val) = config.get_string("html.label_field") {
            settings.html.label_field = Some(val);
        }

        Ok(settings)
    }

    /// Serialize settings to a TOML string.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize: {}", e),
        })
    }

    /// Commented template for a new config file.
    pub fn template() -> String {
        r#"# treeable configuration
# Global: ~/.config/treeable/treeable.toml
# Local:  <dir>/.treeable.toml

# sort_field = "position"

[fields]
# id = "id"
# parent = "parent"
# level = "level"
# children = "children"
# parent_item = "parentItem"

[html]
# list_open = "<ul>"
# list_close = "</ul>"
# item_open = "<li>"
# item_open_active = "<li class=\"active\">"
# item_close = "</li>"
# label_field = "title"
# active_field = "active"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
