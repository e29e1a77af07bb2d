//! Render service
//!
//! Builds record trees according to [`Settings`] and renders them as nested
//! HTML lists or terminal trees.

use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::Settings;
use crate::domain::display::to_termtree;
use crate::domain::{shape, ArrayTree, Record, TreeId, Traverser};

/// Per-invocation build options layered over the settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Sort field, overrides `Settings::sort_field`
    pub sort: Option<String>,
    /// Record whose ancestor chain gets marked active, as typed by the user.
    /// Matches string identifiers verbatim and integer identifiers by value.
    pub active: Option<String>,
    /// Levels to keep; deeper nodes are pruned
    pub max_depth: Option<usize>,
}

/// Shape of a built tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeSummary {
    pub depth: usize,
    pub nodes: usize,
    pub leaves: usize,
}

/// Service turning flat records into rendered trees.
pub struct RenderService {
    settings: Settings,
}

impl RenderService {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Build the nested record tree.
    #[instrument(level = "debug", skip(self, records), fields(records = records.len()))]
    pub fn build(&self, records: Vec<Value>, options: &BuildOptions) -> Record {
        let mut builder = ArrayTree::with_fields(records, self.settings.fields.clone());

        if let Some(field) = options.sort.as_deref().or(self.settings.sort_field.as_deref()) {
            debug!(field, "sorting records");
            builder.sort(field);
        }

        if let Some(active) = &options.active {
            let active_field = self.settings.html.active_field.clone();
            for id in active_ids(active) {
                debug!(%id, "marking ancestor chain active");
                builder.parents(id, |mut record| {
                    record.insert(active_field.clone(), Value::Bool(true));
                    Some(record)
                });
            }
        }

        if let Some(max_depth) = options.max_depth {
            builder.each(move |record, level| (level < max_depth).then_some(record));
        }

        builder.create()
    }

    /// Render a built tree as nested HTML lists.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn render_html(&self, tree: Record) -> String {
        let html = &self.settings.html;
        let label_field = self.settings.label_field();

        Traverser::with_children(tree, &self.settings.fields.children)
            .before(|_| html.list_open.clone())
            .item(|node, children, _| {
                let open = if node.get(&html.active_field) == Some(&Value::Bool(true)) {
                    &html.item_open_active
                } else {
                    &html.item_open
                };
                format!(
                    "{}{}{}{}",
                    open,
                    html_escape::encode_text(&label(node, label_field)),
                    children,
                    html.item_close
                )
            })
            .after(|_| html.list_close.clone())
            .render()
    }

    /// Render a built tree as an indented terminal tree.
    pub fn render_tree(&self, tree: &Record, root_label: &str) -> String {
        let label_field = self.settings.label_field();
        to_termtree(tree, &self.settings.fields.children, root_label, |node| {
            label(node, label_field)
        })
        .to_string()
    }

    pub fn summary(&self, tree: &Record) -> TreeSummary {
        let children = &self.settings.fields.children;
        TreeSummary {
            depth: shape::depth(tree, children),
            nodes: shape::node_count(tree, children),
            leaves: shape::leaf_count(tree, children),
        }
    }
}

fn label(node: &Record, field: &str) -> String {
    match node.get(field) {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    }
}

/// `"008"` may name a string or an integer identifier, so both are tried.
fn active_ids(arg: &str) -> Vec<TreeId> {
    let mut ids = vec![TreeId::from(arg)];
    if let Ok(n) = arg.parse::<i64>() {
        ids.push(TreeId::Int(n));
    }
    ids
}
