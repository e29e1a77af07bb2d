//! Walks a built tree and renders it through caller supplied handlers.

use std::fmt;

use serde_json::Value;
use tracing::instrument;

use crate::domain::record::Record;
use crate::domain::treeable::{Forest, TreeNode, Treeable};

/// A sibling group of a built tree.
///
/// Implemented for record trees (children found under a configurable key, as
/// an object or an array) and for object forests (children found through
/// [`Treeable::tree_children`]).
pub trait Traversable {
    type Node;

    fn is_empty(&self) -> bool;

    /// Calls `visit` for every node in insertion order, together with its
    /// non-empty children group.
    fn visit(&self, children_key: &str, visit: &mut dyn FnMut(&Self::Node, Option<&Self>));
}

impl Traversable for Record {
    type Node = Record;

    fn is_empty(&self) -> bool {
        Record::is_empty(self)
    }

    fn visit(&self, children_key: &str, visit: &mut dyn FnMut(&Record, Option<&Record>)) {
        for node in self.values().filter_map(Value::as_object) {
            match node.get(children_key) {
                Some(Value::Object(children)) if !children.is_empty() => visit(node, Some(children)),
                Some(Value::Array(children)) if !children.is_empty() => {
                    let group: Record = children
                        .iter()
                        .enumerate()
                        .map(|(i, child)| (i.to_string(), child.clone()))
                        .collect();
                    visit(node, Some(&group));
                }
                _ => visit(node, None),
            }
        }
    }
}

impl<T: Treeable> Traversable for Forest<T> {
    type Node = TreeNode<T>;

    fn is_empty(&self) -> bool {
        Forest::is_empty(self)
    }

    fn visit(&self, _children_key: &str, visit: &mut dyn FnMut(&TreeNode<T>, Option<&Forest<T>>)) {
        for node in self.values() {
            // no borrow may be held while handlers run, they get the node itself
            let children = node.borrow().tree_children().clone();
            visit(node, (!children.is_empty()).then_some(&children));
        }
    }
}

type LevelHandler<'a> = Box<dyn Fn(usize) -> String + 'a>;
type ItemHandler<'a, N> = Box<dyn Fn(&N, &str, usize) -> String + 'a>;

/// Renders a built tree depth-first.
///
/// For every sibling group the output is `before(level)`, then
/// `item(node, rendered_children, level)` per node, then `after(level)`.
/// Handler output is concatenated as is. Registering a handler replaces the
/// previous one.
///
/// ```
/// use serde_json::json;
/// use treeable::{ArrayTree, Traverser};
///
/// let items = vec![json!({"name": "cars"}), json!({"name": "BMW", "parent": "cars"})];
/// let tree = ArrayTree::new(items, "name", "parent").create();
/// let html = Traverser::new(tree)
///     .before(|_| "<ul>".into())
///     .item(|item, children, _| format!("<li>{}{}</li>", item["name"].as_str().unwrap_or(""), children))
///     .after(|_| "</ul>".into())
///     .render();
/// assert_eq!(html, "<ul><li>cars<ul><li>BMW</li></ul></li></ul>");
/// ```
pub struct Traverser<'a, B: Traversable> {
    items: B,
    children: String,
    item: Option<ItemHandler<'a, B::Node>>,
    before: Option<LevelHandler<'a>>,
    after: Option<LevelHandler<'a>>,
}

impl<'a, B: Traversable> Traverser<'a, B> {
    /// Traverser looking up record children under `children`.
    pub fn new(items: B) -> Self {
        Self::with_children(items, "children")
    }

    /// Traverser looking up record children under `children`. Object forests
    /// ignore the key.
    ///
    /// Record children may be stored as a mapping (as built by
    /// [`ArrayTree`](crate::ArrayTree)) or as an array of records.
    pub fn with_children(items: B, children: impl Into<String>) -> Self {
        Self {
            items,
            children: children.into(),
            item: None,
            before: None,
            after: None,
        }
    }

    pub fn items(&self) -> &B {
        &self.items
    }

    pub fn item<F>(mut self, handler: F) -> Self
    where
        F: Fn(&B::Node, &str, usize) -> String + 'a,
    {
        self.item = Some(Box::new(handler));
        self
    }

    pub fn before<F>(mut self, handler: F) -> Self
    where
        F: Fn(usize) -> String + 'a,
    {
        self.before = Some(Box::new(handler));
        self
    }

    pub fn after<F>(mut self, handler: F) -> Self
    where
        F: Fn(usize) -> String + 'a,
    {
        self.after = Some(Box::new(handler));
        self
    }

    #[instrument(level = "debug", skip(self))]
    pub fn render(&self) -> String {
        if self.items.is_empty() {
            return String::new();
        }
        self.traverse(&self.items, 0)
    }

    fn traverse(&self, items: &B, level: usize) -> String {
        let mut out = String::new();

        if let Some(before) = &self.before {
            out.push_str(&before(level));
        }

        items.visit(&self.children, &mut |node, children| {
            let children_out = children
                .map(|c| self.traverse(c, level + 1))
                .unwrap_or_default();
            if let Some(item) = &self.item {
                out.push_str(&item(node, &children_out, level));
            }
        });

        if let Some(after) = &self.after {
            out.push_str(&after(level));
        }

        out
    }
}

impl<B: Traversable> fmt::Display for Traverser<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
