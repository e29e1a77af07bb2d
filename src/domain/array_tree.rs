//! Record tree builder: nests flat key-value records by their parent field.

use std::cmp::Ordering;

use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::domain::id::TreeId;
use crate::domain::record::{compare_values, field, FieldNames, Record, NULL};

type EachFn<'a> = Box<dyn FnMut(Record, usize) -> Option<Record> + 'a>;

/// Builds a nested tree from flat records.
///
/// Records are matched to their parent by comparing the parent field with the
/// identifier field of the records placed one level above. The result maps
/// identifier to record; each placed record gains the level, parent-item and
/// (when non-empty) children fields named by [`FieldNames`].
///
/// Parent chains are not checked for cycles: a record chain that never
/// reaches a null parent recurses until the stack is exhausted.
///
/// ```
/// use serde_json::json;
/// use treeable::ArrayTree;
///
/// let items = vec![json!({"name": "cars"}), json!({"name": "BMW", "parent": "cars"})];
/// let tree = ArrayTree::new(items, "name", "parent").create();
/// assert_eq!(tree["cars"]["children"]["BMW"]["level"], json!(1));
/// ```
pub struct ArrayTree<'a> {
    items: Vec<Value>,
    fields: FieldNames,
    each: Vec<EachFn<'a>>,
}

impl<'a> ArrayTree<'a> {
    /// Creates a builder with default names for level, children and parent item.
    pub fn new(items: Vec<Value>, id: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::with_fields(items, FieldNames::new(id, parent))
    }

    pub fn with_fields(items: Vec<Value>, fields: FieldNames) -> Self {
        Self {
            items,
            fields,
            each: Vec::new(),
        }
    }

    pub fn fields(&self) -> &FieldNames {
        &self.fields
    }

    /// The flat list as it stands after sorting, filtering and parent updates.
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Sorts the flat list by the values stored under `field_name`.
    ///
    /// Missing values compare as null and sort first. The sort is stable.
    pub fn sort(&mut self, field_name: &str) -> &mut Self {
        self.items
            .sort_by(|a, b| compare_values(field(a, field_name), field(b, field_name)));
        self
    }

    /// Sorts the flat list with a caller supplied comparator.
    pub fn sort_by<F>(&mut self, compare: F) -> &mut Self
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        self.items.sort_by(compare);
        self
    }

    /// Drops every item failing `predicate` before building.
    ///
    /// Children of a removed record are not re-parented; they become orphans
    /// and disappear from the built tree.
    pub fn filter<F>(&mut self, mut predicate: F) -> &mut Self
    where
        F: FnMut(&Value) -> bool,
    {
        self.items.retain(|item| predicate(item));
        self
    }

    /// Registers a per-node transform, applied in registration order.
    ///
    /// Returning `None` excludes the node together with its whole subtree.
    pub fn each<F>(&mut self, transform: F) -> &mut Self
    where
        F: FnMut(Record, usize) -> Option<Record> + 'a,
    {
        self.each.push(Box::new(transform));
        self
    }

    /// Applies `transform` to the record identified by `id` and to all of its
    /// ancestors, walking up the parent field.
    ///
    /// Returning `None` from `transform` deletes the record from the flat list
    /// and stops the walk on that branch.
    pub fn parents<F>(&mut self, id: impl Into<TreeId>, mut transform: F) -> &mut Self
    where
        F: FnMut(Record) -> Option<Record>,
    {
        let id = id.into();
        self.bubble_up(&id, &mut transform);
        self
    }

    fn bubble_up<F>(&mut self, id: &TreeId, transform: &mut F)
    where
        F: FnMut(Record) -> Option<Record>,
    {
        // All matches for `id` are transformed before any ancestor is visited,
        // which only matters for duplicate identifiers with stateful transforms.
        let mut ancestors = Vec::new();
        let items = std::mem::take(&mut self.items);

        self.items = items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(record)
                    if record.get(&self.fields.id).is_some_and(|v| id.matches(v)) =>
                {
                    let updated = transform(record)?;
                    if let Some(parent) = updated.get(&self.fields.parent).and_then(TreeId::from_value) {
                        ancestors.push(parent);
                    }
                    Some(Value::Object(updated))
                }
                other => Some(other),
            })
            .collect();

        for ancestor in ancestors {
            trace!(%id, %ancestor, "walking up to parent");
            self.bubble_up(&ancestor, transform);
        }
    }

    /// Builds the nested tree from the current flat list.
    ///
    /// The flat list is left as is, so calling `create` again rebuilds from the
    /// same records. Transforms registered with `each` run again on every call.
    #[instrument(level = "debug", skip(self), fields(items = self.items.len()))]
    pub fn create(&mut self) -> Record {
        let Self {
            items,
            fields,
            each,
        } = self;
        let tree = build_tree(items, fields, each, None, 0);
        debug!(roots = tree.len(), "record tree built");
        tree
    }
}

fn build_tree(
    items: &[Value],
    fields: &FieldNames,
    each: &mut [EachFn<'_>],
    parent_item: Option<&Record>,
    level: usize,
) -> Record {
    let parent_id = parent_item.and_then(|p| p.get(&fields.id).and_then(TreeId::from_value));
    let mut tree = Record::new();

    for item in items {
        let Some(record) = item.as_object() else {
            trace!(level, "skipping item that is not a record");
            continue;
        };
        if record.get(&fields.id).and_then(TreeId::from_value).is_none() {
            trace!(level, field = %fields.id, "skipping record without identifier");
            continue;
        }

        let parent_value = record.get(&fields.parent).unwrap_or(&NULL);
        let placed = match &parent_id {
            Some(id) => id.matches(parent_value),
            None => parent_value.is_null(),
        };
        if !placed {
            continue;
        }

        let mut node = record.clone();
        node.entry(fields.parent.clone()).or_insert(Value::Null);
        node.insert(fields.level.clone(), Value::from(level));
        node.insert(
            fields.parent_item.clone(),
            parent_item.map_or(Value::Null, |p| Value::Object(p.clone())),
        );

        let Some(mut node) = apply_each(each, node, level) else {
            trace!(level, "node excluded by transform");
            continue;
        };
        let Some(id) = node.get(&fields.id).and_then(TreeId::from_value) else {
            trace!(level, "transform removed identifier, dropping node");
            continue;
        };

        let children = build_tree(items, fields, each, Some(&node), level + 1);
        if !children.is_empty() {
            node.insert(fields.children.clone(), Value::Object(children));
        }

        tree.insert(id.to_string(), Value::Object(node));
    }

    tree
}

fn apply_each(each: &mut [EachFn<'_>], mut node: Record, level: usize) -> Option<Record> {
    for transform in each.iter_mut() {
        node = transform(node, level)?;
    }
    Some(node)
}
