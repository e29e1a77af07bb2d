//! Object tree builder for types implementing [`Treeable`].

use std::any::Any;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

use tracing::{debug, instrument, trace};

use crate::domain::id::TreeId;
use crate::domain::treeable::{Forest, TreeNode, Treeable};

type EachFn<'a, T> = Box<dyn FnMut(TreeNode<T>, usize) -> Option<TreeNode<T>> + 'a>;

/// Builds a nested tree from [`Treeable`] objects.
///
/// Same algorithm as [`ArrayTree`](crate::ArrayTree), with identifiers read
/// through the contract and level, parent reference and children written back
/// into each object's [`TreeState`](crate::TreeState).
///
/// Parent chains are not checked for cycles.
pub struct Tree<'a, T: Treeable> {
    items: Vec<TreeNode<T>>,
    each: Vec<EachFn<'a, T>>,
}

impl<'a, T: Treeable> Tree<'a, T> {
    pub fn new(items: Vec<TreeNode<T>>) -> Self {
        Self {
            items,
            each: Vec::new(),
        }
    }

    pub fn items(&self) -> &[TreeNode<T>] {
        &self.items
    }

    /// Sorts the flat list with a comparator over the objects. Stable.
    pub fn sort<F>(&mut self, mut compare: F) -> &mut Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.items.sort_by(|a, b| compare(&a.borrow(), &b.borrow()));
        self
    }

    pub fn filter<F>(&mut self, mut predicate: F) -> &mut Self
    where
        F: FnMut(&T) -> bool,
    {
        self.items.retain(|item| predicate(&item.borrow()));
        self
    }

    /// Registers a per-node transform; `None` prunes the node and its subtree.
    pub fn each<F>(&mut self, transform: F) -> &mut Self
    where
        F: FnMut(TreeNode<T>, usize) -> Option<TreeNode<T>> + 'a,
    {
        self.each.push(Box::new(transform));
        self
    }

    /// Applies `transform` to the object identified by `id` and then to each
    /// of its ancestors. `None` removes the object from the flat list.
    pub fn parents<F>(&mut self, id: impl Into<TreeId>, mut transform: F) -> &mut Self
    where
        F: FnMut(TreeNode<T>) -> Option<TreeNode<T>>,
    {
        let id = id.into();
        self.bubble_up(&id, &mut transform);
        self
    }

    fn bubble_up<F>(&mut self, id: &TreeId, transform: &mut F)
    where
        F: FnMut(TreeNode<T>) -> Option<TreeNode<T>>,
    {
        // All matches for `id` are transformed before any ancestor is visited,
        // which only matters for duplicate identifiers with stateful transforms.
        let mut ancestors = Vec::new();
        let items = std::mem::take(&mut self.items);

        self.items = items
            .into_iter()
            .filter_map(|item| {
                if item.borrow().tree_id() != *id {
                    return Some(item);
                }
                let updated = transform(item)?;
                if let Some(parent) = updated.borrow().tree_parent() {
                    ancestors.push(parent);
                }
                Some(updated)
            })
            .collect();

        for ancestor in ancestors {
            trace!(%id, %ancestor, "walking up to parent");
            self.bubble_up(&ancestor, transform);
        }
    }

    /// Builds the tree, updating level, parent reference and children of
    /// every placed object.
    #[instrument(level = "debug", skip(self), fields(items = self.items.len()))]
    pub fn create(&mut self) -> Forest<T> {
        let tree = build_tree(&self.items, &mut self.each, None, 0);
        debug!(roots = tree.len(), "object tree built");
        tree
    }
}

impl<'a, T: Treeable + 'static> Tree<'a, T> {
    /// Creates a builder from a heterogeneous list, keeping only the entries
    /// that hold a `RefCell<T>`.
    pub fn from_any(items: Vec<Rc<dyn Any>>) -> Self {
        let total = items.len();
        let items: Vec<TreeNode<T>> = items
            .into_iter()
            .filter_map(|item| item.downcast::<RefCell<T>>().ok())
            .collect();
        if items.len() < total {
            debug!(skipped = total - items.len(), "skipping items that are not treeable");
        }
        Self::new(items)
    }
}

fn build_tree<T: Treeable>(
    items: &[TreeNode<T>],
    each: &mut [EachFn<'_, T>],
    parent_item: Option<&TreeNode<T>>,
    level: usize,
) -> Forest<T> {
    let parent_id = parent_item.map(|p| p.borrow().tree_id());
    let mut tree = Forest::new();

    for item in items {
        if item.borrow().tree_parent() != parent_id {
            continue;
        }

        {
            let mut node = item.borrow_mut();
            node.set_tree_level(level);
            node.set_tree_parent_item(parent_item);
        }

        let Some(node) = apply_each(each, Rc::clone(item), level) else {
            trace!(level, "node excluded by transform");
            continue;
        };

        let children = build_tree(items, each, Some(&node), level + 1);
        let id = {
            let mut node = node.borrow_mut();
            node.set_tree_children(children);
            node.tree_id()
        };
        tree.insert(id, node);
    }

    tree
}

fn apply_each<T>(
    each: &mut [EachFn<'_, T>],
    mut node: TreeNode<T>,
    level: usize,
) -> Option<TreeNode<T>> {
    for transform in each.iter_mut() {
        node = transform(node, level)?;
    }
    Some(node)
}
