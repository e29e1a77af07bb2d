//! Capability contract for domain objects taking part in object trees.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::domain::id::TreeId;

/// Shared, mutable handle to a tree object.
pub type TreeNode<T> = Rc<RefCell<T>>;

/// Non-owning back-reference from a child to its parent.
pub type WeakTreeNode<T> = Weak<RefCell<T>>;

/// Built object tree: identifier to node, in insertion order.
pub type Forest<T> = IndexMap<TreeId, TreeNode<T>>;

/// Wraps a value into a [`TreeNode`].
pub fn tree_node<T>(value: T) -> TreeNode<T> {
    Rc::new(RefCell::new(value))
}

/// Tree bookkeeping written by the object tree builder.
///
/// Embed it into a domain type and hand it out through [`Treeable::tree_state`]
/// (the [`treeable_state!`](crate::treeable_state) macro does that).
pub struct TreeState<T> {
    level: usize,
    parent_item: Option<WeakTreeNode<T>>,
    children: Forest<T>,
}

impl<T> Default for TreeState<T> {
    fn default() -> Self {
        Self {
            level: 0,
            parent_item: None,
            children: Forest::new(),
        }
    }
}

impl<T> fmt::Debug for TreeState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeState")
            .field("level", &self.level)
            .field("has_parent", &self.parent_item.is_some())
            .field("children", &self.children.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Minimal contract a type satisfies to be built into a tree.
///
/// Implementors supply the identifier, the parent identifier and access to an
/// embedded [`TreeState`]; level, parent reference and children accessors are
/// provided.
pub trait Treeable: Sized {
    fn tree_id(&self) -> TreeId;

    /// Identifier of the parent, `None` for roots.
    fn tree_parent(&self) -> Option<TreeId>;

    fn tree_state(&self) -> &TreeState<Self>;

    fn tree_state_mut(&mut self) -> &mut TreeState<Self>;

    fn set_tree_parent_item(&mut self, item: Option<&TreeNode<Self>>) {
        self.tree_state_mut().parent_item = item.map(Rc::downgrade);
    }

    /// The parent node, if it is set and still alive.
    fn tree_parent_item(&self) -> Option<TreeNode<Self>> {
        self.tree_state().parent_item.as_ref().and_then(Weak::upgrade)
    }

    fn set_tree_level(&mut self, level: usize) {
        self.tree_state_mut().level = level;
    }

    fn tree_level(&self) -> usize {
        self.tree_state().level
    }

    fn set_tree_children(&mut self, children: Forest<Self>) {
        self.tree_state_mut().children = children;
    }

    fn tree_children(&self) -> &Forest<Self> {
        &self.tree_state().children
    }
}
