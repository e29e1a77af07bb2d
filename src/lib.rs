//! Build nested trees from flat, parent-referencing data and render them.
//!
//! Two builders share one algorithm:
//! - [`ArrayTree`] nests loosely-typed records by configurable field names
//! - [`Tree`] nests objects implementing the [`Treeable`] contract
//!
//! [`Traverser`] walks either result and renders it through `before`, `item`
//! and `after` handlers.
//!
//! Parent chains are never checked for cycles. A chain that loops back on
//! itself recurses until the stack is exhausted.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod macros;
pub mod util;

pub use domain::{
    compare_values, tree_node, ArrayTree, FieldNames, Forest, Record, Traversable, Traverser,
    Tree, TreeId, TreeNode, TreeState, Treeable, WeakTreeNode,
};
