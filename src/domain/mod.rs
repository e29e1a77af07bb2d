//! Domain layer: tree building and traversal
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading)
//! and has no error paths: malformed input is left out of the built tree.

pub mod array_tree;
pub mod display;
pub mod id;
pub mod record;
pub mod shape;
pub mod traverser;
pub mod tree;
pub mod treeable;

pub use array_tree::ArrayTree;
pub use id::TreeId;
pub use record::{compare_values, FieldNames, Record};
pub use traverser::{Traversable, Traverser};
pub use tree::Tree;
pub use treeable::{tree_node, Forest, TreeNode, TreeState, Treeable, WeakTreeNode};
