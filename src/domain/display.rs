//! Terminal tree display of built trees.

use termtree::Tree;

use crate::domain::traverser::Traversable;

/// Converts a built tree into a [`termtree::Tree`] under `root_label`.
///
/// `label` names each node; children are looked up like the
/// [`Traverser`](crate::Traverser) does.
pub fn to_termtree<B, F>(items: &B, children_key: &str, root_label: &str, label: F) -> Tree<String>
where
    B: Traversable,
    F: Fn(&B::Node) -> String,
{
    Tree::new(root_label.to_string()).with_leaves(leaves(items, children_key, &label))
}

fn leaves<B, F>(items: &B, children_key: &str, label: &F) -> Vec<Tree<String>>
where
    B: Traversable,
    F: Fn(&B::Node) -> String,
{
    let mut out = Vec::new();
    items.visit(children_key, &mut |node, children| {
        let below = children
            .map(|c| leaves(c, children_key, label))
            .unwrap_or_default();
        out.push(Tree::new(label(node)).with_leaves(below));
    });
    out
}
