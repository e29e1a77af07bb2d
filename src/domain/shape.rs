//! Shape metrics over any built tree.

use crate::domain::traverser::Traversable;

/// Number of levels in the tree; 0 for an empty tree.
pub fn depth<B: Traversable>(items: &B, children_key: &str) -> usize {
    if items.is_empty() {
        return 0;
    }
    let mut deepest = 0;
    items.visit(children_key, &mut |_, children| {
        let below = children.map_or(0, |c| depth(c, children_key));
        deepest = deepest.max(below);
    });
    1 + deepest
}

/// Total number of nodes across all levels.
pub fn node_count<B: Traversable>(items: &B, children_key: &str) -> usize {
    let mut count = 0;
    items.visit(children_key, &mut |_, children| {
        count += 1 + children.map_or(0, |c| node_count(c, children_key));
    });
    count
}

/// Number of nodes without children.
pub fn leaf_count<B: Traversable>(items: &B, children_key: &str) -> usize {
    let mut count = 0;
    items.visit(children_key, &mut |_, children| {
        count += children.map_or(1, |c| leaf_count(c, children_key));
    });
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::array_tree::ArrayTree;
    use crate::domain::record::Record;
    use serde_json::json;

    fn sample() -> Record {
        ArrayTree::new(
            vec![
                json!({"id": 1}),
                json!({"id": 2, "parent": 1}),
                json!({"id": 3, "parent": 2}),
                json!({"id": 4, "parent": 1}),
                json!({"id": 5}),
            ],
            "id",
            "parent",
        )
        .create()
    }

    #[test]
    fn given_empty_tree_when_measuring_then_zero() {
        let empty = Record::new();
        assert_eq!(depth(&empty, "children"), 0);
        assert_eq!(node_count(&empty, "children"), 0);
        assert_eq!(leaf_count(&empty, "children"), 0);
    }

    #[test]
    fn given_nested_tree_when_measuring_then_counts_levels_and_nodes() {
        let tree = sample();
        assert_eq!(depth(&tree, "children"), 3);
        assert_eq!(node_count(&tree, "children"), 5);
        assert_eq!(leaf_count(&tree, "children"), 3);
    }

    #[test]
    fn given_wrong_children_key_when_measuring_then_sees_roots_only() {
        let tree = sample();
        assert_eq!(depth(&tree, "child"), 1);
        assert_eq!(node_count(&tree, "child"), 2);
    }
}
