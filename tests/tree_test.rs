//! Tests for object trees built from Treeable types

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use treeable::util::testing;
use treeable::{tree_node, Forest, Traverser, Tree, TreeId, TreeNode, TreeState, Treeable};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

#[derive(Debug)]
struct Item {
    name: String,
    parent: Option<String>,
    sku: String,
    state: TreeState<Item>,
}

impl Item {
    fn new(name: &str, parent: Option<&str>) -> TreeNode<Item> {
        tree_node(Item {
            name: name.to_string(),
            parent: parent.map(str::to_string),
            sku: String::new(),
            state: TreeState::default(),
        })
    }
}

impl Treeable for Item {
    fn tree_id(&self) -> TreeId {
        TreeId::from(&self.name)
    }

    fn tree_parent(&self) -> Option<TreeId> {
        self.parent.as_deref().map(TreeId::from)
    }

    treeable::treeable_state!(state);
}

struct InvalidItem;

fn cars() -> Vec<TreeNode<Item>> {
    vec![
        Item::new("cars", None),
        Item::new("VW", Some("cars")),
        Item::new("BMW", Some("cars")),
    ]
}

fn render(tree: Forest<Item>) -> String {
    Traverser::new(tree)
        .before(|_| "<ul>".into())
        .item(|node, children, _| format!("<li>{}{}</li>", node.borrow().name, children))
        .after(|_| "</ul>".into())
        .render()
}

#[test]
fn given_two_roots_when_creating_then_renders_both() {
    let tree = Tree::new(vec![Item::new("cars", None), Item::new("flowers", None)]).create();
    assert_eq!(render(tree), "<ul><li>cars</li><li>flowers</li></ul>");
}

#[test]
fn given_children_when_creating_then_renders_nested() {
    let tree = Tree::new(cars()).create();
    assert_eq!(render(tree), "<ul><li>cars<ul><li>VW</li><li>BMW</li></ul></li></ul>");
}

#[test]
fn given_only_non_treeable_entries_when_creating_from_any_then_renders_nothing() {
    let items: Vec<Rc<dyn Any>> = vec![
        Rc::new(RefCell::new(InvalidItem)) as Rc<dyn Any>,
        Rc::new(42_u32) as Rc<dyn Any>,
    ];
    let tree = Tree::<Item>::from_any(items).create();

    assert!(tree.is_empty());
    assert_eq!(render(tree), "");
}

#[test]
fn given_mixed_entries_when_creating_from_any_then_keeps_treeable_ones() {
    let items: Vec<Rc<dyn Any>> = vec![
        Item::new("cars", None) as Rc<dyn Any>,
        Rc::new(RefCell::new(InvalidItem)) as Rc<dyn Any>,
        Item::new("BMW", Some("cars")) as Rc<dyn Any>,
    ];
    let mut builder = Tree::<Item>::from_any(items);

    assert_eq!(builder.items().len(), 2);
    assert_eq!(render(builder.create()), "<ul><li>cars<ul><li>BMW</li></ul></li></ul>");
}

#[test]
fn given_sort_when_creating_then_orders_siblings() {
    let tree = Tree::new(cars())
        .sort(|a, b| a.name.cmp(&b.name))
        .create();
    assert_eq!(render(tree), "<ul><li>cars<ul><li>BMW</li><li>VW</li></ul></li></ul>");
}

#[test]
fn given_filter_when_creating_then_drops_objects() {
    let tree = Tree::new(cars())
        .filter(|item| item.name != "VW")
        .create();
    assert_eq!(render(tree), "<ul><li>cars<ul><li>BMW</li></ul></li></ul>");
}

#[test]
fn given_parents_when_creating_then_updates_ancestor_chain() {
    let tree = Tree::new(cars())
        .parents("VW", |item| {
            item.borrow_mut().sku = "parent".into();
            Some(item)
        })
        .create();

    let html = Traverser::new(tree)
        .before(|_| "<ul>".into())
        .item(|node, children, _| {
            let node = node.borrow();
            format!("<li>{} - {}{}</li>", node.name, node.sku, children)
        })
        .after(|_| "</ul>".into())
        .render();

    assert_eq!(html, "<ul><li>cars - parent<ul><li>VW - parent</li><li>BMW - </li></ul></li></ul>");
}

#[test]
fn given_parents_returning_none_when_walking_then_removes_object() {
    let mut builder = Tree::new(cars());
    builder.parents("BMW", |_| None);

    let names: Vec<String> = builder.items().iter().map(|i| i.borrow().name.clone()).collect();
    assert_eq!(names, ["cars", "VW"]);
}

#[test]
fn given_each_when_creating_then_transforms_and_prunes() {
    let tree = Tree::new(cars())
        .each(|item, level| {
            if level == 1 && item.borrow().name == "BMW" {
                return None;
            }
            item.borrow_mut().sku = format!("L{}", level);
            Some(item)
        })
        .create();

    let html = Traverser::new(tree)
        .item(|node, children, _| {
            let node = node.borrow();
            format!("[{}:{}{}]", node.name, node.sku, children)
        })
        .render();

    assert_eq!(html, "[cars:L0[VW:L1]]");
}

#[test]
fn given_each_excluding_root_when_creating_then_root_subtree_gone() {
    let mut items = cars();
    items.push(Item::new("flowers", None));

    let tree = Tree::new(items)
        .each(|item, level| {
            let keep = level > 0 || item.borrow().name != "cars";
            keep.then_some(item)
        })
        .create();

    assert_eq!(render(tree), "<ul><li>flowers</li></ul>");
}

#[test]
fn given_built_tree_when_reading_state_then_level_and_parent_reference_set() {
    let items = cars();
    let tree = Tree::new(items.clone()).create();

    let cars = &tree[&TreeId::from("cars")];
    assert_eq!(cars.borrow().tree_level(), 0);
    assert!(cars.borrow().tree_parent_item().is_none());

    let children: Vec<TreeId> = cars.borrow().tree_children().keys().cloned().collect();
    assert_eq!(children, [TreeId::from("VW"), TreeId::from("BMW")]);

    let vw = &items[1];
    assert_eq!(vw.borrow().tree_level(), 1);
    let parent = vw.borrow().tree_parent_item().unwrap();
    assert!(Rc::ptr_eq(&parent, cars));
}

#[test]
fn given_item_handler_mutating_node_when_rendering_then_no_borrow_conflict() {
    let items = cars();
    let tree = Tree::new(items.clone()).create();

    let html = Traverser::new(tree)
        .item(|node, children, level| {
            node.borrow_mut().sku = format!("seen@{}", level);
            format!("[{}{}]", node.borrow().name, children)
        })
        .render();

    assert_eq!(html, "[cars[VW][BMW]]");
    let skus: Vec<String> = items.iter().map(|i| i.borrow().sku.clone()).collect();
    assert_eq!(skus, ["seen@0", "seen@1", "seen@1"]);
}

#[test]
fn given_unmatched_parent_when_creating_then_object_omitted() {
    let tree = Tree::new(vec![Item::new("cars", None), Item::new("Tulip", Some("flowers"))]).create();
    assert_eq!(render(tree), "<ul><li>cars</li></ul>");
}

#[test]
fn given_tree_dropped_when_reading_back_reference_then_parent_released() {
    let child = Item::new("VW", Some("cars"));
    let tree = Tree::new(vec![Item::new("cars", None), Rc::clone(&child)]).create();
    assert!(child.borrow().tree_parent_item().is_some());

    drop(tree);
    assert!(child.borrow().tree_parent_item().is_none());
}

#[test]
fn given_same_builder_when_creating_twice_then_state_is_rebuilt() {
    let items = cars();
    let mut builder = Tree::new(items.clone());
    builder.create();
    let tree = builder.create();

    assert_eq!(tree.len(), 1);
    assert_eq!(items[0].borrow().tree_children().len(), 2);
    assert!(items[1].borrow().tree_children().is_empty());
    assert_eq!(items[2].borrow().tree_level(), 1);
}
