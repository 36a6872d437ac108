//! Integration tests for the tree view state.

use ort_workbench::hierarchy::{DependencyGraph, HierarchyIndex, HierarchyNode};
use ort_workbench::viewmodel::TreeViewState;

/// `A{B, C{D}}`
fn abcd() -> Vec<HierarchyNode<String>> {
    vec![HierarchyNode::labeled_with(
        "A",
        vec![
            HierarchyNode::labeled("B"),
            HierarchyNode::labeled_with("C", vec![HierarchyNode::labeled("D")]),
        ],
    )]
}

/// Helper to list the labels of the visible rows
fn visible(tree: &TreeViewState<String>) -> Vec<&str> {
    tree.visible_items().map(|item| item.flat().value().as_str()).collect()
}

fn index_of(tree: &TreeViewState<String>, label: &str) -> usize {
    tree.items()
        .find(|item| item.value() == label)
        .map(|item| item.index())
        .unwrap()
}

#[test]
fn test_expand_then_search_walkthrough() {
    let mut tree = TreeViewState::new(abcd(), false);
    assert_eq!(visible(&tree), vec!["A"]);

    tree.toggle_expanded(index_of(&tree, "A"));
    assert_eq!(visible(&tree), vec!["A", "B", "C"]);

    tree.toggle_expanded(index_of(&tree, "C"));
    assert_eq!(visible(&tree), vec!["A", "B", "C", "D"]);

    tree.update_search("D");
    let d = index_of(&tree, "D");
    assert_eq!(tree.search().hits(), &[d]);
    assert_eq!(visible(&tree), vec!["A", "B", "C", "D"]);
    assert_eq!(tree.selected_index(), Some(d));
    assert!(tree.is_auto_selected());
}

#[test]
fn test_search_reveals_collapsed_hit() {
    let mut tree = TreeViewState::new(abcd(), false);
    tree.update_search("D");

    assert_eq!(visible(&tree), vec!["A", "B", "C", "D"]);
    assert!(tree.is_expanded(index_of(&tree, "A")));
    assert!(tree.is_expanded(index_of(&tree, "C")));
    assert!(!tree.is_expanded(index_of(&tree, "D")));
}

#[test]
fn test_collapse_hides_descendants_but_keeps_their_flags() {
    let mut tree = TreeViewState::new(abcd(), true);
    assert_eq!(visible(&tree), vec!["A", "B", "C", "D"]);

    let a = index_of(&tree, "A");
    tree.toggle_expanded(a);
    assert_eq!(visible(&tree), vec!["A"]);
    assert!(tree.is_expanded(index_of(&tree, "C")));

    tree.toggle_expanded(a);
    assert_eq!(visible(&tree), vec!["A", "B", "C", "D"]);
}

#[test]
fn test_repeated_keys_in_different_branches() {
    let forest = vec![
        HierarchyNode::labeled_with("x", vec![HierarchyNode::labeled("lib")]),
        HierarchyNode::labeled_with("y", vec![HierarchyNode::labeled("lib")]),
    ];
    let index = HierarchyIndex::build(forest);
    let paths: Vec<&str> = index.iter().map(|item| item.path_key()).collect();
    assert_eq!(paths, vec!["x", "x|lib", "y", "y|lib"]);
}

#[test]
fn test_search_cycles_through_hits() {
    let forest = vec![
        HierarchyNode::labeled_with("lib-a", vec![HierarchyNode::labeled("lib-b")]),
        HierarchyNode::labeled("app"),
        HierarchyNode::labeled_with("tools", vec![HierarchyNode::labeled("lib-c")]),
    ];
    let mut tree = TreeViewState::new(forest, false);

    tree.update_search("  lib ");
    assert_eq!(tree.search().trimmed_query(), "lib");
    assert_eq!(tree.search().hit_count(), 3);
    assert_eq!(tree.selected_index(), Some(0));

    tree.select_next_search_hit();
    assert_eq!(tree.selected_index(), Some(1));
    assert!(tree.is_visible(1));

    tree.select_next_search_hit();
    assert_eq!(tree.selected_index(), Some(4));
    assert!(tree.is_visible(4));

    tree.select_next_search_hit();
    assert_eq!(tree.selected_index(), Some(0));

    tree.select_previous_search_hit();
    assert_eq!(tree.selected_index(), Some(4));
    assert!(tree.is_auto_selected());
}

#[test]
fn test_search_is_case_sensitive() {
    let mut tree = TreeViewState::new(abcd(), false);
    tree.update_search("d");
    assert!(!tree.search().has_hits());
    assert_eq!(tree.selected_index(), None);
}

#[test]
fn test_keyboard_navigation_wraps_over_visible_rows() {
    let mut tree = TreeViewState::new(abcd(), false);
    tree.toggle_expanded(0);

    tree.select_next_item();
    assert_eq!(tree.selected_index(), Some(0));
    tree.select_next_item();
    tree.select_next_item();
    assert_eq!(tree.selected_item().unwrap().value(), "C");
    tree.select_next_item();
    assert_eq!(tree.selected_index(), Some(0));

    tree.select_previous_item();
    assert_eq!(tree.selected_item().unwrap().value(), "C");
    assert!(!tree.is_auto_selected());
}

#[test]
fn test_explicit_reselect_clears_selection() {
    let mut tree = TreeViewState::new(abcd(), true);
    tree.select_item(1, false);
    assert_eq!(tree.selected_index(), Some(1));

    tree.select_item(1, false);
    assert_eq!(tree.selected_index(), None);

    tree.select_item(1, true);
    tree.select_item(1, true);
    assert_eq!(tree.selected_index(), Some(1));
}

#[test]
fn test_tree_from_graph_shares_subtrees() {
    let mut graph = DependencyGraph::new();
    for id in ["app", "web", "db", "log"] {
        graph.add_node(id, id.to_string());
    }
    graph.add_root("app");
    graph.add_edge("app", "web");
    graph.add_edge("app", "db");
    graph.add_edge("web", "log");
    graph.add_edge("db", "log");

    let mut tree = TreeViewState::from_graph(&graph, true).unwrap();
    assert_eq!(visible(&tree), vec!["app", "web", "log", "db", "log"]);

    tree.update_search("log");
    assert_eq!(tree.search().hit_count(), 2);
}

#[test]
fn test_cyclic_graph_is_rejected() {
    let mut graph = DependencyGraph::new();
    graph.add_node("a", "a".to_string());
    graph.add_node("b", "b".to_string());
    graph.add_root("a");
    graph.add_edge("a", "b");
    graph.add_edge("b", "a");

    let err = TreeViewState::from_graph(&graph, false).unwrap_err();
    assert!(err.is_malformed_hierarchy());
}

#[test]
fn test_empty_forest() {
    let mut tree: TreeViewState<String> = TreeViewState::new(Vec::new(), true);
    assert!(tree.is_empty());
    tree.select_next_item();
    tree.update_search("x");
    tree.expand_all();
    assert_eq!(tree.selected_index(), None);
    assert_eq!(tree.visible_len(), 0);
}
