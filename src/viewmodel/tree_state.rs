//! Expansion, selection and search state of a flattened tree.
//!
//! The flattened items never change for the lifetime of a [`TreeViewState`];
//! only the per-item expanded flags do. The visible rows are derived from
//! those flags in one linear pass after every change.

use super::search::TreeSearchState;
use crate::error::Result;
use crate::hierarchy::{DependencyGraph, DisplayName, FlatItem, HierarchyIndex, HierarchyNode};
use std::ops::Deref;

/// A flattened item together with its expanded flag.
#[derive(Debug)]
pub struct TreeItem<'a, T> {
    item: &'a FlatItem<T>,
    expanded: bool,
}

impl<T> Clone for TreeItem<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TreeItem<'_, T> {}

impl<'a, T> TreeItem<'a, T> {
    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub const fn flat(&self) -> &'a FlatItem<T> {
        self.item
    }
}

impl<T> Deref for TreeItem<'_, T> {
    type Target = FlatItem<T>;

    fn deref(&self) -> &Self::Target {
        self.item
    }
}

/// View state of one tree: expanded flags, visible rows, selection and
/// incremental search.
///
/// Items are addressed by their pre-order index. Indices that do not name
/// an item are ignored rather than reported, since they typically come
/// from a tree that has since been replaced.
#[derive(Debug, Clone)]
pub struct TreeViewState<T> {
    index: HierarchyIndex<T>,
    expanded: Vec<bool>,
    visible: Vec<usize>,
    selected: Option<usize>,
    auto_selected: bool,
    search: TreeSearchState,
}

impl<T> Default for TreeViewState<T> {
    fn default() -> Self {
        Self {
            index: HierarchyIndex::default(),
            expanded: Vec::new(),
            visible: Vec::new(),
            selected: None,
            auto_selected: false,
            search: TreeSearchState::new(),
        }
    }
}

impl<T: DisplayName> TreeViewState<T> {
    /// Flatten `roots` and derive the initial visible rows.
    pub fn new(roots: Vec<HierarchyNode<T>>, start_expanded: bool) -> Self {
        let index = HierarchyIndex::build(roots);
        let expanded = vec![start_expanded; index.len()];
        let mut state = Self {
            index,
            expanded,
            ..Self::default()
        };
        state.recompute_visible();
        state
    }

    /// Expand `graph` into a forest and build the state from it.
    pub fn from_graph(graph: &DependencyGraph<T>, start_expanded: bool) -> Result<Self>
    where
        T: Clone,
    {
        Ok(Self::new(graph.to_forest()?, start_expanded))
    }

    // ---- read access ----

    pub const fn index(&self) -> &HierarchyIndex<T> {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Item at `index` with its expanded flag.
    pub fn item(&self, index: usize) -> Option<TreeItem<'_, T>> {
        let item = self.index.get(index)?;
        Some(TreeItem {
            item,
            expanded: self.expanded[index],
        })
    }

    /// Every item in pre-order, visible or not.
    pub fn items(&self) -> impl Iterator<Item = TreeItem<'_, T>> {
        self.index
            .iter()
            .zip(self.expanded.iter().copied())
            .map(|(item, expanded)| TreeItem { item, expanded })
    }

    /// The rows a presentation layer should draw, in order.
    pub fn visible_items(&self) -> impl Iterator<Item = TreeItem<'_, T>> {
        self.visible.iter().filter_map(|&i| self.item(i))
    }

    /// Indices of the visible rows.
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.get(index).copied().unwrap_or(false)
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.binary_search(&index).is_ok()
    }

    pub fn selected_item(&self) -> Option<TreeItem<'_, T>> {
        self.selected.and_then(|i| self.item(i))
    }

    pub const fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Whether the current selection came from search navigation.
    ///
    /// Always false without a selection.
    pub const fn is_auto_selected(&self) -> bool {
        self.selected.is_some() && self.auto_selected
    }

    /// Row of the selected item among the visible rows.
    pub fn visible_position_of_selection(&self) -> Option<usize> {
        let selected = self.selected?;
        self.visible.binary_search(&selected).ok()
    }

    pub const fn search(&self) -> &TreeSearchState {
        &self.search
    }

    // ---- expansion ----

    /// Flip the expanded flag of `index`.
    pub fn toggle_expanded(&mut self, index: usize) {
        let Some(flag) = self.expanded.get_mut(index) else {
            return;
        };
        *flag = !*flag;
        self.recompute_visible();
    }

    pub fn expand_selected_item(&mut self) {
        self.set_selected_expanded(true);
    }

    pub fn collapse_selected_item(&mut self) {
        self.set_selected_expanded(false);
    }

    fn set_selected_expanded(&mut self, expanded: bool) {
        if let Some(selected) = self.selected
            && self.is_expanded(selected) != expanded
        {
            self.toggle_expanded(selected);
        }
    }

    /// Expand every ancestor of `index` so the item becomes visible.
    ///
    /// The item's own flag is left alone.
    pub fn expand_item(&mut self, index: usize) {
        if index >= self.len() {
            return;
        }
        for ancestor in self.index.ancestors(index) {
            self.expanded[ancestor] = true;
        }
        self.recompute_visible();
    }

    pub fn expand_all(&mut self) {
        self.expanded.fill(true);
        self.recompute_visible();
        tracing::debug!(visible = self.visible.len(), "expanded all tree items");
    }

    pub fn collapse_all(&mut self) {
        self.expanded.fill(false);
        self.recompute_visible();
        tracing::debug!(visible = self.visible.len(), "collapsed all tree items");
    }

    /// Derive the visible rows from the expanded flags.
    ///
    /// Single pass over the pre-order list keeping an expand frontier: an
    /// item is visible when its level does not exceed the frontier, and an
    /// expanded visible item moves the frontier one level down.
    fn recompute_visible(&mut self) {
        self.visible.clear();
        let mut frontier = 0;

        for (item, &expanded) in self.index.iter().zip(&self.expanded) {
            let level = item.level();
            if level < frontier {
                frontier = level;
            }
            if level <= frontier {
                self.visible.push(item.index());
                if expanded {
                    frontier = level + 1;
                }
            }
        }
    }

    // ---- selection ----

    /// Select `index`.
    ///
    /// An explicit selection of the already selected item clears the
    /// selection; an automatic one never does.
    pub fn select_item(&mut self, index: usize, is_auto_selected: bool) {
        if index >= self.len() {
            return;
        }
        if self.selected == Some(index) && !is_auto_selected {
            self.selected = None;
            self.auto_selected = false;
        } else {
            self.selected = Some(index);
            self.auto_selected = is_auto_selected;
        }
    }

    /// Select by position in the full item list; out of range is ignored.
    pub fn select_item_by_index(&mut self, index: usize, is_auto_selected: bool) {
        self.select_item(index, is_auto_selected);
    }

    /// Move the selection one visible row down, wrapping to the top.
    pub fn select_next_item(&mut self) {
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        let row = match self.visible_position_of_selection() {
            Some(row) => (row + 1) % len,
            None => 0,
        };
        self.select_visible_row(row);
    }

    /// Move the selection one visible row up, wrapping to the bottom.
    pub fn select_previous_item(&mut self) {
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        let row = match self.visible_position_of_selection() {
            Some(0) | None => len - 1,
            Some(row) => row - 1,
        };
        self.select_visible_row(row);
    }

    fn select_visible_row(&mut self, row: usize) {
        if let Some(&index) = self.visible.get(row) {
            self.selected = Some(index);
            self.auto_selected = false;
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.auto_selected = false;
    }

    // ---- search ----

    /// Run a search over every item's display name.
    ///
    /// Matching is a case-sensitive substring test against the trimmed
    /// query. A blank query yields no hits. The first hit, if any, is
    /// revealed and auto-selected.
    pub fn update_search(&mut self, query: &str) {
        let needle = query.trim();
        let hits: Vec<usize> = if needle.is_empty() {
            Vec::new()
        } else {
            self.index
                .iter()
                .filter(|item| item.value().display_name().contains(needle))
                .map(FlatItem::index)
                .collect()
        };

        tracing::debug!(query = needle, hits = hits.len(), "updated tree search");
        self.search.set_results(query.to_string(), hits);

        if let Some(hit) = self.search.current_hit() {
            self.reveal_and_select(hit);
        }
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    pub fn select_next_search_hit(&mut self) {
        if let Some(hit) = self.search.select_next() {
            self.reveal_and_select(hit);
        }
    }

    pub fn select_previous_search_hit(&mut self) {
        if let Some(hit) = self.search.select_previous() {
            self.reveal_and_select(hit);
        }
    }

    fn reveal_and_select(&mut self, index: usize) {
        self.expand_item(index);
        self.select_item(index, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `A{B, C{D}}, E{F}`
    fn sample_state(start_expanded: bool) -> TreeViewState<String> {
        TreeViewState::new(
            vec![
                HierarchyNode::labeled_with(
                    "A",
                    vec![
                        HierarchyNode::labeled("B"),
                        HierarchyNode::labeled_with("C", vec![HierarchyNode::labeled("D")]),
                    ],
                ),
                HierarchyNode::labeled_with("E", vec![HierarchyNode::labeled("F")]),
            ],
            start_expanded,
        )
    }

    fn visible_labels(state: &TreeViewState<String>) -> Vec<String> {
        state.visible_items().map(|i| i.value().clone()).collect()
    }

    #[test]
    fn test_initial_visibility() {
        let state = sample_state(false);
        assert_eq!(visible_labels(&state), vec!["A", "E"]);

        let state = sample_state(true);
        assert_eq!(visible_labels(&state), vec!["A", "B", "C", "D", "E", "F"]);
    }

    #[test]
    fn test_collapsed_child_of_expanded_parent_hides_grandchildren() {
        let mut state = sample_state(false);
        state.toggle_expanded(0);
        assert_eq!(visible_labels(&state), vec!["A", "B", "C", "E"]);

        // D stays hidden until C is expanded even though A is.
        assert!(!state.is_visible(3));
        state.toggle_expanded(2);
        assert!(state.is_visible(3));
    }

    #[test]
    fn test_collapsing_ancestor_hides_expanded_descendants() {
        let mut state = sample_state(true);
        state.toggle_expanded(0);
        assert_eq!(visible_labels(&state), vec!["A", "E", "F"]);
        assert!(state.is_expanded(2));
    }

    #[test]
    fn test_toggle_out_of_range_is_ignored() {
        let mut state = sample_state(false);
        state.toggle_expanded(42);
        assert_eq!(visible_labels(&state), vec!["A", "E"]);
    }

    #[test]
    fn test_select_item_toggles_off_on_explicit_reclick() {
        let mut state = sample_state(false);
        state.select_item(0, false);
        assert_eq!(state.selected_index(), Some(0));
        assert!(!state.is_auto_selected());

        state.select_item(0, false);
        assert_eq!(state.selected_index(), None);
        assert!(!state.is_auto_selected());
    }

    #[test]
    fn test_auto_reselect_never_deselects() {
        let mut state = sample_state(false);
        state.select_item(4, true);
        state.select_item(4, true);
        assert_eq!(state.selected_index(), Some(4));
        assert!(state.is_auto_selected());

        state.select_item(4, false);
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn test_select_item_by_index_out_of_range() {
        let mut state = sample_state(false);
        state.select_item_by_index(1, false);
        state.select_item_by_index(99, true);
        assert_eq!(state.selected_index(), Some(1));
        assert!(!state.is_auto_selected());
    }

    #[test]
    fn test_next_and_previous_wrap_in_visible_rows() {
        let mut state = sample_state(false);
        state.select_next_item();
        assert_eq!(state.selected_index(), Some(0));
        state.select_next_item();
        assert_eq!(state.selected_index(), Some(4));
        state.select_next_item();
        assert_eq!(state.selected_index(), Some(0));
        state.select_previous_item();
        assert_eq!(state.selected_index(), Some(4));
    }

    #[test]
    fn test_previous_without_selection_picks_last_visible() {
        let mut state = sample_state(true);
        state.select_previous_item();
        assert_eq!(state.selected_index(), Some(5));
        assert!(!state.is_auto_selected());
    }

    #[test]
    fn test_navigation_from_hidden_selection_restarts() {
        let mut state = sample_state(true);
        state.select_item(3, false);
        state.toggle_expanded(0);
        assert_eq!(state.visible_position_of_selection(), None);

        state.select_next_item();
        assert_eq!(state.selected_index(), Some(0));
    }

    #[test]
    fn test_navigation_on_empty_tree_is_noop() {
        let mut state: TreeViewState<String> = TreeViewState::new(Vec::new(), false);
        state.select_next_item();
        state.select_previous_item();
        assert!(state.selected_item().is_none());
        assert!(state.is_empty());
    }

    #[test]
    fn test_expand_and_collapse_selected_item() {
        let mut state = sample_state(false);
        state.expand_selected_item();
        assert_eq!(state.visible_len(), 2);

        state.select_item(0, false);
        state.expand_selected_item();
        assert!(state.is_expanded(0));
        state.expand_selected_item();
        assert!(state.is_expanded(0));
        assert_eq!(visible_labels(&state), vec!["A", "B", "C", "E"]);

        state.collapse_selected_item();
        assert!(!state.is_expanded(0));
        assert_eq!(visible_labels(&state), vec!["A", "E"]);
    }

    #[test]
    fn test_expand_item_reveals_without_expanding_item() {
        let mut state = sample_state(false);
        state.expand_item(3);
        assert!(state.is_expanded(0));
        assert!(state.is_expanded(2));
        assert!(!state.is_expanded(3));
        assert!(state.is_visible(3));
        assert!(!state.is_expanded(4));
    }

    #[test]
    fn test_expand_all_and_collapse_all() {
        let mut state = sample_state(false);
        state.expand_all();
        assert_eq!(state.visible_len(), 6);
        state.collapse_all();
        assert_eq!(visible_labels(&state), vec!["A", "E"]);
    }

    #[test]
    fn test_search_reveals_and_auto_selects_first_hit() {
        let mut state = sample_state(false);
        state.update_search(" D ");

        assert_eq!(state.search().hits(), &[3]);
        assert_eq!(state.search().cursor(), Some(0));
        assert_eq!(state.selected_index(), Some(3));
        assert!(state.is_auto_selected());
        assert_eq!(visible_labels(&state), vec!["A", "B", "C", "D", "E"]);
        assert_eq!(state.visible_position_of_selection(), Some(3));
    }

    #[test]
    fn test_search_is_case_sensitive() {
        let mut state = sample_state(false);
        state.update_search("d");
        assert!(state.search().hits().is_empty());
        assert_eq!(state.search().cursor(), None);
        assert!(state.selected_item().is_none());
    }

    #[test]
    fn test_blank_search_has_no_hits_and_keeps_selection() {
        let mut state = sample_state(false);
        state.select_item(4, false);
        state.update_search("   ");
        assert!(!state.search().has_hits());
        assert_eq!(state.search().cursor(), None);
        assert_eq!(state.selected_index(), Some(4));
    }

    #[test]
    fn test_search_hit_navigation_wraps() {
        let mut state = TreeViewState::new(
            vec![
                HierarchyNode::labeled_with("lib-a", vec![HierarchyNode::labeled("lib-b")]),
                HierarchyNode::labeled("lib-c"),
            ],
            false,
        );
        state.update_search("lib");
        assert_eq!(state.search().hits(), &[0, 1, 2]);

        state.select_next_search_hit();
        assert_eq!(state.selected_index(), Some(1));
        assert!(state.is_visible(1));
        state.select_next_search_hit();
        state.select_next_search_hit();
        assert_eq!(state.search().cursor(), Some(0));
        assert_eq!(state.selected_index(), Some(0));

        state.select_previous_search_hit();
        assert_eq!(state.search().cursor(), Some(2));
        assert_eq!(state.selected_index(), Some(2));
        assert!(state.is_auto_selected());
    }

    #[test]
    fn test_clear_search_keeps_selection_and_expansion() {
        let mut state = sample_state(false);
        state.update_search("D");
        assert_eq!(state.selected_index(), Some(3));

        state.clear_search();
        assert_eq!(state.search().query(), "");
        assert!(!state.search().has_hits());
        assert_eq!(state.search().cursor(), None);
        assert_eq!(state.selected_index(), Some(3));
        assert!(state.is_auto_selected());
        assert_eq!(visible_labels(&state), vec!["A", "B", "C", "D", "E"]);

        state.select_next_search_hit();
        assert_eq!(state.selected_index(), Some(3));
    }

    #[test]
    fn test_search_hit_navigation_without_hits() {
        let mut state = sample_state(false);
        state.update_search("zzz");
        state.select_next_search_hit();
        state.select_previous_search_hit();
        assert_eq!(state.search().cursor(), None);
        assert!(state.selected_item().is_none());
    }

    #[test]
    fn test_from_graph_rejects_cycles() {
        let mut graph = DependencyGraph::new();
        graph.add_node("a", "a".to_string());
        graph.add_node("b", "b".to_string());
        graph.add_edge("a", "b");
        graph.add_edge("b", "a");
        graph.add_root("a");

        let err = TreeViewState::from_graph(&graph, false).unwrap_err();
        assert!(err.is_malformed_hierarchy());
    }
}
