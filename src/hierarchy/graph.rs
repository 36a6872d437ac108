//! Id-based dependency graphs and their expansion into a forest.
//!
//! Analyzers share package nodes between scopes and projects, so their
//! output is a graph rather than a tree. The tree view shows every path to
//! a package; expansion therefore duplicates shared subtrees and must refuse
//! graphs that contain a cycle.

use super::HierarchyNode;
use crate::error::{HierarchyErrorKind, Result, WorkbenchError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default upper bound on the number of items a graph may expand into.
pub const DEFAULT_MAX_FOREST_ITEMS: usize = 100_000;

/// A dependency graph keyed by node id, with ordered edges and roots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph<T> {
    pub nodes: IndexMap<String, T>,
    #[serde(default)]
    pub edges: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub roots: Vec<String>,
}

impl<T> Default for DependencyGraph<T> {
    fn default() -> Self {
        Self {
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
            roots: Vec::new(),
        }
    }
}

struct ExpansionFrame<'a, T> {
    id: &'a str,
    next_child: usize,
    children: Vec<HierarchyNode<T>>,
}

impl<'a, T> ExpansionFrame<'a, T> {
    const fn new(id: &'a str) -> Self {
        Self {
            id,
            next_child: 0,
            children: Vec::new(),
        }
    }
}

impl<T: Clone> DependencyGraph<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: impl Into<String>, value: T) {
        self.nodes.insert(id.into(), value);
    }

    /// Add a directed edge; children keep insertion order.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.edges.entry(from.into()).or_default().push(to.into());
    }

    pub fn add_root(&mut self, id: impl Into<String>) {
        self.roots.push(id.into());
    }

    pub fn children_of(&self, id: &str) -> &[String] {
        self.edges.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Expand every root into a tree, in root order, with at most
    /// [`DEFAULT_MAX_FOREST_ITEMS`] items.
    pub fn to_forest(&self) -> Result<Vec<HierarchyNode<T>>> {
        self.to_forest_with_limit(DEFAULT_MAX_FOREST_ITEMS)
    }

    /// Expand every root into a tree, in root order.
    ///
    /// Fails with [`WorkbenchError::MalformedHierarchy`] when a node is
    /// reachable from itself, an edge names an undefined node, or the
    /// expansion would exceed `limit` items. Shared subtrees are copied, so
    /// layered graphs can grow exponentially.
    pub fn to_forest_with_limit(&self, limit: usize) -> Result<Vec<HierarchyNode<T>>> {
        let mut emitted = 0;
        let forest = self
            .roots
            .iter()
            .map(|root| self.expand_root(root, &mut emitted, limit))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(
            roots = forest.len(),
            nodes = forest.iter().map(HierarchyNode::subtree_len).sum::<usize>(),
            "expanded dependency graph"
        );
        Ok(forest)
    }

    fn expand_root(
        &self,
        root: &str,
        emitted: &mut usize,
        limit: usize,
    ) -> Result<HierarchyNode<T>> {
        if !self.nodes.contains_key(root) {
            return Err(WorkbenchError::hierarchy(
                "expanding dependency graph",
                HierarchyErrorKind::UnknownRoot(root.to_string()),
            ));
        }
        count_item(emitted, limit)?;

        let mut path: Vec<ExpansionFrame<'_, T>> = vec![ExpansionFrame::new(root)];
        let mut on_path: HashSet<&str> = HashSet::from([root]);
        let mut finished = None;

        while let Some(frame) = path.last_mut() {
            if let Some(child) = self.children_of(frame.id).get(frame.next_child) {
                frame.next_child += 1;
                let parent = frame.id;

                if !self.nodes.contains_key(child.as_str()) {
                    return Err(WorkbenchError::hierarchy(
                        "expanding dependency graph",
                        HierarchyErrorKind::UnknownNode {
                            parent: parent.to_string(),
                            child: child.clone(),
                        },
                    ));
                }

                if on_path.contains(child.as_str()) {
                    let mut cycle: Vec<String> = path
                        .iter()
                        .skip_while(|f| f.id != child.as_str())
                        .map(|f| f.id.to_string())
                        .collect();
                    cycle.push(child.clone());
                    return Err(WorkbenchError::cycle(cycle));
                }

                count_item(emitted, limit)?;
                on_path.insert(child.as_str());
                path.push(ExpansionFrame::new(child.as_str()));
                continue;
            }

            let Some(done) = path.pop() else { break };
            on_path.remove(done.id);

            let value = self.nodes.get(done.id).cloned().ok_or_else(|| {
                WorkbenchError::hierarchy(
                    "expanding dependency graph",
                    HierarchyErrorKind::UnknownRoot(done.id.to_string()),
                )
            })?;
            let node = HierarchyNode::with_children(done.id, value, done.children);

            match path.last_mut() {
                Some(parent) => parent.children.push(node),
                None => finished = Some(node),
            }
        }

        finished.ok_or_else(|| {
            WorkbenchError::hierarchy(
                "expanding dependency graph",
                HierarchyErrorKind::UnknownRoot(root.to_string()),
            )
        })
    }
}

fn count_item(emitted: &mut usize, limit: usize) -> Result<()> {
    *emitted += 1;
    if *emitted > limit {
        return Err(WorkbenchError::hierarchy(
            "expanding dependency graph",
            HierarchyErrorKind::TooLarge { limit },
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &str)], roots: &[&str]) -> DependencyGraph<String> {
        let mut graph = DependencyGraph::new();
        for (from, to) in edges {
            for id in [from, to] {
                if !graph.nodes.contains_key(*id) {
                    graph.add_node(*id, id.to_uppercase());
                }
            }
            graph.add_edge(*from, *to);
        }
        for root in roots {
            if !graph.nodes.contains_key(*root) {
                graph.add_node(*root, root.to_uppercase());
            }
            graph.add_root(*root);
        }
        graph
    }

    #[test]
    fn test_expansion_preserves_edge_order() {
        let g = graph(&[("app", "b"), ("app", "a"), ("b", "c")], &["app"]);
        let forest = g.to_forest().unwrap();
        assert_eq!(forest.len(), 1);

        let root = &forest[0];
        assert_eq!(root.key, "app");
        assert_eq!(root.value, "APP");
        let child_keys: Vec<&str> = root.children.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(child_keys, vec!["b", "a"]);
        assert_eq!(root.children[0].children[0].key, "c");
    }

    #[test]
    fn test_shared_subtrees_are_duplicated() {
        let g = graph(
            &[("app", "x"), ("app", "y"), ("x", "shared"), ("y", "shared")],
            &["app"],
        );
        let forest = g.to_forest().unwrap();
        assert_eq!(forest[0].subtree_len(), 5);
    }

    #[test]
    fn test_cycle_is_reported_with_path() {
        let g = graph(&[("app", "a"), ("a", "b"), ("b", "a")], &["app"]);
        let err = g.to_forest().unwrap_err();
        match err {
            WorkbenchError::MalformedHierarchy { source, .. } => assert_eq!(
                source,
                HierarchyErrorKind::Cycle(vec!["a".into(), "b".into(), "a".into()])
            ),
            other => panic!("Expected MalformedHierarchy, got {other:?}"),
        }
    }

    /// Every node of a layer depends on both nodes of the next layer.
    fn layered(layers: usize) -> DependencyGraph<String> {
        let mut g = DependencyGraph::new();
        g.add_node("root", "ROOT".to_string());
        g.add_root("root");
        let mut previous = vec!["root".to_string()];
        for layer in 0..layers {
            let current: Vec<String> = (0..2).map(|i| format!("n{layer}-{i}")).collect();
            for id in &current {
                g.add_node(id.clone(), id.to_uppercase());
            }
            for from in &previous {
                for to in &current {
                    g.add_edge(from.clone(), to.clone());
                }
            }
            previous = current;
        }
        g
    }

    #[test]
    fn test_layered_graph_exceeding_limit_fails() {
        let err = layered(30).to_forest().unwrap_err();
        match err {
            WorkbenchError::MalformedHierarchy { source, .. } => assert_eq!(
                source,
                HierarchyErrorKind::TooLarge {
                    limit: DEFAULT_MAX_FOREST_ITEMS
                }
            ),
            other => panic!("Expected MalformedHierarchy, got {other:?}"),
        }
    }

    #[test]
    fn test_limit_counts_every_emitted_item() {
        // 1 + 2 + 4 + 8 items
        let g = layered(3);
        assert_eq!(g.to_forest_with_limit(15).unwrap()[0].subtree_len(), 15);
        assert!(g.to_forest_with_limit(14).unwrap_err().is_malformed_hierarchy());
    }

    #[test]
    fn test_limit_spans_all_roots() {
        let g = graph(&[("a", "b"), ("c", "d")], &["a", "c"]);
        assert_eq!(g.to_forest_with_limit(4).unwrap().len(), 2);
        assert!(g.to_forest_with_limit(3).is_err());
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let g = graph(&[("a", "a")], &["a"]);
        assert!(g.to_forest().unwrap_err().is_malformed_hierarchy());
    }

    #[test]
    fn test_unknown_child_is_reported() {
        let mut g = graph(&[], &["app"]);
        g.add_edge("app", "ghost");
        match g.to_forest().unwrap_err() {
            WorkbenchError::MalformedHierarchy { source, .. } => assert_eq!(
                source,
                HierarchyErrorKind::UnknownNode {
                    parent: "app".into(),
                    child: "ghost".into()
                }
            ),
            other => panic!("Expected MalformedHierarchy, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_root_is_reported() {
        let mut g: DependencyGraph<String> = DependencyGraph::new();
        g.add_root("missing");
        assert!(g.to_forest().unwrap_err().is_malformed_hierarchy());
    }

    #[test]
    fn test_empty_graph_gives_empty_forest() {
        let g: DependencyGraph<String> = DependencyGraph::new();
        assert!(g.to_forest().unwrap().is_empty());
    }
}
