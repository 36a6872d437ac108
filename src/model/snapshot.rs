//! The immutable unit published by a load.

use super::{DependencyTreeNode, Issue, PackageInfo, RuleViolation, Vulnerability};
use crate::error::{ErrorContext, Result};
use crate::hierarchy::{DEFAULT_MAX_FOREST_ITEMS, DependencyGraph, HierarchyNode};
use serde::{Deserialize, Serialize};

/// Everything the workbench views show for one analysis result.
///
/// The dependency tree may be given directly as a forest, as an id-based
/// graph, or both; graph roots are appended after the explicit forest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbenchSnapshot {
    #[serde(default)]
    pub dependency_tree: Vec<HierarchyNode<DependencyTreeNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_graph: Option<DependencyGraph<DependencyTreeNode>>,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub violations: Vec<RuleViolation>,
    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability>,
    #[serde(default)]
    pub packages: Vec<PackageInfo>,
}

impl WorkbenchSnapshot {
    /// The complete dependency forest, expanding the graph if present.
    pub fn dependency_forest(&self) -> Result<Vec<HierarchyNode<DependencyTreeNode>>> {
        self.dependency_forest_with_limit(DEFAULT_MAX_FOREST_ITEMS)
    }

    /// Like [`Self::dependency_forest`], with at most `limit` items
    /// expanded from the graph.
    pub fn dependency_forest_with_limit(
        &self,
        limit: usize,
    ) -> Result<Vec<HierarchyNode<DependencyTreeNode>>> {
        let mut forest = self.dependency_tree.clone();
        if let Some(graph) = &self.dependency_graph {
            forest.extend(
                graph
                    .to_forest_with_limit(limit)
                    .context("building dependency tree")?,
            );
        }
        Ok(forest)
    }

    /// Whether the snapshot contains nothing to show.
    pub fn is_empty(&self) -> bool {
        self.dependency_tree.is_empty()
            && self.dependency_graph.as_ref().is_none_or(|g| g.roots.is_empty())
            && self.issues.is_empty()
            && self.violations.is_empty()
            && self.vulnerabilities.is_empty()
            && self.packages.is_empty()
    }
}
