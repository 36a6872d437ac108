//! Dependency tree view.

use super::tree_state::TreeViewState;
use crate::error::Result;
use crate::hierarchy::DEFAULT_MAX_FOREST_ITEMS;
use crate::model::{DependencyTreeNode, WorkbenchSnapshot};
use std::ops::{Deref, DerefMut};

/// Tree view over the dependency forest of a snapshot.
#[derive(Debug, Clone)]
pub struct DependenciesViewModel {
    tree: TreeViewState<DependencyTreeNode>,
    start_expanded: bool,
    max_items: usize,
}

impl Default for DependenciesViewModel {
    fn default() -> Self {
        Self::new(false)
    }
}

impl DependenciesViewModel {
    pub fn new(start_expanded: bool) -> Self {
        Self {
            tree: TreeViewState::default(),
            start_expanded,
            max_items: DEFAULT_MAX_FOREST_ITEMS,
        }
    }

    /// Limit how many items the dependency graph may expand into.
    #[must_use]
    pub const fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Rebuild the tree from `snapshot`, dropping all view state.
    pub fn load(&mut self, snapshot: &WorkbenchSnapshot) -> Result<()> {
        let forest = snapshot.dependency_forest_with_limit(self.max_items)?;
        self.tree = TreeViewState::new(forest, self.start_expanded);
        Ok(())
    }

    pub const fn start_expanded(&self) -> bool {
        self.start_expanded
    }

    pub const fn max_items(&self) -> usize {
        self.max_items
    }

    pub const fn tree(&self) -> &TreeViewState<DependencyTreeNode> {
        &self.tree
    }

    /// Number of package rows, counting every occurrence.
    pub fn package_count(&self) -> usize {
        self.tree
            .items()
            .filter(|item| matches!(item.value(), DependencyTreeNode::Package { .. }))
            .count()
    }
}

impl Deref for DependenciesViewModel {
    type Target = TreeViewState<DependencyTreeNode>;

    fn deref(&self) -> &Self::Target {
        &self.tree
    }
}

impl DerefMut for DependenciesViewModel {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.tree
    }
}
