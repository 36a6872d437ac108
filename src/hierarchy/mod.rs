//! Hierarchical input of the tree view.
//!
//! - [`HierarchyNode`]: an externally supplied forest node
//! - [`HierarchyIndex`]: the forest flattened once into pre-order
//! - [`DependencyGraph`]: an id-based graph that expands into a forest,
//!   rejecting cycles

mod graph;
mod index;
mod node;

pub use graph::{DEFAULT_MAX_FOREST_ITEMS, DependencyGraph};
pub use index::{FlatItem, HierarchyIndex, PATH_KEY_SEPARATOR};
pub use node::{DisplayName, HierarchyNode};
