//! Externally supplied tree nodes.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Text a node contributes to tree search.
pub trait DisplayName {
    fn display_name(&self) -> Cow<'_, str>;
}

impl DisplayName for String {
    fn display_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl DisplayName for &str {
    fn display_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

/// A node of a rooted forest.
///
/// `key` only has to be unique among siblings; the flattened index derives
/// globally unique path keys from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyNode<T> {
    pub key: String,
    pub value: T,
    #[serde(default = "Vec::new", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HierarchyNode<T>>,
}

impl<T> HierarchyNode<T> {
    /// Create a leaf node.
    pub fn leaf(key: impl Into<String>, value: T) -> Self {
        Self {
            key: key.into(),
            value,
            children: Vec::new(),
        }
    }

    /// Create a node with children.
    pub fn with_children(key: impl Into<String>, value: T, children: Vec<Self>) -> Self {
        Self {
            key: key.into(),
            value,
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including this node.
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

impl HierarchyNode<String> {
    /// Leaf whose key and value are the same label. Handy for fixtures.
    pub fn labeled(label: impl Into<String>) -> Self {
        let label = label.into();
        Self::leaf(label.clone(), label)
    }

    /// Branch whose key and value are the same label.
    pub fn labeled_with(label: impl Into<String>, children: Vec<Self>) -> Self {
        let label = label.into();
        Self::with_children(label.clone(), label, children)
    }
}
