//! Pre-order flattening of a forest.

use super::HierarchyNode;

/// Separator between the sibling keys of a path key.
pub const PATH_KEY_SEPARATOR: char = '|';

/// One node of the forest at its position in pre-order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatItem<T> {
    index: usize,
    level: usize,
    key: String,
    path_key: String,
    parent: Option<usize>,
    child_count: usize,
    value: T,
}

impl<T> FlatItem<T> {
    /// Position in the pre-order traversal of the whole forest.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Depth of the node; roots are level 0.
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Key of the originating node, unique among its siblings only.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Ancestor keys and own key joined by [`PATH_KEY_SEPARATOR`].
    pub fn path_key(&self) -> &str {
        &self.path_key
    }

    /// Index of the parent item, `None` for roots.
    pub const fn parent_index(&self) -> Option<usize> {
        self.parent
    }

    pub const fn child_count(&self) -> usize {
        self.child_count
    }

    pub const fn has_children(&self) -> bool {
        self.child_count > 0
    }

    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Payload of the originating node.
    pub const fn value(&self) -> &T {
        &self.value
    }
}

/// A forest flattened once into a stable pre-order list.
///
/// Indices are stable for the lifetime of the index; a new forest needs a
/// new index.
#[derive(Debug, Clone)]
pub struct HierarchyIndex<T> {
    items: Vec<FlatItem<T>>,
}

impl<T> Default for HierarchyIndex<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> HierarchyIndex<T> {
    /// Flatten `roots` depth-first, visiting children in the supplied order.
    ///
    /// Nothing is reordered or deduplicated. The traversal uses an explicit
    /// stack so deep dependency chains cannot overflow the call stack.
    pub fn build(roots: Vec<HierarchyNode<T>>) -> Self {
        let mut items: Vec<FlatItem<T>> = Vec::new();
        let mut stack: Vec<(HierarchyNode<T>, usize, Option<usize>)> =
            roots.into_iter().rev().map(|root| (root, 0, None)).collect();

        while let Some((node, level, parent)) = stack.pop() {
            let index = items.len();
            let HierarchyNode {
                key,
                value,
                children,
            } = node;

            let path_key = match parent {
                Some(p) => {
                    let parent_path = &items[p].path_key;
                    let mut path = String::with_capacity(parent_path.len() + key.len() + 1);
                    path.push_str(parent_path);
                    path.push(PATH_KEY_SEPARATOR);
                    path.push_str(&key);
                    path
                }
                None => key.clone(),
            };

            items.push(FlatItem {
                index,
                level,
                key,
                path_key,
                parent,
                child_count: children.len(),
                value,
            });

            stack.extend(
                children
                    .into_iter()
                    .rev()
                    .map(|child| (child, level + 1, Some(index))),
            );
        }

        tracing::debug!(items = items.len(), "built hierarchy index");
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// O(1) lookup by pre-order index.
    pub fn get(&self, index: usize) -> Option<&FlatItem<T>> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[FlatItem<T>] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlatItem<T>> {
        self.items.iter()
    }

    /// Parent of the item at `index`, or `None` for roots and unknown indices.
    ///
    /// Equivalent to scanning backwards for the first item with a smaller
    /// level; the parent index is recorded during the build instead.
    pub fn parent_of(&self, index: usize) -> Option<&FlatItem<T>> {
        self.get(index)
            .and_then(FlatItem::parent_index)
            .and_then(|p| self.items.get(p))
    }

    /// Indices of all ancestors of `index`, nearest first.
    pub fn ancestors(&self, index: usize) -> Vec<usize> {
        let mut ancestors = Vec::new();
        let mut current = self.get(index).and_then(FlatItem::parent_index);
        while let Some(p) = current {
            ancestors.push(p);
            current = self.items[p].parent;
        }
        ancestors
    }

    /// Index of the item with the given path key.
    pub fn position_of_path_key(&self, path_key: &str) -> Option<usize> {
        self.items.iter().position(|item| item.path_key == path_key)
    }
}
