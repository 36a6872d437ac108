//! Node kinds of the dependency tree.

use super::Identifier;
use crate::hierarchy::DisplayName;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How a package is linked into its dependent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageLinkage {
    #[default]
    Dynamic,
    Static,
    ProjectDynamic,
    ProjectStatic,
}

/// One row of the dependency tree.
///
/// A project contains scopes, a scope contains packages, and packages
/// contain their own dependencies. Errors mark subtrees the analyzer could
/// not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DependencyTreeNode {
    Project {
        id: Identifier,
        #[serde(default)]
        definition_file_path: String,
    },
    Scope {
        name: String,
        #[serde(default)]
        is_excluded: bool,
    },
    Package {
        id: Identifier,
        #[serde(default)]
        linkage: PackageLinkage,
        #[serde(default)]
        issue_count: usize,
    },
    Error {
        message: String,
    },
}

impl DependencyTreeNode {
    pub fn project(id: Identifier, definition_file_path: impl Into<String>) -> Self {
        Self::Project {
            id,
            definition_file_path: definition_file_path.into(),
        }
    }

    pub fn scope(name: impl Into<String>) -> Self {
        Self::Scope {
            name: name.into(),
            is_excluded: false,
        }
    }

    pub const fn package(id: Identifier) -> Self {
        Self::Package {
            id,
            linkage: PackageLinkage::Dynamic,
            issue_count: 0,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Short kind tag used by text renderers.
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::Project { .. } => "project",
            Self::Scope { .. } => "scope",
            Self::Package { .. } => "package",
            Self::Error { .. } => "error",
        }
    }

    /// Identifier of the project or package, if this node has one.
    pub const fn identifier(&self) -> Option<&Identifier> {
        match self {
            Self::Project { id, .. } | Self::Package { id, .. } => Some(id),
            Self::Scope { .. } | Self::Error { .. } => None,
        }
    }

    /// Key of this node among its siblings.
    pub fn sibling_key(&self) -> String {
        match self {
            Self::Project { id, .. } | Self::Package { id, .. } => id.to_coordinates(),
            Self::Scope { name, .. } => name.clone(),
            Self::Error { message } => format!("error:{message}"),
        }
    }
}

impl DisplayName for DependencyTreeNode {
    fn display_name(&self) -> Cow<'_, str> {
        match self {
            Self::Project { id, .. } | Self::Package { id, .. } => {
                Cow::Owned(id.to_coordinates())
            }
            Self::Scope { name, .. } => Cow::Borrowed(name),
            Self::Error { message } => Cow::Borrowed(message),
        }
    }
}
