//! Data shown by the workbench.
//!
//! - [`Identifier`]: package coordinates
//! - [`Issue`], [`RuleViolation`], [`Vulnerability`], [`PackageInfo`]: list
//!   view records
//! - [`DependencyTreeNode`]: tree view node kinds
//! - [`WorkbenchSnapshot`]: everything one load publishes

mod identifier;
mod records;
mod snapshot;
mod tree_node;

pub use identifier::Identifier;
pub use records::{
    ExclusionStatus, Issue, ItemStatus, PackageInfo, Resolution, ResolutionStatus, RuleViolation,
    Severity, Tool, Vulnerability, VulnerabilityReference,
};
pub use snapshot::WorkbenchSnapshot;
pub use tree_node::{DependencyTreeNode, PackageLinkage};
