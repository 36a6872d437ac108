//! View state of the workbench screens.
//!
//! The tree view and the four list views share two engines:
//!
//! - [`TreeViewState`]: expansion, selection and search over a flattened
//!   forest
//! - [`ListFilterEngine`]: named single-value filters plus free text over a
//!   record list
//!
//! The per-screen view-models wire those engines to the record types.
//!
//! ```
//! use ort_workbench::hierarchy::HierarchyNode;
//! use ort_workbench::viewmodel::TreeViewState;
//!
//! let mut tree = TreeViewState::new(
//!     vec![HierarchyNode::labeled_with("A", vec![HierarchyNode::labeled("B")])],
//!     false,
//! );
//! tree.update_search("B");
//! assert_eq!(tree.visible_len(), 2);
//! assert!(tree.is_auto_selected());
//! ```

mod dependencies;
pub mod issues;
mod list_filter;
pub mod packages;
mod search;
mod tree_state;
pub mod violations;
pub mod vulnerabilities;

pub use dependencies::DependenciesViewModel;
pub use issues::IssuesViewModel;
pub use list_filter::{FilterOption, ListFilterEngine, MatchMode, RecordFilter, ValueFilter};
pub use packages::PackagesViewModel;
pub use search::TreeSearchState;
pub use tree_state::{TreeItem, TreeViewState};
pub use violations::ViolationsViewModel;
pub use vulnerabilities::VulnerabilitiesViewModel;
