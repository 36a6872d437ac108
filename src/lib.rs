//! **View-state engine for browsing dependency-analysis results.**
//!
//! `ort-workbench` holds the state behind a results workbench: a collapsible
//! dependency tree with search, and filterable lists of issues, rule
//! violations, vulnerabilities and packages. Rendering is left to the
//! caller; every operation here is a pure state transition that a UI or the
//! bundled CLI can drive.
//!
//! ## Core Concepts & Modules
//!
//! - **[`hierarchy`]**: [`HierarchyIndex`] flattens a forest of
//!   [`HierarchyNode`]s once into a stable pre-order list. A
//!   [`DependencyGraph`] expands shared ids into such a forest and rejects
//!   cycles.
//! - **[`viewmodel`]**: [`TreeViewState`] tracks expansion, visibility,
//!   selection and search over an index. [`ListFilterEngine`] combines any
//!   number of typed value filters and a free-text filter over a record
//!   list. One view-model per screen builds on these two.
//! - **[`app`]**: [`AppState`] publishes a loaded [`WorkbenchSnapshot`] to
//!   every view-model at once and runs loads in the background.
//! - **[`config`]**: YAML config file discovery, presets and validation.
//!
//! ## Getting Started
//!
//! ```
//! use ort_workbench::hierarchy::HierarchyNode;
//! use ort_workbench::viewmodel::TreeViewState;
//!
//! let forest = vec![HierarchyNode::labeled_with(
//!     "A",
//!     vec![HierarchyNode::labeled("B"), HierarchyNode::labeled("C")],
//! )];
//! let mut tree = TreeViewState::new(forest, false);
//! assert_eq!(tree.visible_len(), 1);
//!
//! tree.update_search("C");
//! assert_eq!(tree.selected_index(), Some(2));
//! assert_eq!(tree.visible_len(), 3);
//! ```
//!
//! ## Loading a Snapshot
//!
//! ```no_run
//! use std::path::Path;
//! use ort_workbench::{AppConfig, AppState, model::Severity};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut app = AppState::new(AppConfig::default());
//!     app.open(Path::new("path/to/result.json"))?;
//!
//!     app.issues.set_severity(Some(Severity::Error))?;
//!     for issue in app.issues.filtered_items() {
//!         println!("{} {}", issue.id, issue.message);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Option structs legitimately use many bools for CLI flags
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    // Variable names like `next`/`prev` are clear in context
    clippy::similar_names
)]

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod model;
pub mod viewmodel;

// Re-export main types for convenience
pub use app::{AppState, LoadState};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, ConfigPreset, Validatable};
pub use error::{ErrorContext, OptionContext, Result, WorkbenchError};
pub use hierarchy::{DependencyGraph, DisplayName, FlatItem, HierarchyIndex, HierarchyNode};
pub use model::WorkbenchSnapshot;
pub use viewmodel::{FilterOption, ListFilterEngine, MatchMode, TreeSearchState, TreeViewState};
