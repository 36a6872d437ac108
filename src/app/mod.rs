//! Application state: the composition root of the workbench.
//!
//! [`AppState`] owns the current snapshot and one view-model per screen.
//! A load publishes a new immutable snapshot that replaces every view's
//! input at once; the revision counter tells views that this happened.

mod loader;

pub use loader::{SnapshotFormat, load_snapshot, parse_snapshot};

use crate::config::AppConfig;
use crate::error::Result;
use crate::model::WorkbenchSnapshot;
use crate::viewmodel::{
    DependenciesViewModel, IssuesViewModel, PackagesViewModel, ViolationsViewModel,
    VulnerabilitiesViewModel,
};
use loader::{LoadOutcome, PendingLoad};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Progress of the most recent load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading {
        path: PathBuf,
    },
    Loaded {
        path: PathBuf,
    },
    Failed {
        path: PathBuf,
        message: String,
    },
}

impl LoadState {
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// State shared by all workbench screens.
#[derive(Debug)]
pub struct AppState {
    config: AppConfig,
    snapshot: Arc<WorkbenchSnapshot>,
    revision: u64,
    load_state: LoadState,
    generation: u64,
    pending: Option<PendingLoad>,

    pub dependencies: DependenciesViewModel,
    pub issues: IssuesViewModel,
    pub violations: ViolationsViewModel,
    pub vulnerabilities: VulnerabilitiesViewModel,
    pub packages: PackagesViewModel,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl AppState {
    /// Empty state with view-models configured from `config`.
    pub fn new(config: AppConfig) -> Self {
        let ignore_case = config.lists.text_filter_ignore_case;
        Self {
            dependencies: DependenciesViewModel::new(config.tree.start_expanded)
                .with_max_items(config.tree.max_tree_items),
            issues: IssuesViewModel::new(ignore_case),
            violations: ViolationsViewModel::new(ignore_case),
            vulnerabilities: VulnerabilitiesViewModel::new(ignore_case),
            packages: PackagesViewModel::new(ignore_case),
            config,
            snapshot: Arc::new(WorkbenchSnapshot::default()),
            revision: 0,
            load_state: LoadState::Idle,
            generation: 0,
            pending: None,
        }
    }

    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Arc<WorkbenchSnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Incremented on every publish.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub const fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Replace every view's input with `snapshot`.
    ///
    /// On a malformed dependency hierarchy nothing is replaced.
    pub fn publish(&mut self, snapshot: WorkbenchSnapshot) -> Result<()> {
        let mut dependencies = DependenciesViewModel::new(self.config.tree.start_expanded)
            .with_max_items(self.config.tree.max_tree_items);
        dependencies.load(&snapshot)?;

        self.dependencies = dependencies;
        self.issues.set_issues(snapshot.issues.clone());
        self.violations.set_violations(snapshot.violations.clone());
        self.vulnerabilities
            .set_vulnerabilities(snapshot.vulnerabilities.clone());
        self.packages.set_packages(snapshot.packages.clone());
        self.snapshot = Arc::new(snapshot);
        self.revision += 1;

        tracing::info!(
            revision = self.revision,
            tree_items = self.dependencies.len(),
            "published snapshot"
        );
        Ok(())
    }

    /// Load `path` synchronously and publish it.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        self.cancel_load();
        self.load_state = LoadState::Loading {
            path: path.to_path_buf(),
        };
        let result = load_snapshot(path).and_then(|s| self.publish(s));
        self.finish_load(path.to_path_buf(), result)
    }

    /// Start loading `path` in the background.
    ///
    /// A load still in flight is superseded; its result is discarded when
    /// it arrives.
    pub fn begin_load(&mut self, path: &Path) {
        self.generation += 1;
        if let Some(previous) = self.pending.take() {
            tracing::debug!(generation = previous.generation, "superseded pending load");
        }
        self.pending = Some(PendingLoad::spawn(path, self.generation));
        self.load_state = LoadState::Loading {
            path: path.to_path_buf(),
        };
    }

    /// Drop the pending load, if any.
    pub fn cancel_load(&mut self) {
        if self.pending.take().is_some() {
            self.generation += 1;
            if let LoadState::Loading { .. } = self.load_state {
                self.load_state = LoadState::Idle;
            }
        }
    }

    /// Apply a finished background load without blocking.
    ///
    /// Returns `true` when a result was applied; failures are recorded in
    /// [`load_state`](Self::load_state).
    pub fn poll_load(&mut self) -> bool {
        let Some(outcome) = self.pending.as_ref().and_then(PendingLoad::try_take) else {
            return false;
        };
        self.pending = None;
        self.apply_outcome(outcome).is_some()
    }

    /// Block until the pending load has finished and apply it.
    pub fn wait_for_load(&mut self) -> Result<()> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        let outcome = pending.wait();
        self.apply_outcome(outcome).unwrap_or(Ok(()))
    }

    /// `None` when the outcome belongs to a superseded load.
    fn apply_outcome(&mut self, outcome: LoadOutcome) -> Option<Result<()>> {
        if outcome.generation != self.generation {
            tracing::warn!(
                generation = outcome.generation,
                current = self.generation,
                "discarded stale load result"
            );
            return None;
        }
        let path = match &self.load_state {
            LoadState::Loading { path } => path.clone(),
            _ => PathBuf::new(),
        };
        let result = outcome.result.and_then(|s| self.publish(s));
        Some(self.finish_load(path, result))
    }

    fn finish_load(&mut self, path: PathBuf, result: Result<()>) -> Result<()> {
        match result {
            Ok(()) => {
                self.load_state = LoadState::Loaded { path };
                Ok(())
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "load failed");
                self.load_state = LoadState::Failed {
                    path,
                    message: err.to_string(),
                };
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Identifier, Issue, Severity, Tool};

    fn snapshot_with_issue(name: &str) -> WorkbenchSnapshot {
        WorkbenchSnapshot {
            issues: vec![Issue {
                id: Identifier::new("NPM", "", name, "1.0"),
                tool: Tool::Analyzer,
                source: "NPM".into(),
                message: "boom".into(),
                severity: Severity::Error,
                timestamp: String::new(),
                resolutions: Vec::new(),
            }],
            ..WorkbenchSnapshot::default()
        }
    }

    #[test]
    fn test_publish_replaces_views_and_bumps_revision() {
        let mut app = AppState::default();
        app.issues.set_text("nothing matches");

        app.publish(snapshot_with_issue("lodash")).unwrap();
        assert_eq!(app.revision(), 1);
        assert_eq!(app.issues.filtered_items().count(), 1);
        assert_eq!(app.issues.engine().text_filter(), "");
        assert_eq!(app.snapshot().issues[0].id.name, "lodash");
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let mut app = AppState::default();
        app.generation = 2;
        app.load_state = LoadState::Loading {
            path: PathBuf::from("new.json"),
        };

        let stale = LoadOutcome {
            generation: 1,
            result: Ok(snapshot_with_issue("old")),
        };
        assert!(app.apply_outcome(stale).is_none());
        assert_eq!(app.revision(), 0);
        assert!(app.load_state().is_loading());

        let current = LoadOutcome {
            generation: 2,
            result: Ok(snapshot_with_issue("new")),
        };
        assert!(matches!(app.apply_outcome(current), Some(Ok(()))));
        assert_eq!(app.revision(), 1);
        assert_eq!(
            app.load_state(),
            &LoadState::Loaded {
                path: PathBuf::from("new.json")
            }
        );
    }

    #[test]
    fn test_failed_outcome_keeps_previous_snapshot() {
        let mut app = AppState::default();
        app.publish(snapshot_with_issue("kept")).unwrap();
        app.generation = 5;
        app.load_state = LoadState::Loading {
            path: PathBuf::from("broken.json"),
        };

        let failed = LoadOutcome {
            generation: 5,
            result: Err(crate::error::WorkbenchError::config("boom")),
        };
        assert!(matches!(app.apply_outcome(failed), Some(Err(_))));
        assert!(matches!(app.load_state(), LoadState::Failed { .. }));
        assert_eq!(app.revision(), 1);
        assert_eq!(app.snapshot().issues[0].id.name, "kept");
    }

    #[test]
    fn test_poll_without_pending_load() {
        let mut app = AppState::default();
        assert!(!app.poll_load());
        assert!(app.wait_for_load().is_ok());
    }
}
