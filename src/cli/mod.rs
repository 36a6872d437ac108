//! CLI command handlers.
//!
//! Testable command handlers invoked by main.rs. Each handler loads a
//! snapshot into an [`AppState`], drives one view-model and prints it.

mod list;
mod tree;

pub use list::{
    IssueFilters, ListOptions, PackageFilters, ViolationFilters, VulnerabilityFilters,
    run_issues, run_packages, run_violations, run_vulnerabilities, write_list,
};
pub use tree::{TreeOptions, render_tree, run_tree};

use crate::app::AppState;
use crate::config::{AppConfig, WorkbenchSettings};
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;

/// Load `snapshot` on the background loader and wait for it.
fn load_app(snapshot: &Path, config: AppConfig) -> Result<AppState> {
    let mut app = AppState::new(config);
    app.begin_load(snapshot);
    app.wait_for_load()
        .with_context(|| format!("failed to open {}", snapshot.display()))?;
    remember_snapshot(snapshot, &app.config().settings);
    Ok(app)
}

/// Record `snapshot` in the persisted recent files.
///
/// Failing to persist is not an error for the command that opened it.
fn remember_snapshot(snapshot: &Path, configured: &WorkbenchSettings) {
    let mut settings = WorkbenchSettings::load();
    settings.max_recent_files = configured.max_recent_files;
    let path = std::fs::canonicalize(snapshot).unwrap_or_else(|_| snapshot.to_path_buf());
    settings.remember_file(&path);
    if let Err(e) = settings.save() {
        tracing::warn!("Could not update recent files: {}", e);
    }
}

/// Run the recent command: print the recently opened snapshots.
pub fn run_recent() -> Result<()> {
    let settings = WorkbenchSettings::load();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_recent(&settings, &mut out)?;
    Ok(())
}

/// Write the recent files, most recent first.
pub fn write_recent(settings: &WorkbenchSettings, out: &mut impl Write) -> io::Result<()> {
    if settings.recent_files.is_empty() {
        return writeln!(out, "No recently opened snapshots.");
    }
    for (i, path) in settings.recent_files.iter().enumerate() {
        writeln!(out, "{:>2}. {}", i + 1, path.display())?;
    }
    Ok(())
}
