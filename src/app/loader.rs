//! Snapshot loading.

use crate::error::{ErrorContext, LoadErrorKind, Result, WorkbenchError};
use crate::model::WorkbenchSnapshot;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Snapshot file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(WorkbenchError::load(
                format!("reading {}", path.display()),
                LoadErrorKind::UnsupportedExtension(extension),
            )),
        }
    }
}

/// Parse a snapshot from text in the given format.
pub fn parse_snapshot(content: &str, format: SnapshotFormat) -> Result<WorkbenchSnapshot> {
    let snapshot = match format {
        SnapshotFormat::Json => serde_json::from_str(content)?,
        SnapshotFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(snapshot)
}

/// Read and parse a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<WorkbenchSnapshot> {
    let format = SnapshotFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| WorkbenchError::io(path, e))?;
    let snapshot = parse_snapshot(&content, format)
        .with_context(|| format!("parsing {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        issues = snapshot.issues.len(),
        violations = snapshot.violations.len(),
        vulnerabilities = snapshot.vulnerabilities.len(),
        packages = snapshot.packages.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

/// Result of one background load, tagged with the generation that started it.
#[derive(Debug)]
pub(crate) struct LoadOutcome {
    pub generation: u64,
    pub result: Result<WorkbenchSnapshot>,
}

/// Handle of a load running on a background thread.
#[derive(Debug)]
pub(crate) struct PendingLoad {
    pub generation: u64,
    receiver: Receiver<LoadOutcome>,
}

impl PendingLoad {
    /// Start loading `path` on a new thread.
    pub fn spawn(path: &Path, generation: u64) -> Self {
        let (sender, receiver) = mpsc::channel();
        let path = path.to_path_buf();
        thread::spawn(move || {
            let result = load_snapshot(&path);
            // The receiver is gone when the load was superseded and dropped.
            let _ = sender.send(LoadOutcome { generation, result });
        });
        Self {
            generation,
            receiver,
        }
    }

    /// The outcome if the thread has finished.
    pub fn try_take(&self) -> Option<LoadOutcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(self.interrupted()),
        }
    }

    /// Block until the thread has finished.
    pub fn wait(&self) -> LoadOutcome {
        self.receiver.recv().unwrap_or_else(|_| self.interrupted())
    }

    fn interrupted(&self) -> LoadOutcome {
        LoadOutcome {
            generation: self.generation,
            result: Err(WorkbenchError::load(
                "background load",
                LoadErrorKind::Interrupted,
            )),
        }
    }
}
