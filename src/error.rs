//! Unified error types for ort-workbench.
//!
//! The view-state engine itself is total over well-formed input; errors only
//! arise at its edges: expanding a cyclic dependency graph, addressing a
//! filter that was never registered, loading a snapshot, and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ort-workbench operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum WorkbenchError {
    /// The supplied hierarchy cannot be flattened
    #[error("Malformed hierarchy: {context}")]
    MalformedHierarchy {
        context: String,
        #[source]
        source: HierarchyErrorKind,
    },

    /// A filter was addressed incorrectly
    #[error("Filter operation failed: {context}")]
    Filter {
        context: String,
        #[source]
        source: FilterErrorKind,
    },

    /// A workbench snapshot could not be loaded
    #[error("Failed to load snapshot: {context}")]
    Load {
        context: String,
        #[source]
        source: LoadErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific hierarchy error kinds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HierarchyErrorKind {
    #[error("cycle detected: {}", .0.join(" -> "))]
    Cycle(Vec<String>),

    #[error("node '{child}' referenced by '{parent}' is not defined")]
    UnknownNode { parent: String, child: String },

    #[error("root node '{0}' is not defined")]
    UnknownRoot(String),

    #[error("expanded tree exceeds {limit} items")]
    TooLarge { limit: usize },
}

/// Specific filter error kinds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FilterErrorKind {
    #[error("no filter named '{0}' is registered")]
    UnknownFilter(String),

    #[error("filter '{name}' does not hold values of type {expected}")]
    TypeMismatch { name: String, expected: &'static str },
}

/// Specific load error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),

    #[error("Unsupported snapshot extension: {0} (expected json, yaml or yml)")]
    UnsupportedExtension(String),

    #[error("Loader thread terminated before delivering a result")]
    Interrupted,
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for ort-workbench operations
pub type Result<T> = std::result::Result<T, WorkbenchError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl WorkbenchError {
    /// Create a hierarchy error with context
    pub fn hierarchy(context: impl Into<String>, source: HierarchyErrorKind) -> Self {
        Self::MalformedHierarchy {
            context: context.into(),
            source,
        }
    }

    /// Create a hierarchy error for a detected cycle
    pub fn cycle(path: Vec<String>) -> Self {
        Self::hierarchy("expanding dependency graph", HierarchyErrorKind::Cycle(path))
    }

    /// Create a filter error with context
    pub fn filter(context: impl Into<String>, source: FilterErrorKind) -> Self {
        Self::Filter {
            context: context.into(),
            source,
        }
    }

    /// Create a load error with context
    pub fn load(context: impl Into<String>, source: LoadErrorKind) -> Self {
        Self::Load {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error reports a malformed hierarchy.
    #[must_use]
    pub const fn is_malformed_hierarchy(&self) -> bool {
        matches!(self, Self::MalformedHierarchy { .. })
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for WorkbenchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for WorkbenchError {
    fn from(err: serde_json::Error) -> Self {
        Self::load("JSON deserialization", LoadErrorKind::InvalidJson(err.to_string()))
    }
}

impl From<serde_yaml::Error> for WorkbenchError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::load("YAML deserialization", LoadErrorKind::InvalidYaml(err.to_string()))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained outermost first, so an error surfaced from
/// three layers reads `"outer: middle: inner"`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<WorkbenchError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: WorkbenchError, new_ctx: &str) -> WorkbenchError {
    match err {
        WorkbenchError::MalformedHierarchy {
            context: existing,
            source,
        } => WorkbenchError::MalformedHierarchy {
            context: chain_context(new_ctx, &existing),
            source,
        },
        WorkbenchError::Filter {
            context: existing,
            source,
        } => WorkbenchError::Filter {
            context: chain_context(new_ctx, &existing),
            source,
        },
        WorkbenchError::Load {
            context: existing,
            source,
        } => WorkbenchError::Load {
            context: chain_context(new_ctx, &existing),
            source,
        },
        WorkbenchError::Io {
            path,
            message,
            source,
        } => WorkbenchError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        WorkbenchError::Config(msg) => WorkbenchError::Config(chain_context(new_ctx, &msg)),
        WorkbenchError::Validation(msg) => {
            WorkbenchError::Validation(chain_context(new_ctx, &msg))
        }
    }
}

/// Chain two context strings together.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| WorkbenchError::Validation(context.into()))
    }
}
