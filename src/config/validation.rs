//! Configuration validation for ort-workbench.

use super::types::{AppConfig, TreeConfig, WorkbenchSettings};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

const VALID_THEMES: &[&str] = &["dark", "light", "high-contrast"];

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.tree.validate();
        errors.extend(self.settings.validate());
        errors
    }
}

impl Validatable for TreeConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.max_tree_items == 0 {
            errors.push(ConfigError {
                field: "tree.max_tree_items".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }
        errors
    }
}

impl Validatable for WorkbenchSettings {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !VALID_THEMES.contains(&self.theme.as_str()) {
            errors.push(ConfigError {
                field: "settings.theme".to_string(),
                message: format!(
                    "Invalid theme '{}'. Valid options: {}",
                    self.theme,
                    VALID_THEMES.join(", ")
                ),
            });
        }

        if self.max_recent_files == 0 || self.max_recent_files > 100 {
            errors.push(ConfigError {
                field: "settings.max_recent_files".to_string(),
                message: format!(
                    "Must be between 1 and 100, got {}",
                    self.max_recent_files
                ),
            });
        }

        if let Some(dir) = &self.ort_config_dir
            && !dir.is_dir()
        {
            errors.push(ConfigError {
                field: "settings.ort_config_dir".to_string(),
                message: format!("Directory does not exist: {}", dir.display()),
            });
        }

        errors
    }
}
