//! Configuration types for ort-workbench.

use super::defaults::{CONFIG_DIR_NAME, DEFAULT_MAX_RECENT_FILES, DEFAULT_THEME};
use crate::error::{Result, WorkbenchError};
use crate::hierarchy::DEFAULT_MAX_FOREST_ITEMS;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Application configuration loaded from a config file and CLI flags.
///
/// CLI flags are layered over file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Dependency tree view options
    pub tree: TreeConfig,
    /// List view options
    pub lists: ListConfig,
    /// User settings (theme, ORT configuration, recent files)
    pub settings: WorkbenchSettings,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Expand every tree item when a snapshot is loaded.
    pub const fn start_expanded(mut self, expanded: bool) -> Self {
        self.config.tree.start_expanded = expanded;
        self
    }

    /// Limit how many items a dependency graph may expand into.
    pub const fn max_tree_items(mut self, limit: usize) -> Self {
        self.config.tree.max_tree_items = limit;
        self
    }

    /// Match the list text filter ignoring case.
    pub const fn text_filter_ignore_case(mut self, ignore_case: bool) -> Self {
        self.config.lists.text_filter_ignore_case = ignore_case;
        self
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.config.settings.theme = theme.into();
        self
    }

    pub fn ort_config_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.config.settings.ort_config_dir = dir;
        self
    }

    pub const fn max_recent_files(mut self, max: usize) -> Self {
        self.config.settings.max_recent_files = max;
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// View Configuration
// ============================================================================

/// Dependency tree view configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TreeConfig {
    /// Expand every item when a snapshot is loaded
    pub start_expanded: bool,
    /// Maximum number of items a dependency graph may expand into
    pub max_tree_items: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            start_expanded: false,
            max_tree_items: DEFAULT_MAX_FOREST_ITEMS,
        }
    }
}

/// List view configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ListConfig {
    /// Match the free-text filter ignoring case
    pub text_filter_ignore_case: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            text_filter_ignore_case: true,
        }
    }
}

// ============================================================================
// Persisted Settings
// ============================================================================

/// User settings that survive between sessions.
///
/// Stored as JSON in the user config directory, separate from the YAML
/// config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct WorkbenchSettings {
    /// Theme name: "dark", "light", or "high-contrast"
    pub theme: String,
    /// Directory holding the ORT configuration (resolutions, rules)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ort_config_dir: Option<PathBuf>,
    /// Recently opened snapshots, most recent first
    pub recent_files: Vec<PathBuf>,
    /// Maximum number of recent files to remember
    #[schemars(range(min = 1, max = 100))]
    pub max_recent_files: usize,
}

impl Default for WorkbenchSettings {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            ort_config_dir: None,
            recent_files: Vec::new(),
            max_recent_files: DEFAULT_MAX_RECENT_FILES,
        }
    }
}

impl WorkbenchSettings {
    /// Path of the settings file in the user config directory.
    #[must_use]
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME).join("settings.json"))
    }

    /// Load settings from `path`, or defaults if it is missing or invalid.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| match serde_json::from_str(&s) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    tracing::warn!("Ignoring invalid settings in {}: {}", path.display(), e);
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Load settings from the user config directory.
    #[must_use]
    pub fn load() -> Self {
        Self::settings_path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Write settings to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| WorkbenchError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| WorkbenchError::config(format!("serializing settings: {e}")))?;
        std::fs::write(path, json).map_err(|e| WorkbenchError::io(path, e))
    }

    /// Write settings to the user config directory.
    pub fn save(&self) -> Result<()> {
        match Self::settings_path() {
            Some(path) => self.save_to(&path),
            None => Err(WorkbenchError::config("no user config directory available")),
        }
    }

    /// Move `path` to the front of the recent files, keeping the list bounded.
    pub fn remember_file(&mut self, path: &Path) {
        self.recent_files.retain(|p| p != path);
        self.recent_files.insert(0, path.to_path_buf());
        self.recent_files.truncate(self.max_recent_files);
    }
}
