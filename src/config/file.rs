//! Configuration file loading and discovery.

use super::defaults::CONFIG_DIR_NAME;
use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".ort-workbench.yaml",
    ".ort-workbench.yml",
    "ort-workbench.yaml",
    "ort-workbench.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/ort-workbench/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    search_locations()
        .iter()
        .find_map(|dir| find_config_in_dir(dir))
}

/// Directories searched for a config file, in order.
#[must_use]
pub fn search_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        locations.push(cwd);
    }
    if let Some(git_root) = find_git_root() {
        locations.push(git_root);
    }
    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join(CONFIG_DIR_NAME));
    }
    if let Some(home) = dirs::home_dir() {
        locations.push(home);
    }
    locations
}

fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, so CLI flags
    /// left at their defaults keep the file settings.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        if other.tree.start_expanded {
            self.tree.start_expanded = true;
        }
        if other.tree.max_tree_items != defaults.tree.max_tree_items {
            self.tree.max_tree_items = other.tree.max_tree_items;
        }
        if other.lists.text_filter_ignore_case != defaults.lists.text_filter_ignore_case {
            self.lists.text_filter_ignore_case = other.lists.text_filter_ignore_case;
        }

        if other.settings.theme != defaults.settings.theme {
            self.settings.theme.clone_from(&other.settings.theme);
        }
        if other.settings.ort_config_dir.is_some() {
            self.settings
                .ort_config_dir
                .clone_from(&other.settings.ort_config_dir);
        }
        if other.settings.max_recent_files != defaults.settings.max_recent_files {
            self.settings.max_recent_files = other.settings.max_recent_files;
        }
        if !other.settings.recent_files.is_empty() {
            self.settings
                .recent_files
                .clone_from(&other.settings.recent_files);
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_example_config() -> String {
    r"# ORT Workbench Configuration
# ===========================
#
# Place this file at:
#   - .ort-workbench.yaml in your project root
#   - ~/.config/ort-workbench/ort-workbench.yaml for global config
#
# CLI arguments always override file settings.

# Dependency tree view
tree:
  # Expand every item when a result is loaded
  start_expanded: false
  # Refuse dependency graphs that expand into more items than this
  max_tree_items: 100000

# Issue, violation, vulnerability and package lists
lists:
  # Match the free-text filter ignoring case
  text_filter_ignore_case: true

# User settings
settings:
  # Theme: dark, light, high-contrast
  theme: dark
  # Directory holding the ORT configuration
  # ort_config_dir: ~/.ort/config
  max_recent_files: 10
"
    .to_string()
}
