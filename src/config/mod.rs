//! Configuration module for ort-workbench.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets
//! - YAML config file loading and discovery
//! - CLI argument merging
//! - Persisted user settings
//!
//! # Configuration File
//!
//! Place a `.ort-workbench.yaml` file in your project root or
//! `~/.config/ort-workbench/`:
//!
//! ```yaml
//! tree:
//!   start_expanded: true
//! lists:
//!   text_filter_ignore_case: false
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{CONFIG_DIR_NAME, ConfigPreset, DEFAULT_MAX_RECENT_FILES, DEFAULT_THEME};
pub use file::{
    ConfigFileError, discover_config_file, generate_example_config, load_config_file,
    load_or_default, search_locations,
};
pub use types::{AppConfig, AppConfigBuilder, ListConfig, TreeConfig, WorkbenchSettings};
pub use validation::{ConfigError, Validatable};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it for validation and autocompletion of
/// `.ort-workbench.yaml` files.
pub fn generate_json_schema() -> crate::error::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
        .map_err(|e| crate::error::WorkbenchError::config(format!("serializing schema: {e}")))
}
