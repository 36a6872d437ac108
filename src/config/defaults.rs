//! Default values and presets for ort-workbench.

use super::types::{AppConfig, ListConfig, TreeConfig};

/// Directory under the user config directory holding workbench files.
pub const CONFIG_DIR_NAME: &str = "ort-workbench";

pub const DEFAULT_THEME: &str = "dark";

pub const DEFAULT_MAX_RECENT_FILES: usize = 10;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Collapsed tree, case-insensitive text filter
    Default,
    /// Fully expanded tree for browsing small results
    Explore,
    /// Case-sensitive text filter
    Exact,
}

impl ConfigPreset {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Explore => "explore",
            Self::Exact => "exact",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "explore" | "expanded" => Some(Self::Explore),
            "exact" | "case-sensitive" => Some(Self::Exact),
            _ => None,
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Explore, Self::Exact]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl AppConfig {
    /// Create a configuration from a preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Explore => Self {
                tree: TreeConfig {
                    start_expanded: true,
                    ..TreeConfig::default()
                },
                ..Self::default()
            },
            ConfigPreset::Exact => Self {
                lists: ListConfig {
                    text_filter_ignore_case: false,
                },
                ..Self::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_round_trip() {
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
        }
        assert_eq!(ConfigPreset::from_name("EXPANDED"), Some(ConfigPreset::Explore));
        assert_eq!(ConfigPreset::from_name("unknown"), None);
    }

    #[test]
    fn test_from_preset() {
        assert!(AppConfig::from_preset(ConfigPreset::Explore).tree.start_expanded);
        assert!(
            !AppConfig::from_preset(ConfigPreset::Exact)
                .lists
                .text_filter_ignore_case
        );
        assert_eq!(AppConfig::from_preset(ConfigPreset::Default), AppConfig::default());
    }
}
