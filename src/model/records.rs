//! Records shown by the list views.
//!
//! These are produced outside this crate from a loaded analysis result; the
//! workbench only indexes, filters and displays them.

use super::Identifier;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of an issue or rule violation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Hint,
    Warning,
    #[default]
    Error,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hint => "HINT",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hint" => Ok(Self::Hint),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            _ => Err(format!("invalid severity '{s}' (expected hint, warning or error)")),
        }
    }
}

/// The tool that reported an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tool {
    Analyzer,
    Scanner,
    Advisor,
    Evaluator,
}

impl Tool {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Analyzer => "Analyzer",
            Self::Scanner => "Scanner",
            Self::Advisor => "Advisor",
            Self::Evaluator => "Evaluator",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "analyzer" => Ok(Self::Analyzer),
            "scanner" => Ok(Self::Scanner),
            "advisor" => Ok(Self::Advisor),
            "evaluator" => Ok(Self::Evaluator),
            _ => Err(format!(
                "invalid tool '{s}' (expected analyzer, scanner, advisor or evaluator)"
            )),
        }
    }
}

/// A resolution attached to an issue, violation or vulnerability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub reason: String,
    #[serde(default)]
    pub comment: String,
}

/// Three-valued status filters map onto these two values; "no constraint"
/// is the absence of a selection.
macro_rules! status_enum {
    ($(#[$meta:meta])* $name:ident { $yes:ident => $yes_label:literal, $no:ident => $no_label:literal }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $yes,
            $no,
        }

        impl $name {
            /// Map a "has related items" flag to a status.
            pub const fn from_flag(flag: bool) -> Self {
                if flag { Self::$yes } else { Self::$no }
            }

            pub const fn label(self) -> &'static str {
                match self {
                    Self::$yes => $yes_label,
                    Self::$no => $no_label,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lower = s.to_ascii_lowercase();
                if lower == $yes_label.to_ascii_lowercase() {
                    Ok(Self::$yes)
                } else if lower == $no_label.to_ascii_lowercase() {
                    Ok(Self::$no)
                } else {
                    Err(format!(
                        "invalid value '{s}' (expected {} or {})",
                        $yes_label.to_ascii_lowercase(),
                        $no_label.to_ascii_lowercase()
                    ))
                }
            }
        }
    };
}

status_enum!(
    /// Whether a record carries at least one resolution.
    ResolutionStatus { Resolved => "Resolved", Unresolved => "Unresolved" }
);

status_enum!(
    /// Whether a package is excluded from the analysis.
    ExclusionStatus { Excluded => "Excluded", Included => "Included" }
);

status_enum!(
    /// Whether a package has related items (issues, violations, vulnerabilities).
    ItemStatus { Present => "Present", Absent => "Absent" }
);

impl ResolutionStatus {
    pub fn of(resolutions: &[Resolution]) -> Self {
        Self::from_flag(!resolutions.is_empty())
    }
}

/// An issue reported by one of the tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: Identifier,
    pub tool: Tool,
    pub source: String,
    pub message: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub resolutions: Vec<Resolution>,
}

impl Issue {
    pub fn resolution_status(&self) -> ResolutionStatus {
        ResolutionStatus::of(&self.resolutions)
    }
}

/// A rule violation reported by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleViolation {
    pub rule: String,
    #[serde(default)]
    pub package: Option<Identifier>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub license_source: Option<String>,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub how_to_fix: String,
    #[serde(default)]
    pub resolutions: Vec<Resolution>,
}

impl RuleViolation {
    pub fn resolution_status(&self) -> ResolutionStatus {
        ResolutionStatus::of(&self.resolutions)
    }
}

/// A severity rating of a vulnerability from one reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityReference {
    pub url: String,
    #[serde(default)]
    pub scoring_system: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
}

/// A vulnerability found by an advisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub package: Identifier,
    pub advisor: String,
    pub id: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub references: Vec<VulnerabilityReference>,
    #[serde(default)]
    pub resolutions: Vec<Resolution>,
}

impl Vulnerability {
    pub fn resolution_status(&self) -> ResolutionStatus {
        ResolutionStatus::of(&self.resolutions)
    }

    /// Distinct severity ratings across all references.
    pub fn severities(&self) -> Vec<String> {
        let mut severities: Vec<String> = self
            .references
            .iter()
            .filter_map(|r| r.severity.clone())
            .collect();
        severities.sort();
        severities.dedup();
        severities
    }
}

/// A package together with the counters the package list filters on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub id: Identifier,
    #[serde(default)]
    pub purl: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub homepage: String,
    #[serde(default)]
    pub declared_licenses: Vec<String>,
    #[serde(default)]
    pub concluded_license: Option<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub is_excluded: bool,
    #[serde(default)]
    pub issue_count: usize,
    #[serde(default)]
    pub violation_count: usize,
    #[serde(default)]
    pub vulnerability_count: usize,
}

impl PackageInfo {
    /// Declared licenses plus the concluded license, if any.
    pub fn licenses(&self) -> Vec<String> {
        let mut licenses = self.declared_licenses.clone();
        if let Some(concluded) = &self.concluded_license
            && !licenses.contains(concluded)
        {
            licenses.push(concluded.clone());
        }
        licenses
    }

    pub const fn exclusion_status(&self) -> ExclusionStatus {
        ExclusionStatus::from_flag(self.is_excluded)
    }
}
