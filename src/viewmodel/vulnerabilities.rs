//! Vulnerabilities list.

use super::list_filter::ListFilterEngine;
use crate::error::Result;
use crate::model::{Identifier, ResolutionStatus, Vulnerability};

pub const ADVISOR: &str = "advisor";
pub const SEVERITY: &str = "severity";
pub const IDENTIFIER: &str = "identifier";
pub const RESOLUTION: &str = "resolution";

/// Filterable list of vulnerabilities.
///
/// Severities are free-form ratings taken from the references, so a
/// vulnerability matches a severity if any of its references carries it.
#[derive(Debug)]
pub struct VulnerabilitiesViewModel {
    engine: ListFilterEngine<Vulnerability>,
}

impl Default for VulnerabilitiesViewModel {
    fn default() -> Self {
        Self::new(true)
    }
}

impl VulnerabilitiesViewModel {
    pub fn new(text_ignore_case: bool) -> Self {
        let engine = ListFilterEngine::new()
            .with_equals_filter(ADVISOR, |v: &Vulnerability| v.advisor.clone())
            .with_contains_filter(SEVERITY, Vulnerability::severities)
            .with_equals_filter(IDENTIFIER, |v: &Vulnerability| v.package.clone())
            .with_equals_filter(RESOLUTION, Vulnerability::resolution_status)
            .with_text_filter(text_ignore_case, |v: &Vulnerability| {
                let mut fields = vec![v.package.to_coordinates(), v.id.clone()];
                fields.extend(v.summary.clone());
                fields
            });
        Self { engine }
    }

    pub fn set_vulnerabilities(&mut self, vulnerabilities: Vec<Vulnerability>) {
        self.engine.set_source(vulnerabilities);
    }

    pub fn set_advisor(&mut self, advisor: Option<String>) -> Result<()> {
        self.engine.update_filter(ADVISOR, advisor)
    }

    pub fn set_severity(&mut self, severity: Option<String>) -> Result<()> {
        self.engine.update_filter(SEVERITY, severity)
    }

    pub fn set_identifier(&mut self, id: Option<Identifier>) -> Result<()> {
        self.engine.update_filter(IDENTIFIER, id)
    }

    pub fn set_resolution_status(&mut self, status: Option<ResolutionStatus>) -> Result<()> {
        self.engine.update_filter(RESOLUTION, status)
    }

    pub fn set_text(&mut self, text: &str) {
        self.engine.update_text_filter(text);
    }

    pub fn filtered_items(&self) -> impl Iterator<Item = &Vulnerability> {
        self.engine.filtered_items()
    }

    pub const fn engine(&self) -> &ListFilterEngine<Vulnerability> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ListFilterEngine<Vulnerability> {
        &mut self.engine
    }
}
