//! Rule violations list.

use super::list_filter::ListFilterEngine;
use crate::error::Result;
use crate::model::{Identifier, ResolutionStatus, RuleViolation, Severity};

pub const SEVERITY: &str = "severity";
pub const RULE: &str = "rule";
pub const LICENSE: &str = "license";
pub const LICENSE_SOURCE: &str = "license-source";
pub const IDENTIFIER: &str = "identifier";
pub const RESOLUTION: &str = "resolution";

/// Filterable list of rule violations.
///
/// License, license source and package are optional on a violation; a
/// violation without one of them only passes while that filter is
/// unconstrained.
#[derive(Debug)]
pub struct ViolationsViewModel {
    engine: ListFilterEngine<RuleViolation>,
}

impl Default for ViolationsViewModel {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ViolationsViewModel {
    pub fn new(text_ignore_case: bool) -> Self {
        let engine = ListFilterEngine::new()
            .with_equals_filter(SEVERITY, |v: &RuleViolation| v.severity)
            .with_equals_filter(RULE, |v: &RuleViolation| v.rule.clone())
            .with_contains_filter(LICENSE, |v: &RuleViolation| {
                v.license.iter().cloned().collect::<Vec<String>>()
            })
            .with_contains_filter(LICENSE_SOURCE, |v: &RuleViolation| {
                v.license_source.iter().cloned().collect::<Vec<String>>()
            })
            .with_contains_filter(IDENTIFIER, |v: &RuleViolation| {
                v.package.iter().cloned().collect::<Vec<Identifier>>()
            })
            .with_equals_filter(RESOLUTION, RuleViolation::resolution_status)
            .with_text_filter(text_ignore_case, |v: &RuleViolation| {
                let mut fields = vec![v.rule.clone(), v.message.clone()];
                fields.extend(v.package.as_ref().map(Identifier::to_coordinates));
                fields.extend(v.license.clone());
                fields
            });
        Self { engine }
    }

    pub fn set_violations(&mut self, violations: Vec<RuleViolation>) {
        self.engine.set_source(violations);
    }

    pub fn set_severity(&mut self, severity: Option<Severity>) -> Result<()> {
        self.engine.update_filter(SEVERITY, severity)
    }

    pub fn set_rule(&mut self, rule: Option<String>) -> Result<()> {
        self.engine.update_filter(RULE, rule)
    }

    pub fn set_license(&mut self, license: Option<String>) -> Result<()> {
        self.engine.update_filter(LICENSE, license)
    }

    pub fn set_license_source(&mut self, source: Option<String>) -> Result<()> {
        self.engine.update_filter(LICENSE_SOURCE, source)
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

    pub fn filtered_items(&self) -> impl Iterator<Item = &RuleViolation> {
        self.engine.filtered_items()
    }

    pub const fn engine(&self) -> &ListFilterEngine<RuleViolation> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ListFilterEngine<RuleViolation> {
        &mut self.engine
    }
}
