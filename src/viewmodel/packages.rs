//! Packages list.

use super::list_filter::ListFilterEngine;
use crate::error::Result;
use crate::model::{ExclusionStatus, ItemStatus, PackageInfo};

pub const TYPE: &str = "type";
pub const NAMESPACE: &str = "namespace";
pub const LICENSE: &str = "license";
pub const SCOPE: &str = "scope";
pub const EXCLUSION: &str = "exclusion";
pub const ISSUES: &str = "issues";
pub const VIOLATIONS: &str = "violations";
pub const VULNERABILITIES: &str = "vulnerabilities";

/// Filterable list of packages.
#[derive(Debug)]
pub struct PackagesViewModel {
    engine: ListFilterEngine<PackageInfo>,
}

impl Default for PackagesViewModel {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PackagesViewModel {
    pub fn new(text_ignore_case: bool) -> Self {
        let engine = ListFilterEngine::new()
            .with_equals_filter(TYPE, |p: &PackageInfo| p.id.kind.clone())
            .with_equals_filter(NAMESPACE, |p: &PackageInfo| p.id.namespace.clone())
            .with_contains_filter(LICENSE, PackageInfo::licenses)
            .with_contains_filter(SCOPE, |p: &PackageInfo| p.scopes.clone())
            .with_equals_filter(EXCLUSION, PackageInfo::exclusion_status)
            .with_equals_filter(ISSUES, |p: &PackageInfo| {
                ItemStatus::from_flag(p.issue_count > 0)
            })
            .with_equals_filter(VIOLATIONS, |p: &PackageInfo| {
                ItemStatus::from_flag(p.violation_count > 0)
            })
            .with_equals_filter(VULNERABILITIES, |p: &PackageInfo| {
                ItemStatus::from_flag(p.vulnerability_count > 0)
            })
            .with_text_filter(text_ignore_case, |p: &PackageInfo| {
                vec![p.id.to_coordinates(), p.purl.clone(), p.description.clone()]
            });
        Self { engine }
    }

    pub fn set_packages(&mut self, packages: Vec<PackageInfo>) {
        self.engine.set_source(packages);
    }

    pub fn set_type(&mut self, kind: Option<String>) -> Result<()> {
        self.engine.update_filter(TYPE, kind)
    }

    pub fn set_namespace(&mut self, namespace: Option<String>) -> Result<()> {
        self.engine.update_filter(NAMESPACE, namespace)
    }

    pub fn set_license(&mut self, license: Option<String>) -> Result<()> {
        self.engine.update_filter(LICENSE, license)
    }

    pub fn set_scope(&mut self, scope: Option<String>) -> Result<()> {
        self.engine.update_filter(SCOPE, scope)
    }

    pub fn set_exclusion_status(&mut self, status: Option<ExclusionStatus>) -> Result<()> {
        self.engine.update_filter(EXCLUSION, status)
    }

    pub fn set_issue_status(&mut self, status: Option<ItemStatus>) -> Result<()> {
        self.engine.update_filter(ISSUES, status)
    }

    pub fn set_violation_status(&mut self, status: Option<ItemStatus>) -> Result<()> {
        self.engine.update_filter(VIOLATIONS, status)
    }

    pub fn set_vulnerability_status(&mut self, status: Option<ItemStatus>) -> Result<()> {
        self.engine.update_filter(VULNERABILITIES, status)
    }

    pub fn set_text(&mut self, text: &str) {
        self.engine.update_text_filter(text);
    }

    pub fn filtered_items(&self) -> impl Iterator<Item = &PackageInfo> {
        self.engine.filtered_items()
    }

    pub const fn engine(&self) -> &ListFilterEngine<PackageInfo> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ListFilterEngine<PackageInfo> {
        &mut self.engine
    }
}
