//! List command handlers.
//!
//! Each list command loads a snapshot, applies the requested filters to the
//! matching view-model and prints the filtered records.

use super::load_app;
use crate::config::AppConfig;
use crate::model::{
    ExclusionStatus, Identifier, Issue, ItemStatus, PackageInfo, ResolutionStatus, RuleViolation,
    Severity, Tool, Vulnerability,
};
use crate::viewmodel::ListFilterEngine;
use anyhow::Result;
use std::io::{self, Write};
use std::path::PathBuf;

/// Options shared by all list commands.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub snapshot: PathBuf,
    /// Free-text filter
    pub text: Option<String>,
    /// Print the available values of every filter
    pub show_options: bool,
}

#[derive(Debug, Clone, Default)]
pub struct IssueFilters {
    pub severity: Option<Severity>,
    pub source: Option<String>,
    pub tool: Option<Tool>,
    pub identifier: Option<Identifier>,
    pub resolution: Option<ResolutionStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct ViolationFilters {
    pub severity: Option<Severity>,
    pub rule: Option<String>,
    pub license: Option<String>,
    pub license_source: Option<String>,
    pub identifier: Option<Identifier>,
    pub resolution: Option<ResolutionStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct VulnerabilityFilters {
    pub advisor: Option<String>,
    pub severity: Option<String>,
    pub identifier: Option<Identifier>,
    pub resolution: Option<ResolutionStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct PackageFilters {
    pub kind: Option<String>,
    pub namespace: Option<String>,
    pub license: Option<String>,
    pub scope: Option<String>,
    pub exclusion: Option<ExclusionStatus>,
    pub issues: Option<ItemStatus>,
    pub violations: Option<ItemStatus>,
    pub vulnerabilities: Option<ItemStatus>,
}

/// Run the issues command
pub fn run_issues(options: &ListOptions, filters: IssueFilters, config: AppConfig) -> Result<()> {
    let mut app = load_app(&options.snapshot, config)?;
    let view = &mut app.issues;
    view.set_severity(filters.severity)?;
    view.set_issue_source(filters.source)?;
    view.set_tool(filters.tool)?;
    view.set_identifier(filters.identifier)?;
    view.set_resolution_status(filters.resolution)?;
    if let Some(text) = &options.text {
        view.set_text(text);
    }
    print_list(view.engine(), "issues", options.show_options, format_issue)
}

/// Run the violations command
pub fn run_violations(
    options: &ListOptions,
    filters: ViolationFilters,
    config: AppConfig,
) -> Result<()> {
    let mut app = load_app(&options.snapshot, config)?;
    let view = &mut app.violations;
    view.set_severity(filters.severity)?;
    view.set_rule(filters.rule)?;
    view.set_license(filters.license)?;
    view.set_license_source(filters.license_source)?;
    view.set_identifier(filters.identifier)?;
    view.set_resolution_status(filters.resolution)?;
    if let Some(text) = &options.text {
        view.set_text(text);
    }
    print_list(view.engine(), "violations", options.show_options, format_violation)
}

/// Run the vulnerabilities command
pub fn run_vulnerabilities(
    options: &ListOptions,
    filters: VulnerabilityFilters,
    config: AppConfig,
) -> Result<()> {
    let mut app = load_app(&options.snapshot, config)?;
    let view = &mut app.vulnerabilities;
    view.set_advisor(filters.advisor)?;
    view.set_severity(filters.severity)?;
    view.set_identifier(filters.identifier)?;
    view.set_resolution_status(filters.resolution)?;
    if let Some(text) = &options.text {
        view.set_text(text);
    }
    print_list(
        view.engine(),
        "vulnerabilities",
        options.show_options,
        format_vulnerability,
    )
}

/// Run the packages command
pub fn run_packages(
    options: &ListOptions,
    filters: PackageFilters,
    config: AppConfig,
) -> Result<()> {
    let mut app = load_app(&options.snapshot, config)?;
    let view = &mut app.packages;
    view.set_type(filters.kind)?;
    view.set_namespace(filters.namespace)?;
    view.set_license(filters.license)?;
    view.set_scope(filters.scope)?;
    view.set_exclusion_status(filters.exclusion)?;
    view.set_issue_status(filters.issues)?;
    view.set_violation_status(filters.violations)?;
    view.set_vulnerability_status(filters.vulnerabilities)?;
    if let Some(text) = &options.text {
        view.set_text(text);
    }
    print_list(view.engine(), "packages", options.show_options, format_package)
}

fn print_list<R: 'static>(
    engine: &ListFilterEngine<R>,
    noun: &str,
    show_options: bool,
    format: fn(&R) -> String,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_list(engine, noun, show_options, format, &mut out)?;
    Ok(())
}

/// Write the filtered records, a count line and optionally the filter options.
pub fn write_list<R: 'static>(
    engine: &ListFilterEngine<R>,
    noun: &str,
    show_options: bool,
    format: fn(&R) -> String,
    out: &mut impl Write,
) -> io::Result<()> {
    for record in engine.filtered_items() {
        writeln!(out, "{}", format(record))?;
    }
    writeln!(
        out,
        "{} of {} {noun} shown ({} active filters)",
        engine.filtered_len(),
        engine.source().len(),
        engine.active_filter_count()
    )?;

    if show_options {
        for (name, option) in engine.describe_filters() {
            let selected = option.selected.as_deref().unwrap_or("any");
            writeln!(
                out,
                "  {name} [{selected}]: {}",
                option.available.join(", ")
            )?;
        }
    }
    Ok(())
}

fn resolved_marker(status: ResolutionStatus) -> &'static str {
    match status {
        ResolutionStatus::Resolved => " (resolved)",
        ResolutionStatus::Unresolved => "",
    }
}

fn format_issue(issue: &Issue) -> String {
    format!(
        "{:<7} {} [{}/{}] {}{}",
        issue.severity,
        issue.id,
        issue.tool,
        issue.source,
        issue.message,
        resolved_marker(issue.resolution_status())
    )
}

fn format_violation(violation: &RuleViolation) -> String {
    let package = violation
        .package
        .as_ref()
        .map_or_else(|| "-".to_string(), Identifier::to_coordinates);
    let license = violation.license.as_deref().unwrap_or("-");
    format!(
        "{:<7} {} {package} {license} {}{}",
        violation.severity,
        violation.rule,
        violation.message,
        resolved_marker(violation.resolution_status())
    )
}

fn format_vulnerability(vulnerability: &Vulnerability) -> String {
    let severities = vulnerability.severities().join("/");
    format!(
        "{} {} [{}] {} {}{}",
        vulnerability.id,
        vulnerability.package,
        vulnerability.advisor,
        if severities.is_empty() { "-" } else { &severities },
        vulnerability.summary.as_deref().unwrap_or(""),
        resolved_marker(vulnerability.resolution_status())
    )
}

fn format_package(package: &PackageInfo) -> String {
    let licenses = package.licenses().join(" AND ");
    let mut line = format!(
        "{} {}",
        package.id,
        if licenses.is_empty() { "-" } else { &licenses }
    );
    if package.is_excluded {
        line.push_str(" (excluded)");
    }
    line
}
