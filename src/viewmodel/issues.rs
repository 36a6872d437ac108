//! Issues list.

use super::list_filter::{FilterOption, ListFilterEngine};
use crate::error::Result;
use crate::model::{Identifier, Issue, ResolutionStatus, Severity, Tool};

pub const SEVERITY: &str = "severity";
pub const SOURCE: &str = "source";
pub const TOOL: &str = "tool";
pub const IDENTIFIER: &str = "identifier";
pub const RESOLUTION: &str = "resolution";

/// Filterable list of issues.
#[derive(Debug)]
pub struct IssuesViewModel {
    engine: ListFilterEngine<Issue>,
}

impl Default for IssuesViewModel {
    fn default() -> Self {
        Self::new(true)
    }
}

impl IssuesViewModel {
    pub fn new(text_ignore_case: bool) -> Self {
        let engine = ListFilterEngine::new()
            .with_equals_filter(SEVERITY, |i: &Issue| i.severity)
            .with_equals_filter(SOURCE, |i: &Issue| i.source.clone())
            .with_equals_filter(TOOL, |i: &Issue| i.tool)
            .with_equals_filter(IDENTIFIER, |i: &Issue| i.id.clone())
            .with_equals_filter(RESOLUTION, Issue::resolution_status)
            .with_text_filter(text_ignore_case, |i: &Issue| {
                vec![i.id.to_coordinates(), i.source.clone(), i.message.clone()]
            });
        Self { engine }
    }

    pub fn set_issues(&mut self, issues: Vec<Issue>) {
        self.engine.set_source(issues);
    }

    pub fn set_severity(&mut self, severity: Option<Severity>) -> Result<()> {
        self.engine.update_filter(SEVERITY, severity)
    }

    pub fn set_issue_source(&mut self, source: Option<String>) -> Result<()> {
        self.engine.update_filter(SOURCE, source)
    }

    pub fn set_tool(&mut self, tool: Option<Tool>) -> Result<()> {
        self.engine.update_filter(TOOL, tool)
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

    pub fn severity_options(&self) -> Result<&FilterOption<Severity>> {
        self.engine.filter_option(SEVERITY)
    }

    pub fn filtered_items(&self) -> impl Iterator<Item = &Issue> {
        self.engine.filtered_items()
    }

    pub const fn engine(&self) -> &ListFilterEngine<Issue> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ListFilterEngine<Issue> {
        &mut self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Resolution;

    fn issue(name: &str, tool: Tool, severity: Severity, message: &str) -> Issue {
        Issue {
            id: Identifier::new("NPM", "", name, "1.0.0"),
            tool,
            source: format!("{tool}-source"),
            message: message.to_string(),
            severity,
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            resolutions: Vec::new(),
        }
    }

    fn sample() -> IssuesViewModel {
        let mut resolved = issue("left-pad", Tool::Scanner, Severity::Warning, "Timeout");
        resolved.resolutions.push(Resolution {
            reason: "SCANNER_ISSUE".into(),
            comment: "known".into(),
        });

        let mut view = IssuesViewModel::default();
        view.set_issues(vec![
            issue("lodash", Tool::Analyzer, Severity::Error, "Could not resolve"),
            resolved,
            issue("react", Tool::Analyzer, Severity::Hint, "Deprecated"),
        ]);
        view
    }

    fn names(view: &IssuesViewModel) -> Vec<&str> {
        view.filtered_items().map(|i| i.id.name.as_str()).collect()
    }

    #[test]
    fn test_registers_all_filters() {
        let view = IssuesViewModel::default();
        let names: Vec<&str> = view.engine().filter_names().collect();
        assert_eq!(names, vec![SEVERITY, SOURCE, TOOL, IDENTIFIER, RESOLUTION]);
    }

    #[test]
    fn test_tool_and_resolution_filters() {
        let mut view = sample();
        view.set_tool(Some(Tool::Analyzer)).unwrap();
        assert_eq!(names(&view), vec!["lodash", "react"]);

        view.set_tool(None).unwrap();
        view.set_resolution_status(Some(ResolutionStatus::Resolved))
            .unwrap();
        assert_eq!(names(&view), vec!["left-pad"]);
    }

    #[test]
    fn test_severity_options_come_from_source() {
        let view = sample();
        assert_eq!(
            view.severity_options().unwrap().available,
            vec![Severity::Hint, Severity::Warning, Severity::Error]
        );
    }

    #[test]
    fn test_text_matches_coordinates_and_message() {
        let mut view = sample();
        view.set_text("npm::react");
        assert_eq!(names(&view), vec!["react"]);
        view.set_text("timeout");
        assert_eq!(names(&view), vec!["left-pad"]);
    }
}
