//! Severity-tagged issues and the reporter that accumulates them

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity levels for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Informational, no action required
    Info,
    /// Should be reviewed; the descriptor is still usable
    Warning,
    /// The descriptor should be treated as unusable
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    /// Location in the descriptor, e.g. `$.resources[0].schema`
    pub path: String,
    /// Fully formatted message
    pub message: String,
}

impl Issue {
    /// Create an issue
    pub fn new(severity: Severity, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.path, self.message)
    }
}

/// Accumulates issues across one validation pass
///
/// Issues keep insertion order and are never deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReporter {
    issues: Vec<Issue>,
}

impl ValidationReporter {
    /// Create an empty reporter
    pub fn new() -> Self {
        Self::default()
    }

    /// Format `template` with positional arguments and record it at the root
    pub fn report(&mut self, severity: Severity, template: &str, args: &[&str]) {
        self.report_at("$", severity, template, args);
    }

    /// Format `template` with positional arguments and record it at `path`
    pub fn report_at(&mut self, path: &str, severity: Severity, template: &str, args: &[&str]) {
        self.push(Issue::new(severity, path, format_message(template, args)));
    }

    /// Record an already built issue
    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Whether any issue has `Error` severity
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Whether any issue has `Warning` severity
    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Warning)
    }

    /// All issues in the order they were reported
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Issues with `Error` severity
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.by_severity(Severity::Error)
    }

    /// Issues with `Warning` severity
    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.by_severity(Severity::Warning)
    }

    /// Issues with the given severity
    pub fn by_severity(&self, severity: Severity) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    /// Highest severity reported, if any
    pub fn max_severity(&self) -> Option<Severity> {
        self.issues.iter().map(|i| i.severity).max()
    }

    /// Number of issues
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Check if nothing was reported
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Consume the reporter and return the issues
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

/// Substitute `{0}`, `{1}`, ... in `template`
///
/// Placeholders without a matching argument, and braces that are not a
/// placeholder, are copied verbatim.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substituted = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            let arg = args.get(index)?;
            Some((arg, close))
        });

        match substituted {
            Some((arg, close)) => {
                output.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                output.push('{');
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_positional() {
        assert_eq!(
            format_message("The value '{0}' is not supported for the required property '{1}'", &["null", "type"]),
            "The value 'null' is not supported for the required property 'type'"
        );
        assert_eq!(format_message("{1}-{0}-{1}", &["a", "b"]), "b-a-b");
    }

    #[test]
    fn test_format_message_never_fails() {
        assert_eq!(format_message("missing {2}", &["a"]), "missing {2}");
        assert_eq!(format_message("{not a placeholder}", &[]), "{not a placeholder}");
        assert_eq!(format_message("dangling {", &[]), "dangling {");
        assert_eq!(format_message("", &["a"]), "");
    }

    #[test]
    fn test_has_errors_ignores_warnings() {
        let mut reporter = ValidationReporter::new();
        assert!(!reporter.has_errors());

        reporter.report(Severity::Warning, "first", &[]);
        reporter.report(Severity::Info, "second", &[]);
        assert!(!reporter.has_errors());
        assert!(reporter.has_warnings());

        reporter.report(Severity::Error, "third", &[]);
        assert!(reporter.has_errors());
        assert_eq!(reporter.max_severity(), Some(Severity::Error));
    }

    #[test]
    fn test_no_deduplication_and_order_kept() {
        let mut reporter = ValidationReporter::new();
        reporter.report(Severity::Error, "same", &[]);
        reporter.report_at("$.resources[0]", Severity::Warning, "other", &[]);
        reporter.report(Severity::Error, "same", &[]);

        let messages: Vec<_> = reporter.issues().iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages, ["same", "other", "same"]);
        assert_eq!(reporter.errors().count(), 2);
        assert_eq!(reporter.warnings().count(), 1);
        assert_eq!(reporter.issues()[1].path, "$.resources[0]");
    }

    #[test]
    fn test_issue_display() {
        let issue = Issue::new(Severity::Error, "$", "Required property 'name' was not supplied");
        assert_eq!(issue.to_string(), "[error] $: Required property 'name' was not supplied");
    }
}
