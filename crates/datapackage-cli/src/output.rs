//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with specialized
//! rendering for validation reports and resolved column definitions.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use datapackage_core::{ColumnDefinition, Issue, Severity, ValidationReporter};
use serde::Serialize;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a validation report, grouped by severity
    fn format_report(&self, reporter: &ValidationReporter) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_report(&self, reporter: &ValidationReporter) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_report_human(reporter)),
            _ => self.format(&ReportDocument::new(reporter)),
        }
    }
}

/// Machine-readable shape of a validation report
#[derive(Debug, Serialize)]
struct ReportDocument<'a> {
    valid: bool,
    errors: usize,
    warnings: usize,
    issues: &'a [Issue],
}

impl<'a> ReportDocument<'a> {
    fn new(reporter: &'a ValidationReporter) -> Self {
        Self {
            valid: !reporter.has_errors(),
            errors: reporter.errors().count(),
            warnings: reporter.warnings().count(),
            issues: reporter.issues(),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    verbose: u8,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, verbose: u8) -> Self {
        Self::with_writer(format, use_color, quiet, verbose, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        verbose: u8,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            verbose,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write debug information if verbose mode is enabled
    pub fn debug(&mut self, message: &str) -> Result<()> {
        if self.verbose == 0 || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "DEBUG:".dimmed(), message.dimmed()))
        } else {
            self.writeln(&format!("DEBUG: {}", message))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");

        if formatted.ends_with('\n') {
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }

    /// Write a validation report
    ///
    /// An empty report prints nothing in human format, leaving the verdict
    /// to the caller; machine formats always emit the full document.
    pub fn report(&mut self, reporter: &ValidationReporter) -> Result<()> {
        if self.format == OutputFormat::Human {
            if reporter.is_empty() {
                return Ok(());
            }
            if self.use_color {
                return self.write_report_colored(reporter);
            }
        }

        let formatted = self.format.format_report(reporter)?;
        if formatted.ends_with('\n') {
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }

    fn write_report_colored(&mut self, reporter: &ValidationReporter) -> Result<()> {
        for severity in [Severity::Error, Severity::Warning, Severity::Info] {
            let issues: Vec<_> = reporter.by_severity(severity).collect();
            if issues.is_empty() {
                continue;
            }

            let heading = format!("{} {} Issues:", severity_icon(severity), severity_label(severity));
            let heading = match severity {
                Severity::Error => heading.red().bold(),
                Severity::Warning => heading.yellow().bold(),
                Severity::Info => heading.blue().bold(),
            };
            self.writeln(&heading.to_string())?;

            for issue in issues {
                self.writeln(&format!("  📍 {}", issue.path.dimmed()))?;
                self.writeln(&format!("  💬 {}", issue.message))?;
            }
            self.writeln("")?;
        }
        Ok(())
    }

    /// Write resolved columns: a table for humans, data otherwise
    pub fn columns(&mut self, columns: &[ColumnDefinition]) -> Result<()> {
        if self.format != OutputFormat::Human {
            return self.data(&columns);
        }

        let rows = columns
            .iter()
            .map(|column| {
                vec![
                    column.resource.clone().unwrap_or_else(|| "-".to_string()),
                    column.name.clone(),
                    column.storage.to_string(),
                    yes_no(column.nullable).to_string(),
                    yes_no(column.unique).to_string(),
                ]
            })
            .collect();

        self.table(&["Resource", "Column", "Type", "Nullable", "Unique"], rows)
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        // Calculate column widths
        let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" │ ");

        if self.use_color {
            self.writeln(header_row.trim_end().bold().to_string().as_str())?;
        } else {
            self.writeln(header_row.trim_end())?;
        }

        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        self.writeln(&separator)?;

        for row in rows {
            let row_str = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if i < widths.len() {
                        format!("{:width$}", cell, width = widths[i])
                    } else {
                        cell.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(" │ ");
            self.writeln(row_str.trim_end())?;
        }

        Ok(())
    }
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "❌",
        Severity::Warning => "⚠️",
        Severity::Info => "ℹ️",
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "Error",
        Severity::Warning => "Warning",
        Severity::Info => "Info",
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Format a validation report for human reading
fn format_report_human(reporter: &ValidationReporter) -> String {
    let mut output = String::new();

    if reporter.is_empty() {
        output.push_str("✅ No issues found\n");
        return output;
    }

    output.push_str(&format!("🔍 Validation Report - {} Issue(s)\n\n", reporter.len()));

    // Group issues by severity, most severe first
    for severity in [Severity::Error, Severity::Warning, Severity::Info] {
        let issues: Vec<_> = reporter.by_severity(severity).collect();
        if issues.is_empty() {
            continue;
        }

        output.push_str(&format!("{} {} Issues:\n", severity_icon(severity), severity_label(severity)));
        for issue in issues {
            output.push_str(&format!("  📍 Path: {}\n", issue.path));
            output.push_str(&format!("  💬 Message: {}\n", issue.message));
            output.push('\n');
        }
    }

    output
}
