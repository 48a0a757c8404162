// Tests for output formatting
//
// These tests drive the writer through an in-memory buffer so the exact
// rendered text can be checked.

use super::*;
use datapackage_core::{Field, Package, Resource, Schema};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let writer = OutputWriter::with_writer(format, false, quiet, 0, Box::new(buffer.clone()));
    (writer, buffer)
}

fn mixed_report() -> ValidationReporter {
    let mut reporter = ValidationReporter::new();
    reporter.report_at("$", Severity::Error, "Required property '{0}' was not supplied", &["name"]);
    reporter.report_at(
        "$.resources[0].schema.fields[1]",
        Severity::Warning,
        "Field name '{0}' is declared more than once",
        &["id"],
    );
    reporter
}

#[test]
fn test_report_human_grouped_by_severity() {
    let formatted = format_report_human(&mixed_report());

    assert!(formatted.contains("🔍 Validation Report - 2 Issue(s)"));
    assert!(formatted.contains("❌ Error Issues:"));
    assert!(formatted.contains("⚠️ Warning Issues:"));
    assert!(!formatted.contains("Info Issues"));
    assert!(formatted.contains("  📍 Path: $.resources[0].schema.fields[1]"));
    assert!(formatted.contains("  💬 Message: Required property 'name' was not supplied"));

    let error_at = formatted.find("Error Issues").unwrap();
    let warning_at = formatted.find("Warning Issues").unwrap();
    assert!(error_at < warning_at);
}

#[test]
fn test_report_human_empty() {
    assert_eq!(format_report_human(&ValidationReporter::new()), "✅ No issues found\n");
}

#[test]
fn test_report_json_document() {
    let (mut output, buffer) = writer(OutputFormat::Json, false);
    output.report(&mixed_report()).unwrap();

    let value: serde_json::Value = serde_json::from_str(buffer.contents().trim()).unwrap();
    assert_eq!(value["valid"], false);
    assert_eq!(value["errors"], 1);
    assert_eq!(value["warnings"], 1);
    assert_eq!(value["issues"][0]["severity"], "Error");
    assert_eq!(value["issues"][1]["path"], "$.resources[0].schema.fields[1]");
}

#[test]
fn test_report_machine_format_for_clean_report() {
    let (mut output, buffer) = writer(OutputFormat::Yaml, false);
    output.report(&ValidationReporter::new()).unwrap();

    let value: serde_yaml::Value = serde_yaml::from_str(&buffer.contents()).unwrap();
    assert_eq!(value["valid"], serde_yaml::Value::Bool(true));
}

#[test]
fn test_messages_suppressed_outside_human_format() {
    let (mut output, buffer) = writer(OutputFormat::Json, false);
    output.info("loading").unwrap();
    output.success("done").unwrap();
    output.warning("careful").unwrap();
    output.section("Columns").unwrap();
    assert!(buffer.contents().is_empty());
}

#[test]
fn test_quiet_suppresses_info_but_not_errors() {
    let (mut output, buffer) = writer(OutputFormat::Human, true);
    output.info("loading").unwrap();
    output.success("done").unwrap();
    output.error("broken").unwrap();
    assert_eq!(buffer.contents(), "ERROR: broken\n");
}

#[test]
fn test_columns_table() {
    let package = Package::new("cities").with_resource(
        Resource::new("data/cities.csv").with_schema(Schema::new(vec![
            Field::new("name", "string"),
            Field::new("population", "integer"),
        ])),
    );
    let columns = package.columns().unwrap();

    let (mut output, buffer) = writer(OutputFormat::Human, false);
    output.columns(&columns).unwrap();
    let text = buffer.contents();
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Resource"));
    assert!(lines[1].contains("─┼─"));
    assert!(lines[2].contains("String(4000)"));
    assert!(lines[3].contains("Int32"));
    assert!(lines[3].contains("data/cities.csv"));
}

#[test]
fn test_columns_json() {
    let package = Package::new("p").with_resource(
        Resource::new("a.csv").with_schema(Schema::new(vec![Field::new("price", "number")])),
    );
    let columns = package.columns().unwrap();

    let (mut output, buffer) = writer(OutputFormat::JsonPretty, false);
    output.columns(&columns).unwrap();

    let value: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
    assert_eq!(value[0]["name"], "price");
    assert_eq!(value[0]["storage"]["precision"], 18);
    assert_eq!(value[0]["storage"]["scale"], 0);
}

#[test]
fn test_output_writer_creation() {
    let writer = OutputWriter::new(OutputFormat::Human, true, false, 1);
    assert_eq!(writer.format(), OutputFormat::Human);
}

#[test]
fn test_output_formatter_trait() {
    let formatter = OutputFormat::Json;
    let formatted = formatter.format(&serde_json::json!({"test": "value"})).unwrap();
    assert_eq!(formatted, r#"{"test":"value"}"#);

    let formatted = OutputFormat::Human.format_report(&mixed_report()).unwrap();
    assert!(formatted.contains("Error Issues"));
}
