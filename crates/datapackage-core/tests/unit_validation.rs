//! Validation behavior over decoded descriptor documents
//!
//! These tests decode JSON fixtures the way a host would and check the
//! exact issues, severities and ordering the validator reports.

use datapackage_core::{Package, Severity, ValidationMode, ValidationReporter};
use serde_json::json;

fn decode(value: serde_json::Value) -> Package {
    serde_json::from_value(value).unwrap()
}

fn messages(reporter: &ValidationReporter) -> Vec<&str> {
    reporter.issues().iter().map(|i| i.message.as_str()).collect()
}

#[cfg(test)]
mod valid_documents {
    use super::*;

    #[test]
    fn test_complete_descriptor_is_clean() {
        let package = decode(json!({
            "name": "gdp",
            "license": "ODC-PDDL-1.0",
            "resources": [{
                "url": "https://example.com/gdp.csv",
                "path": "data/gdp.csv",
                "schema": {
                    "fields": [
                        {"name": "Country Code", "type": "string", "title": "ISO code"},
                        {"name": "Year", "type": "integer", "format": "YYYY"},
                        {"name": "Value", "type": "number", "description": "GDP in USD",
                         "constraints": {"required": true, "minimum": 0}},
                        {"name": "Published", "type": "date"},
                        {"name": "Audited", "type": "boolean"},
                        {"name": "Loaded", "type": "datetime"},
                        {"name": "Cutoff", "type": "time"}
                    ]
                }
            }]
        }));

        let reporter = package.validate();
        assert!(reporter.is_empty(), "unexpected issues: {:?}", reporter.issues());
        assert!(!reporter.has_errors());
    }

    #[test]
    fn test_type_names_must_be_exact_lowercase() {
        let package = decode(json!({
            "name": "p",
            "resources": [{"path": "p.csv", "schema": {"fields": [
                {"name": "a", "type": "INTEGER"},
                {"name": "b", "type": " number "},
                {"name": "c", "type": "NULL"}
            ]}}]
        }));
        let reporter = package.validate();
        assert_eq!(
            messages(&reporter),
            [
                "The value 'INTEGER' is not a valid value for the required property 'Type'",
                "The value ' number ' is not a valid value for the required property 'Type'",
                "The value 'NULL' is not a valid value for the required property 'Type'",
            ]
        );

        // Direct resolution stays lenient
        let fields = &package.resources[0].schema.as_ref().unwrap().fields;
        assert!(fields[0].storage_type().is_ok());
        assert!(fields[1].storage_type().is_ok());
    }

    #[test]
    fn test_package_without_resources_only_checks_name() {
        let package = decode(json!({"name": "empty"}));
        assert!(package.validate().is_empty());
    }
}

#[cfg(test)]
mod structural_errors {
    use super::*;

    #[test]
    fn test_missing_name_path_and_schema_in_order() {
        let package = decode(json!({
            "name": "",
            "resources": [{"path": ""}]
        }));

        let reporter = package.validate();
        assert_eq!(reporter.len(), 3);
        assert!(reporter.issues().iter().all(|i| i.severity == Severity::Error));
        assert_eq!(
            messages(&reporter),
            [
                "Required property 'Name' was not supplied",
                "Required property 'Path' was not supplied",
                "Schema descriptor must be supplied",
            ]
        );
    }

    #[test]
    fn test_empty_schema_reports_once() {
        let package = decode(json!({
            "name": "p",
            "resources": [{"path": "p.csv", "schema": {"fields": []}}]
        }));

        let reporter = package.validate();
        assert_eq!(messages(&reporter), ["At least one field must be supplied"]);
        assert_eq!(reporter.issues()[0].path, "$.resources[0].schema");
    }

    #[test]
    fn test_known_unsupported_type_vs_invalid_type() {
        let package = decode(json!({
            "name": "p",
            "resources": [{"path": "p.csv", "schema": {"fields": [
                {"name": "a", "type": "null"},
                {"name": "b", "type": "bogus"}
            ]}}]
        }));

        let reporter = package.validate();
        assert_eq!(
            messages(&reporter),
            [
                "The value 'null' is not supported for the required property 'Type'",
                "The value 'bogus' is not a valid value for the required property 'Type'",
            ]
        );
        assert_eq!(reporter.issues()[0].path, "$.resources[0].schema.fields[0]");
        assert_eq!(reporter.issues()[1].path, "$.resources[0].schema.fields[1]");
    }

    #[test]
    fn test_every_known_unsupported_type() {
        for name in ["null", "object", "array", "geopoint", "geojson", "any"] {
            let package = decode(json!({
                "name": "p",
                "resources": [{"path": "p.csv", "schema": {"fields": [{"name": "a", "type": name}]}}]
            }));
            let reporter = package.validate();
            assert_eq!(reporter.len(), 1, "type {}", name);
            assert!(reporter.issues()[0].message.contains("is not supported"));
        }
    }

    #[test]
    fn test_missing_type_is_reported() {
        let package = decode(json!({
            "name": "p",
            "resources": [{"path": "p.csv", "schema": {"fields": [{"name": "a"}]}}]
        }));
        assert_eq!(
            messages(&package.validate()),
            ["Required property 'Type' was not supplied"]
        );
    }

    #[test]
    fn test_validation_is_exhaustive_across_resources() {
        let package = decode(json!({
            "resources": [
                {"schema": {"fields": [{"type": "integer"}, {"name": "x", "type": "any"}]}},
                {"path": "ok.csv", "schema": {"fields": []}},
                {"path": "   "}
            ]
        }));

        let reporter = package.validate();
        assert_eq!(
            messages(&reporter),
            [
                "Required property 'Name' was not supplied",
                "Required property 'Path' was not supplied",
                "Required property 'Name' was not supplied",
                "The value 'any' is not supported for the required property 'Type'",
                "At least one field must be supplied",
                "Required property 'Path' was not supplied",
                "Schema descriptor must be supplied",
            ]
        );
        let paths: Vec<_> = reporter.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "$",
                "$.resources[0]",
                "$.resources[0].schema.fields[0]",
                "$.resources[0].schema.fields[1]",
                "$.resources[1].schema",
                "$.resources[2]",
                "$.resources[2]",
            ]
        );
    }
}

#[cfg(test)]
mod repeatability {
    use super::*;

    #[test]
    fn test_repeated_validation_is_identical() {
        let package = decode(json!({
            "resources": [{"path": "", "schema": {"fields": [{"name": "a", "type": "geojson"}]}}]
        }));

        let first = package.validate();
        let second = package.validate();
        assert_eq!(first, second);
    }
}

#[cfg(test)]
mod strict_mode {
    use super::*;

    #[test]
    fn test_strict_mode_only_adds_warnings() {
        let package = decode(json!({
            "name": "p",
            "resources": [{"path": "p.csv", "schema": {"fields": [
                {"name": "id", "type": "integer", "constraints": {"minimum": 10, "maximum": 1}},
                {"name": "id", "type": "string", "constraints": {"pattern": "[a-"}},
                {"name": "geo", "type": "geojson", "constraints": {"minLength": 1}}
            ]}}]
        }));

        let standard = package.validate();
        let strict = package.validate_with_mode(ValidationMode::Strict);

        assert_eq!(standard.errors().count(), strict.errors().count());
        assert_eq!(standard.warnings().count(), 0);
        assert_eq!(strict.warnings().count(), 3);

        let warnings: Vec<_> = strict.warnings().map(|i| i.message.as_str()).collect();
        assert_eq!(warnings[0], "Constraint 'minimum' (10) is greater than 'maximum' (1)");
        assert!(warnings[1].starts_with("Constraint 'pattern' is not a valid regular expression"));
        assert_eq!(warnings[2], "Field name 'id' is declared more than once");
    }
}
