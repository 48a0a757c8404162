//! Descriptor lint rules for strict mode
//!
//! Constraint consistency and duplicate field names. Everything here reports
//! at `Warning` severity only, so it never changes `has_errors()`.

use crate::descriptor::{Constraints, Field, Schema};
use crate::storage::LogicalType;
use crate::validation::base::ValidationContext;
use crate::validation::reporter::{Severity, ValidationReporter};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashSet;

const DUPLICATE_FIELD: &str = "Field name '{0}' is declared more than once";
const NEGATIVE_LENGTH: &str = "Constraint '{0}' must not be negative";
const LENGTH_RANGE: &str = "Constraint 'minLength' ({0}) is greater than 'maxLength' ({1})";
const STRING_ONLY: &str = "Constraint '{0}' only applies to string fields, not '{1}'";
const BAD_PATTERN: &str = "Constraint 'pattern' is not a valid regular expression: {0}";
const BOUND_NOT_APPLICABLE: &str = "Constraint '{0}' does not apply to '{1}' fields";
const BAD_BOUND: &str = "Constraint '{0}' value '{1}' is not a valid {2}";
const BOUND_RANGE: &str = "Constraint 'minimum' ({0}) is greater than 'maximum' ({1})";

/// A parsed `minimum`/`maximum` value
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
enum Bound {
    Integer(i64),
    Number(f64),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
}

fn parse_bound(logical: LogicalType, raw: &str) -> Option<Bound> {
    let raw = raw.trim();
    match logical {
        LogicalType::Integer => raw.parse::<i64>().ok().map(Bound::Integer),
        LogicalType::Number => raw.parse::<f64>().ok().filter(|n| n.is_finite()).map(Bound::Number),
        LogicalType::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().map(Bound::Date),
        LogicalType::Time => NaiveTime::parse_from_str(raw, "%H:%M:%S%.f")
            .ok()
            .map(Bound::Time),
        LogicalType::DateTime => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.naive_utc())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok()
            .map(Bound::DateTime),
        _ => None,
    }
}

/// Check a field's constraints against each other and against its type
pub(crate) fn lint_constraints(
    field: &Field,
    constraints: &Constraints,
    reporter: &mut ValidationReporter,
    context: &ValidationContext,
) {
    let Some(logical) = field.logical_type.as_deref().and_then(LogicalType::parse) else {
        return;
    };
    let mut warn = |template: &str, args: &[&str]| {
        reporter.report_at(&context.path, Severity::Warning, template, args);
    };

    for (property, value) in [("minLength", constraints.min_length), ("maxLength", constraints.max_length)] {
        if value.is_some_and(|v| v < 0) {
            warn(NEGATIVE_LENGTH, &[property]);
        }
    }

    if let (Some(min), Some(max)) = (constraints.min_length, constraints.max_length) {
        if min > max {
            let (min, max) = (min.to_string(), max.to_string());
            warn(LENGTH_RANGE, &[min.as_str(), max.as_str()]);
        }
    }

    if logical != LogicalType::String {
        let present = [
            ("minLength", constraints.min_length.is_some()),
            ("maxLength", constraints.max_length.is_some()),
            ("pattern", constraints.pattern.is_some()),
        ];
        for (property, _) in present.iter().filter(|(_, set)| *set) {
            warn(STRING_ONLY, &[*property, logical.as_str()]);
        }
    }

    if let Some(pattern) = &constraints.pattern {
        if let Err(e) = Regex::new(pattern) {
            let reason = e.to_string();
            warn(BAD_PATTERN, &[reason.as_str()]);
        }
    }

    let ordered = logical.is_numeric() || logical.is_temporal();
    let mut bounds = [None, None];
    for (slot, (property, value)) in [("minimum", &constraints.minimum), ("maximum", &constraints.maximum)]
        .into_iter()
        .enumerate()
    {
        let Some(raw) = value else { continue };
        if !ordered {
            warn(BOUND_NOT_APPLICABLE, &[property, logical.as_str()]);
            continue;
        }
        match parse_bound(logical, raw) {
            Some(bound) => bounds[slot] = Some(bound),
            None => warn(BAD_BOUND, &[property, raw.as_str(), logical.as_str()]),
        }
    }

    if let [Some(min), Some(max)] = bounds {
        if min.partial_cmp(&max) == Some(Ordering::Greater) {
            let min_raw = constraints.minimum.as_deref().unwrap_or_default();
            let max_raw = constraints.maximum.as_deref().unwrap_or_default();
            warn(BOUND_RANGE, &[min_raw, max_raw]);
        }
    }
}

/// Warn about field names that appear more than once in a schema
pub(crate) fn lint_duplicate_fields(
    schema: &Schema,
    reporter: &mut ValidationReporter,
    context: &ValidationContext,
) {
    let fields = context.child("fields");
    let mut seen = HashSet::new();

    for (i, field) in schema.fields.iter().enumerate() {
        let Some(name) = field.name.as_deref().filter(|n| !n.trim().is_empty()) else {
            continue;
        };
        if !seen.insert(name) {
            reporter.report_at(&fields.child_index(i).path, Severity::Warning, DUPLICATE_FIELD, &[name]);
        }
    }
}
