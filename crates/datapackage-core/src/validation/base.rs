//! Validation trait, traversal context and required-property checks

use crate::validation::reporter::{Severity, ValidationReporter};
use serde::{Deserialize, Serialize};

/// Which rule set a validation pass runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Structural rules only
    #[default]
    Standard,
    /// Structural rules plus descriptor lint, reported as warnings
    Strict,
}

/// Location and mode of the node being validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationContext {
    /// Current JSON path
    pub path: String,
    /// Validation mode
    pub mode: ValidationMode,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new(ValidationMode::Standard)
    }
}

impl ValidationContext {
    /// Create a root context
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            path: "$".to_string(),
            mode,
        }
    }

    /// Create a child context with updated path
    pub fn child<P: AsRef<str>>(&self, path_segment: P) -> Self {
        Self {
            path: format!("{}.{}", self.path, path_segment.as_ref()),
            mode: self.mode,
        }
    }

    /// Create a child context for array index
    pub fn child_index(&self, index: usize) -> Self {
        Self {
            path: format!("{}[{}]", self.path, index),
            mode: self.mode,
        }
    }

    /// Whether lint rules should run
    pub fn is_strict(&self) -> bool {
        self.mode == ValidationMode::Strict
    }
}

/// A descriptor node that can report its own issues
///
/// Implementations write into the shared reporter and never stop early, so
/// one pass yields every issue.
pub trait Validate {
    /// Validate with a specific context
    fn validate_with_context(&self, reporter: &mut ValidationReporter, context: &ValidationContext);

    /// Validate as a root node in standard mode
    fn validate_into(&self, reporter: &mut ValidationReporter) {
        self.validate_with_context(reporter, &ValidationContext::default());
    }
}

pub(crate) const REQUIRED_NOT_SUPPLIED: &str = "Required property '{0}' was not supplied";
pub(crate) const VALUE_NOT_SUPPORTED: &str =
    "The value '{0}' is not supported for the required property '{1}'";
pub(crate) const VALUE_NOT_VALID: &str =
    "The value '{0}' is not a valid value for the required property '{1}'";

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Report an error when a required property is missing, empty or blank
///
/// Returns whether the property was present.
pub fn validate_required_property(
    reporter: &mut ValidationReporter,
    context: &ValidationContext,
    property: &str,
    value: Option<&str>,
) -> bool {
    if is_blank(value) {
        reporter.report_at(&context.path, Severity::Error, REQUIRED_NOT_SUPPLIED, &[property]);
        return false;
    }
    true
}

/// Report an error when a required property is missing or not one of the
/// supported values
///
/// Values in `unsupported` get a "not supported" message, anything else a
/// "not valid" message. Membership is an exact, case-sensitive match.
pub fn validate_required_value(
    reporter: &mut ValidationReporter,
    context: &ValidationContext,
    property: &str,
    value: Option<&str>,
    supported: &[&str],
    unsupported: &[&str],
) -> bool {
    if !validate_required_property(reporter, context, property, value) {
        return false;
    }

    let raw = value.unwrap_or_default();
    if supported.contains(&raw) {
        return true;
    }

    let template = if unsupported.contains(&raw) {
        VALUE_NOT_SUPPORTED
    } else {
        VALUE_NOT_VALID
    };
    reporter.report_at(&context.path, Severity::Error, template, &[raw, property]);
    false
}
