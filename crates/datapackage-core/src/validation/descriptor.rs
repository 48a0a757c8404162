//! Structural validation of the descriptor tree
//!
//! Package → resources → schema → fields, all writing into one reporter.
//! No level stops on a child's failure.

use crate::descriptor::{Field, Package, Resource, Schema};
use crate::storage::{SUPPORTED_TYPES, UNSUPPORTED_TYPES};
use crate::validation::base::{
    validate_required_property, validate_required_value, Validate, ValidationContext,
    ValidationMode,
};
use crate::validation::lint;
use crate::validation::reporter::{Severity, ValidationReporter};
use tracing::{debug, instrument};

impl Validate for Field {
    fn validate_with_context(&self, reporter: &mut ValidationReporter, context: &ValidationContext) {
        validate_required_property(reporter, context, "Name", self.name.as_deref());
        let type_ok = validate_required_value(
            reporter,
            context,
            "Type",
            self.logical_type.as_deref(),
            SUPPORTED_TYPES,
            UNSUPPORTED_TYPES,
        );

        if context.is_strict() && type_ok {
            if let Some(constraints) = &self.constraints {
                lint::lint_constraints(self, constraints, reporter, &context.child("constraints"));
            }
        }
    }
}

impl Validate for Schema {
    fn validate_with_context(&self, reporter: &mut ValidationReporter, context: &ValidationContext) {
        if self.fields.is_empty() {
            reporter.report_at(
                &context.path,
                Severity::Error,
                "At least one field must be supplied",
                &[],
            );
            return;
        }

        let fields = context.child("fields");
        for (i, field) in self.fields.iter().enumerate() {
            field.validate_with_context(reporter, &fields.child_index(i));
        }

        if context.is_strict() {
            lint::lint_duplicate_fields(self, reporter, context);
        }
    }
}

impl Validate for Resource {
    fn validate_with_context(&self, reporter: &mut ValidationReporter, context: &ValidationContext) {
        validate_required_property(reporter, context, "Path", self.path.as_deref());

        match &self.schema {
            Some(schema) => schema.validate_with_context(reporter, &context.child("schema")),
            None => reporter.report_at(
                &context.path,
                Severity::Error,
                "Schema descriptor must be supplied",
                &[],
            ),
        }
    }
}

impl Validate for Package {
    fn validate_with_context(&self, reporter: &mut ValidationReporter, context: &ValidationContext) {
        validate_required_property(reporter, context, "Name", self.name.as_deref());

        let resources = context.child("resources");
        for (i, resource) in self.resources.iter().enumerate() {
            resource.validate_with_context(reporter, &resources.child_index(i));
        }
    }
}

impl Package {
    /// Validate the whole descriptor with the structural rules
    pub fn validate(&self) -> ValidationReporter {
        self.validate_with_mode(ValidationMode::Standard)
    }

    /// Validate the whole descriptor in the given mode
    #[instrument(skip(self), fields(package = self.name.as_deref().unwrap_or("")))]
    pub fn validate_with_mode(&self, mode: ValidationMode) -> ValidationReporter {
        let mut reporter = ValidationReporter::new();
        self.validate_with_context(&mut reporter, &ValidationContext::new(mode));

        debug!(
            issues = reporter.len(),
            errors = reporter.errors().count(),
            warnings = reporter.warnings().count(),
            "Descriptor validation finished"
        );
        reporter
    }
}
