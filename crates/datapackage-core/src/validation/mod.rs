//! Descriptor validation
//!
//! Walks package → resource → schema → field and collects every structural
//! problem into one [`ValidationReporter`] instead of failing fast:
//!
//! - **Standard**: required properties, non-empty schemas, known field types
//! - **Strict**: standard rules plus constraint and naming lint, reported
//!   as warnings

pub mod base;
pub mod descriptor;
mod lint;
pub mod reporter;

pub use base::{
    validate_required_property, validate_required_value, Validate, ValidationContext,
    ValidationMode,
};
pub use reporter::{format_message, Issue, Severity, ValidationReporter};
