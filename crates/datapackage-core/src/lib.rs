//! Data package descriptors: type resolution and validation
//!
//! A data package descriptor describes tabular resources and their field
//! schemas. This crate provides:
//!
//! - **Descriptor model**: [`Package`], [`Resource`], [`Schema`], [`Field`]
//!   and [`Constraints`], decoded from and encoded to JSON or YAML
//! - **Type resolution**: logical field types (`"integer"`, `"number"`, ...)
//!   resolved into storage types with length, precision and scale
//! - **Validation**: a multi-level pass that reports every structural
//!   problem, each tagged with a severity
//! - **Column definitions**: resolved columns for downstream generation
//!
//! # Example
//!
//! ```rust
//! use datapackage_core::{Field, Package, Resource, Schema, StorageKind};
//!
//! let package = Package::new("cities").with_resource(
//!     Resource::new("data/cities.csv")
//!         .with_schema(Schema::new(vec![Field::new("population", "integer")])),
//! );
//!
//! let reporter = package.validate();
//! assert!(!reporter.has_errors());
//!
//! let columns = package.columns().unwrap();
//! assert_eq!(columns[0].storage.kind(), StorageKind::Int32);
//! ```

pub mod codec;
pub mod columns;
pub mod descriptor;
pub mod error;
pub mod storage;
pub mod validation;

pub use codec::DescriptorFormat;
pub use columns::ColumnDefinition;
pub use descriptor::{Constraints, Field, Package, Resource, Schema};
pub use error::{Error, Result};
pub use storage::{resolve, to_logical_type, LogicalType, StorageKind, StorageType};
pub use validation::{Issue, Severity, Validate, ValidationContext, ValidationMode, ValidationReporter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
