//! Column definitions derived from resolved field types
//!
//! This is the read path used for generation. It resolves every field's
//! logical type directly and therefore fails on the first unsupported type
//! rather than collecting issues.

use crate::descriptor::{Field, Package, Schema};
use crate::error::Result;
use crate::storage::StorageType;
use serde::Serialize;

/// A generated column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDefinition {
    /// Path of the resource the column belongs to, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub storage: StorageType,
    pub nullable: bool,
    pub unique: bool,
}

impl ColumnDefinition {
    /// Build a column from a field
    pub fn from_field(field: &Field) -> Result<Self> {
        Ok(Self {
            resource: None,
            name: field.name.clone().unwrap_or_default(),
            title: field.title.clone(),
            storage: field.storage_type()?,
            nullable: !field.is_required(),
            unique: field.is_unique(),
        })
    }

    fn in_resource(mut self, resource: Option<&str>) -> Self {
        self.resource = resource.map(str::to_string);
        self
    }
}

impl Schema {
    /// Resolve every field into a column, in schema order
    pub fn columns(&self) -> Result<Vec<ColumnDefinition>> {
        self.fields.iter().map(ColumnDefinition::from_field).collect()
    }
}

impl Package {
    /// Resolve the columns of every resource that has a schema
    pub fn columns(&self) -> Result<Vec<ColumnDefinition>> {
        let mut columns = Vec::new();
        for resource in &self.resources {
            let Some(schema) = &resource.schema else {
                continue;
            };
            for field in &schema.fields {
                columns.push(ColumnDefinition::from_field(field)?.in_resource(resource.location()));
            }
        }
        Ok(columns)
    }
}
