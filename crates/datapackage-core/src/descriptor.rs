//! Descriptor tree: package, resources, schemas, fields and constraints
//!
//! These types mirror the descriptor document one-to-one. String properties
//! are optional so that a missing property stays distinguishable from an
//! empty one, and unknown properties are ignored on decode.

use crate::error::Result;
use crate::storage::{self, StorageKind, StorageType};
use serde::{Deserialize, Deserializer, Serialize};

/// Root of a data package descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Package name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// License identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Tabular resources in the package
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// A named data location together with its schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Remote location of the data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Local path of the data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Field-level schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// Ordered collection of fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// A single column declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Column name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Logical type name (string, number etc). Consumers assume "string"
    /// when it is absent.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub logical_type: Option<String>,

    /// Human readable label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Free-form description, e.g. "The recipient of the funds"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Value format, e.g. "DD.MM.YYYY" for a date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Value constraints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,
}

/// Optional value constraints attached to a field
///
/// Absence of a property means the field is unconstrained in that respect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    /// Every row must have a value; an empty string counts as missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Minimum number of characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,

    /// Maximum number of characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,

    /// All values must be unique within the resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,

    /// Regular expression values must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Lowest allowed value, interpreted according to the field type
    #[serde(
        default,
        deserialize_with = "deserialize_scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub minimum: Option<String>,

    /// Highest allowed value, interpreted according to the field type
    #[serde(
        default,
        deserialize_with = "deserialize_scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub maximum: Option<String>,
}

/// Accept `"10"`, `10`, `10.5` or `true` for bound properties
fn deserialize_scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(i64),
        Float(f64),
        Bool(bool),
    }

    let scalar = Option::<Scalar>::deserialize(deserializer)?;
    Ok(scalar.map(|value| match value {
        Scalar::Text(s) => s,
        Scalar::Integer(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

impl Package {
    /// Create a package with a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the license
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// Append a resource
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Number of resources
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Find a resource by its path
    pub fn resource(&self, path: &str) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|resource| resource.path.as_deref() == Some(path))
    }
}

impl Resource {
    /// Create a resource for a local path
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Set the remote url
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the schema
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Path if present, otherwise url, for display purposes
    pub fn location(&self) -> Option<&str> {
        self.path.as_deref().or(self.url.as_deref())
    }
}

impl Schema {
    /// Create a schema from fields
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Append a field
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Find a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|field| field.name.as_deref() == Some(name))
    }
}

impl Field {
    /// Create a field with a name and logical type
    pub fn new(name: impl Into<String>, logical_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            logical_type: Some(logical_type.into()),
            ..Self::default()
        }
    }

    /// Create a field whose logical type is derived from a storage kind
    pub fn from_storage_kind(name: impl Into<String>, kind: StorageKind) -> Self {
        let mut field = Self {
            name: Some(name.into()),
            ..Self::default()
        };
        field.set_storage_kind(kind);
        field
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the format
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the constraints
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    /// Resolve the logical type into a storage type
    pub fn storage_type(&self) -> Result<StorageType> {
        storage::resolve(self.logical_type.as_deref())
    }

    /// Column length of the resolved storage type
    pub fn length(&self) -> Result<i32> {
        Ok(self.storage_type()?.length())
    }

    /// Column precision of the resolved storage type
    pub fn precision(&self) -> Result<i32> {
        Ok(self.storage_type()?.precision())
    }

    /// Column scale of the resolved storage type
    pub fn scale(&self) -> Result<i32> {
        Ok(self.storage_type()?.scale())
    }

    /// Replace the logical type with the one a storage kind maps back to
    pub fn set_storage_kind(&mut self, kind: StorageKind) {
        self.logical_type = Some(storage::to_logical_type(kind).to_string());
    }

    /// Whether constraints mark this field as required
    pub fn is_required(&self) -> bool {
        self.constraints
            .as_ref()
            .and_then(|c| c.required)
            .unwrap_or(false)
    }

    /// Whether constraints mark this field as unique
    pub fn is_unique(&self) -> bool {
        self.constraints
            .as_ref()
            .and_then(|c| c.unique)
            .unwrap_or(false)
    }
}

impl Constraints {
    /// Mark the field as required
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Mark the field as unique
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = Some(unique);
        self
    }

    /// Set both length bounds
    pub fn length_between(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Set the pattern
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the value bounds
    pub fn range(mut self, minimum: Option<String>, maximum: Option<String>) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    /// Whether any length-related constraint is present
    pub fn has_length_rules(&self) -> bool {
        self.min_length.is_some() || self.max_length.is_some() || self.pattern.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_ignores_unknown_properties() {
        let package: Package = serde_json::from_value(json!({
            "name": "cities",
            "homepage": "https://example.com",
            "resources": [{
                "path": "data/cities.csv",
                "format": "csv",
                "schema": {
                    "primaryKey": "id",
                    "fields": [{"name": "id", "type": "integer", "rdfType": "x"}]
                }
            }]
        }))
        .unwrap();

        assert_eq!(package.name.as_deref(), Some("cities"));
        let schema = package.resources[0].schema.as_ref().unwrap();
        assert_eq!(schema.fields[0].logical_type.as_deref(), Some("integer"));
    }

    #[test]
    fn test_absent_is_distinct_from_empty() {
        let absent: Field = serde_json::from_value(json!({"name": "a"})).unwrap();
        let empty: Field = serde_json::from_value(json!({"name": "a", "type": ""})).unwrap();

        assert_eq!(absent.logical_type, None);
        assert_eq!(empty.logical_type.as_deref(), Some(""));
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let package: Package = serde_json::from_value(json!({})).unwrap();
        assert!(package.name.is_none());
        assert!(package.resources.is_empty());

        let schema: Schema = serde_json::from_value(json!({})).unwrap();
        assert!(schema.fields.is_empty());
    }

    #[test]
    fn test_constraints_camel_case_and_scalar_bounds() {
        let constraints: Constraints = serde_json::from_value(json!({
            "required": true,
            "minLength": 2,
            "maxLength": 10,
            "minimum": 5,
            "maximum": "2020-01-01"
        }))
        .unwrap();

        assert_eq!(constraints.min_length, Some(2));
        assert_eq!(constraints.max_length, Some(10));
        assert_eq!(constraints.minimum.as_deref(), Some("5"));
        assert_eq!(constraints.maximum.as_deref(), Some("2020-01-01"));

        let encoded = serde_json::to_value(&constraints).unwrap();
        assert_eq!(encoded["minLength"], 2);
        assert!(encoded.get("pattern").is_none());
    }

    #[test]
    fn test_field_storage_accessors() {
        let field = Field::new("price", "number");
        assert_eq!(field.storage_type().unwrap().kind(), StorageKind::Decimal);
        assert_eq!(field.precision().unwrap(), 18);
        assert_eq!(field.scale().unwrap(), 0);
        assert_eq!(field.length().unwrap(), 0);

        let untyped = Field {
            name: Some("note".to_string()),
            ..Field::default()
        };
        assert_eq!(untyped.length().unwrap(), 4000);

        let geo = Field::new("location", "geojson");
        assert!(geo.storage_type().unwrap_err().is_unsupported_type());
    }

    #[test]
    fn test_storage_attributes_follow_type_changes() {
        let mut field = Field::new("amount", "string");
        assert_eq!(field.length().unwrap(), 4000);

        field.set_storage_kind(StorageKind::Currency);
        assert_eq!(field.logical_type.as_deref(), Some("number"));
        assert_eq!(field.length().unwrap(), 0);
        assert_eq!(field.precision().unwrap(), 18);

        let field = Field::from_storage_kind("id", StorageKind::Int64);
        assert_eq!(field.logical_type.as_deref(), Some("integer"));
    }

    #[test]
    fn test_builders() {
        let package = Package::new("sales")
            .with_license("ODC-PDDL-1.0")
            .with_resource(
                Resource::new("data/sales.csv")
                    .with_url("https://example.com/sales.csv")
                    .with_schema(Schema::default().with_field(
                        Field::new("id", "integer")
                            .with_title("Identifier")
                            .with_constraints(Constraints::default().required(true).unique(true)),
                    )),
            );

        assert_eq!(package.resource_count(), 1);
        let resource = package.resource("data/sales.csv").unwrap();
        assert_eq!(resource.location(), Some("data/sales.csv"));
        let field = resource.schema.as_ref().unwrap().field("id").unwrap();
        assert!(field.is_required());
        assert!(field.is_unique());
    }
}
