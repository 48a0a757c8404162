//! Logical type resolution
//!
//! Maps the portable logical type names declared in a descriptor
//! (`"integer"`, `"number"`, ...) onto storage types used when generating
//! column definitions, and maps storage kinds back onto logical names.
//!
//! The forward direction is strict: anything outside the resolution table
//! fails with [`Error::UnsupportedType`]. The reverse direction is total and
//! falls back to `"string"`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Length assigned to string columns
pub const STRING_LENGTH: i32 = 4000;

/// Precision assigned to decimal columns
pub const DECIMAL_PRECISION: i32 = 18;

/// Scale assigned to decimal columns
pub const DECIMAL_SCALE: i32 = 0;

/// Marker for "not applicable" precision and scale
pub const NOT_APPLICABLE: i32 = -1;

/// Logical type names the resolver implements
pub const SUPPORTED_TYPES: &[&str] = &[
    "string", "integer", "number", "boolean", "datetime", "date", "time",
];

/// Logical type names that are valid in the descriptor format but not
/// implemented by the resolver
pub const UNSUPPORTED_TYPES: &[&str] = &["null", "object", "array", "geopoint", "geojson", "any"];

/// Storage kinds a column can be generated with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageKind {
    AnsiString,
    AnsiStringFixedLength,
    Binary,
    Boolean,
    Byte,
    Currency,
    Date,
    DateTime,
    DateTime2,
    DateTimeOffset,
    Decimal,
    Double,
    Guid,
    Int16,
    Int32,
    Int64,
    Object,
    SByte,
    Single,
    String,
    StringFixedLength,
    Time,
    UInt16,
    UInt32,
    UInt64,
    VarNumeric,
    Xml,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Logical type names known to the descriptor format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    String,
    Integer,
    Number,
    Boolean,
    DateTime,
    Date,
    Time,
    Null,
    Object,
    Array,
    GeoPoint,
    GeoJson,
    Any,
}

impl LogicalType {
    /// Parse a raw logical type name, ignoring case and surrounding whitespace
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = normalize(raw);
        let parsed = match normalized.as_str() {
            "string" => Self::String,
            "integer" => Self::Integer,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "datetime" => Self::DateTime,
            "date" => Self::Date,
            "time" => Self::Time,
            "null" => Self::Null,
            "object" => Self::Object,
            "array" => Self::Array,
            "geopoint" => Self::GeoPoint,
            "geojson" => Self::GeoJson,
            "any" => Self::Any,
            _ => return None,
        };
        Some(parsed)
    }

    /// Canonical lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::DateTime => "datetime",
            Self::Date => "date",
            Self::Time => "time",
            Self::Null => "null",
            Self::Object => "object",
            Self::Array => "array",
            Self::GeoPoint => "geopoint",
            Self::GeoJson => "geojson",
            Self::Any => "any",
        }
    }

    /// Whether the resolver can produce a storage type for this name
    pub fn is_supported(self) -> bool {
        self.storage_kind().is_some()
    }

    /// Whether values of this type are numeric
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Number)
    }

    /// Whether values of this type are temporal
    pub fn is_temporal(self) -> bool {
        matches!(self, Self::DateTime | Self::Date | Self::Time)
    }

    fn storage_kind(self) -> Option<StorageKind> {
        match self {
            Self::String => Some(StorageKind::String),
            Self::Boolean => Some(StorageKind::Boolean),
            Self::Integer => Some(StorageKind::Int32),
            Self::Number => Some(StorageKind::Decimal),
            Self::DateTime => Some(StorageKind::DateTime),
            Self::Date => Some(StorageKind::Date),
            Self::Time => Some(StorageKind::Time),
            Self::Null
            | Self::Object
            | Self::Array
            | Self::GeoPoint
            | Self::GeoJson
            | Self::Any => None,
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved storage type
///
/// Length, precision and scale are derived from the kind on every call and
/// have no independent storage, so a `StorageType` can only be built from a
/// [`StorageKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StorageType {
    kind: StorageKind,
}

impl StorageType {
    /// Storage type for a kind
    pub fn new(kind: StorageKind) -> Self {
        Self { kind }
    }

    /// The storage kind
    pub fn kind(&self) -> StorageKind {
        self.kind
    }

    /// Character length: 4000 for strings, 0 otherwise
    pub fn length(&self) -> i32 {
        match self.kind {
            StorageKind::String => STRING_LENGTH,
            _ => 0,
        }
    }

    /// Numeric precision: 18 for decimals, -1 otherwise
    pub fn precision(&self) -> i32 {
        match self.kind {
            StorageKind::Decimal => DECIMAL_PRECISION,
            _ => NOT_APPLICABLE,
        }
    }

    /// Numeric scale: 0 for decimals, -1 otherwise
    pub fn scale(&self) -> i32 {
        match self.kind {
            StorageKind::Decimal => DECIMAL_SCALE,
            _ => NOT_APPLICABLE,
        }
    }

    /// The logical type name this storage type maps back to
    pub fn logical_type(&self) -> &'static str {
        to_logical_type(self.kind)
    }
}

impl From<StorageKind> for StorageType {
    fn from(kind: StorageKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            StorageKind::String => write!(f, "{}({})", self.kind, self.length()),
            StorageKind::Decimal => {
                write!(f, "{}({}, {})", self.kind, self.precision(), self.scale())
            }
            kind => write!(f, "{}", kind),
        }
    }
}

impl Serialize for StorageType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("StorageType", 4)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("length", &self.length())?;
        state.serialize_field("precision", &self.precision())?;
        state.serialize_field("scale", &self.scale())?;
        state.end()
    }
}

/// Trim and lowercase a logical type name
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Resolve a logical type name into a storage type
///
/// `None` and the empty name resolve to a string column. An all-whitespace
/// name is not a type and fails like any other unknown name.
pub fn resolve(logical_type: Option<&str>) -> Result<StorageType> {
    let raw = match logical_type {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(StorageType::new(StorageKind::String)),
    };

    let kind = LogicalType::parse(raw)
        .and_then(LogicalType::storage_kind)
        .ok_or_else(|| Error::unsupported_type(raw))?;

    trace!(logical_type = raw, storage_kind = %kind, "Resolved logical type");
    Ok(StorageType::new(kind))
}

/// Map a storage kind back onto a logical type name
///
/// Never fails: kinds without a logical counterpart become `"string"`.
pub fn to_logical_type(kind: StorageKind) -> &'static str {
    match kind {
        StorageKind::Int16 | StorageKind::Int32 | StorageKind::Int64 => "integer",
        StorageKind::Currency | StorageKind::Decimal => "number",
        StorageKind::Boolean => "boolean",
        StorageKind::Date => "date",
        StorageKind::Time => "time",
        StorageKind::DateTime | StorageKind::DateTime2 => "datetime",
        _ => "string",
    }
}
