//! Encoding, decoding and file access for descriptors
//!
//! JSON is the native document format; YAML is accepted for the same tree.
//! The format of a file is chosen from its extension.

use crate::descriptor::Package;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Serialized form of a descriptor document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorFormat {
    Json,
    Yaml,
}

impl DescriptorFormat {
    /// Pick the format from a file extension; anything but `.yaml`/`.yml` is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

impl Package {
    /// Decode a package from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| Error::json("Failed to decode data package descriptor", e))
    }

    /// Decode a package from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| Error::yaml("Failed to decode data package descriptor", e))
    }

    /// Decode a package in the given format
    pub fn decode(content: &str, format: DescriptorFormat) -> Result<Self> {
        match format {
            DescriptorFormat::Json => Self::from_json(content),
            DescriptorFormat::Yaml => Self::from_yaml(content),
        }
    }

    /// Encode the package as indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::json("Failed to encode data package descriptor", e))
    }

    /// Encode the package as YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| Error::yaml("Failed to encode data package descriptor", e))
    }

    /// Encode the package in the given format
    pub fn encode(&self, format: DescriptorFormat) -> Result<String> {
        match format {
            DescriptorFormat::Json => self.to_json_pretty(),
            DescriptorFormat::Yaml => self.to_yaml(),
        }
    }

    /// Read and decode a descriptor file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        debug!(path = %path.display(), bytes = content.len(), "Read descriptor file");
        Self::decode(&content, DescriptorFormat::from_path(path))
    }

    /// Encode and write a descriptor file, creating parent directories
    pub fn store(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.store_as(path, DescriptorFormat::from_path(path))
    }

    /// Like [`Package::store`], with the format chosen by the caller
    /// instead of the file extension
    pub fn store_as(&self, path: impl AsRef<Path>, format: DescriptorFormat) -> Result<()> {
        let path = path.as_ref();
        let content = self.encode(format)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
        }

        fs::write(path, content).map_err(|e| Error::io(path, e))?;
        debug!(path = %path.display(), "Stored descriptor file");
        Ok(())
    }
}
