//! Shared utilities for command handlers

use crate::error::{Error, Result};
use datapackage_core::{DescriptorFormat, Package};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a descriptor file, choosing JSON or YAML by extension
pub fn load_descriptor(path: &Path) -> Result<Package> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "Read descriptor file");

    let format = DescriptorFormat::from_path(path);
    Package::decode(&content, format).map_err(|e| {
        let reason = match &e {
            datapackage_core::Error::Json { source, .. } => source.to_string(),
            datapackage_core::Error::Yaml { source, .. } => source.to_string(),
            other => other.to_string(),
        };
        Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: format_name(format).to_string(),
            reason,
        }
    })
}

/// Display name of a descriptor format
pub fn format_name(format: DescriptorFormat) -> &'static str {
    match format {
        DescriptorFormat::Json => "JSON",
        DescriptorFormat::Yaml => "YAML",
    }
}
