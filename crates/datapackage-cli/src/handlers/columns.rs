//! Columns command handler

use super::utils::load_descriptor;
use crate::cli::{ColumnsArgs, OutputFormat};
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use datapackage_core::{ColumnDefinition, Package};
use tracing::{debug, instrument};

/// Handle the columns command
#[instrument(skip(output), fields(file = %args.descriptor.display()))]
pub fn handle_columns(args: ColumnsArgs, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("columns_command", &format!("file: {}", args.descriptor.display()));

    let package = load_descriptor(&args.descriptor)?;
    let columns = resolve_columns(&package, args.resource.as_deref())?;
    debug!(columns = columns.len(), "Resolved columns");

    if columns.is_empty() && output.format() == OutputFormat::Human {
        output.info("No resource in the descriptor declares a schema")?;
        return Ok(());
    }

    let title = match package.name.as_deref() {
        Some(name) => format!("Columns of {}", name),
        None => "Columns".to_string(),
    };
    output.section(&title)?;
    output.columns(&columns)
}

/// Resolve columns for the whole package or a single resource
fn resolve_columns(package: &Package, resource: Option<&str>) -> Result<Vec<ColumnDefinition>> {
    let Some(path) = resource else {
        return Ok(package.columns()?);
    };

    if package.resource(path).is_none() {
        return Err(Error::invalid_args(format!("No resource with path '{}'", path)));
    }

    let mut scoped = package.clone();
    scoped.resources.retain(|r| r.path.as_deref() == Some(path));
    Ok(scoped.columns()?)
}
