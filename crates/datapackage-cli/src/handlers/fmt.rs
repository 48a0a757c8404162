//! Fmt command handler

use super::utils::{format_name, load_descriptor};
use crate::cli::FmtArgs;
use crate::error::Result;
use crate::output::OutputWriter;
use datapackage_core::DescriptorFormat;
use tracing::{debug, instrument};

/// Handle the fmt command
#[instrument(skip(output), fields(file = %args.descriptor.display()))]
pub fn handle_fmt(args: FmtArgs, output: &mut OutputWriter) -> Result<()> {
    let package = load_descriptor(&args.descriptor)?;
    let format = target_format(&args);
    debug!(format = format_name(format), "Encoding descriptor");

    match &args.output_file {
        Some(path) => {
            package.store_as(path, format)?;
            output.success(&format!("✓ Wrote {}", path.display()))?;
        }
        None => {
            let content = package.encode(format)?;
            if content.ends_with('\n') {
                output.write(&content)?;
            } else {
                output.writeln(&content)?;
            }
        }
    }

    Ok(())
}

/// `--to` wins, then the output file extension, then the input format
fn target_format(args: &FmtArgs) -> DescriptorFormat {
    args.to
        .map(DescriptorFormat::from)
        .or_else(|| args.output_file.as_deref().map(DescriptorFormat::from_path))
        .unwrap_or_else(|| DescriptorFormat::from_path(&args.descriptor))
}
