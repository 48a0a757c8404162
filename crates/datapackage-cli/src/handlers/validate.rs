//! Validation command handler

use super::utils::load_descriptor;
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use tracing::{info, instrument, warn};

/// Handle the validate command
#[instrument(skip(config, output), fields(file = %args.descriptor.display(), strict = args.strict))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details(
        "validate_command",
        &format!("file: {}", args.descriptor.display()),
    );
    output.info(&format!("Validating descriptor: {}", args.descriptor.display()))?;

    let package = load_descriptor(&args.descriptor)?;
    let mode = config.validation_mode(args.strict);

    let reporter = {
        let validation_timer = Timer::new("descriptor_validation");
        let reporter = package.validate_with_mode(mode);
        output.debug(&format!(
            "Ran {:?} rules in {:?}",
            mode,
            validation_timer.elapsed()
        ))?;
        reporter
    };

    let errors = reporter.errors().count();
    let warnings = reporter.warnings().count();
    let fail_on_warnings = args.fail_on_warnings || config.validation.fail_on_warnings;

    output.report(&reporter)?;

    if errors > 0 || (fail_on_warnings && warnings > 0) {
        warn!(errors, warnings, "Validation failed");
        output.error("✗ Descriptor is not valid")?;
        return Err(Error::ValidationFailed { errors, warnings });
    }

    info!(errors, warnings, ?mode, "Validation completed successfully");
    if warnings > 0 {
        output.warning(&format!("✓ Descriptor is valid with {} warning(s)", warnings))?;
    } else {
        output.success("✓ Descriptor is valid")?;
    }

    Ok(())
}
