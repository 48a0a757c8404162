//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use std::path::Path;

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
    }
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    let mut created_any = false;

    // If no specific option is given, default to both
    let init_user = args.user || !args.project;
    let init_project = args.project || !args.user;

    if init_user {
        let user_config_path = Config::user_config_path()
            .ok_or_else(|| Error::config("Unable to determine user config directory"))?;
        created_any |= init_file(&user_config_path, "User", args.force, output)?;
    }

    if init_project {
        created_any |= init_file(&Config::project_config_path(), "Project", args.force, output)?;
    }

    if created_any {
        output.info("Configuration files created with default values.")?;
        output.info("Edit them to customize settings for your environment.")?;
    }

    Ok(())
}

/// Write a default config file unless one exists; returns whether it was written
fn init_file(path: &Path, label: &str, force: bool, output: &mut OutputWriter) -> Result<bool> {
    if path.exists() && !force {
        output.warning(&format!("{} config already exists at {}", label, path.display()))?;
        return Ok(false);
    }

    Config::default().save(path)?;
    output.success(&format!("✓ Created {} config at {}", label.to_lowercase(), path.display()))?;
    Ok(true)
}

/// Handle config show subcommand
fn handle_config_show(args: ConfigShowArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    output.write(&render_config(config, args.format)?)
}

fn render_config(config: &Config, format: ConfigFormat) -> Result<String> {
    let content = match format {
        ConfigFormat::Toml => toml::to_string_pretty(config)
            .map_err(|e| Error::config(format!("Failed to serialize as TOML: {}", e)))?,
        ConfigFormat::Json => {
            let mut json = serde_json::to_string_pretty(config)
                .map_err(|e| Error::config(format!("Failed to serialize as JSON: {}", e)))?;
            json.push('\n');
            json
        }
        ConfigFormat::Yaml => serde_yaml::to_string(config)
            .map_err(|e| Error::config(format!("Failed to serialize as YAML: {}", e)))?,
    };
    Ok(content)
}
