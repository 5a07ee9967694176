//! Configuration management CLI commands.
//!
//! Provides `config get`, `config set`, `config list`, and `config path` commands
//! for viewing and modifying configuration settings from the command line.

use std::fmt::Write as _;
use std::path::Path;

use clap::Subcommand;
use satpass::config::{config_file_path, ConfigFile, ConfigKey};

use super::common::write_output;
use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., observer.city)
        key: String,
    },

    /// Set a configuration value (an empty value clears an optional key)
    Set {
        /// Configuration key in format section.key (e.g., observer.city)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    let path = config_file_path();
    match command {
        ConfigCommands::Get { key } => {
            let value = get_value(&path, &key)?;
            if value.is_empty() {
                println!("(not set)");
            } else {
                println!("{}", value);
            }
            Ok(())
        }
        ConfigCommands::Set { key, value } => {
            let name = set_value(&path, &key, &value)?;
            println!("Set {} = {}", name, value);
            Ok(())
        }
        ConfigCommands::List => write_output(&render_list(&load(&path)?)),
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'satpass config list' to see available keys.",
            key
        ))
    })
}

fn load(path: &Path) -> Result<ConfigFile, CliError> {
    Ok(ConfigFile::load_from(path)?)
}

/// Current value of `key` in the file at `path`, empty when unset.
fn get_value(path: &Path, key: &str) -> Result<String, CliError> {
    let config_key = parse_key(key)?;
    Ok(config_key.get(&load(path)?))
}

/// Validate and store `value`, returning the canonical key name.
fn set_value(path: &Path, key: &str, value: &str) -> Result<String, CliError> {
    let config_key = parse_key(key)?;

    let mut config = load(path)?;
    config_key
        .set(&mut config, value)
        .map_err(|e| CliError::Config(e.to_string()))?;
    config.save_to(path)?;

    Ok(config_key.name())
}

/// All settings grouped by section.
fn render_list(config: &ConfigFile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Configuration Settings");
    let _ = writeln!(out, "======================");
    let _ = writeln!(out);

    let mut current_section = "";

    for key in ConfigKey::all() {
        let section = key.section();

        if section != current_section {
            if !current_section.is_empty() {
                let _ = writeln!(out);
            }
            let _ = writeln!(out, "[{}]", section);
            current_section = section;
        }

        let value = key.get(config);
        if value.is_empty() {
            let _ = writeln!(out, "  {} = (not set)", key.key_name());
        } else {
            let _ = writeln!(out, "  {} = {}", key.key_name(), value);
        }
    }

    out
}
