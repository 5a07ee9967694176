//! Init command - write a configuration file with every setting.

use satpass::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Run the init command.
///
/// Existing settings are kept; missing ones are filled with defaults.
pub fn run() -> Result<(), CliError> {
    let path = config_file_path();
    let existed = path.exists();

    let config = ConfigFile::load().unwrap_or_default();
    config.save()?;

    if existed {
        println!("Updated configuration file: {}", path.display());
    } else {
        println!("Created configuration file: {}", path.display());
    }
    println!();
    println!(
        "Observer: {}",
        config
            .observer_location()
            .map(|location| location.to_string())
            .unwrap_or_else(|e| format!("(invalid: {})", e))
    );
    println!("Satellite designator: {}", config.elements.designator);
    println!();
    println!("Edit this file or use 'satpass config set' to customize settings.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}
