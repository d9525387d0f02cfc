//! Config file commands.

use std::path::PathBuf;

use rocketshoes_cart::{CartConfig, ConfigError};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Prints the effective configuration (file + environment) as TOML.
pub fn show(config_path: Option<PathBuf>) -> CommandResult {
    let config = CartConfig::load(config_path)?;
    print!("{}", config.to_toml()?);
    println!("# storage location: {}", config.storage_path()?.display());
    Ok(())
}

pub fn path(config_path: Option<PathBuf>) -> CommandResult {
    let path = config_path
        .or_else(CartConfig::default_config_path)
        .ok_or(ConfigError::NoPlatformDir("config"))?;
    println!("{}", path.display());
    Ok(())
}

/// Writes the default configuration, refusing to clobber an existing file.
pub fn init(config_path: Option<PathBuf>, force: bool) -> CommandResult {
    let path = config_path
        .or_else(CartConfig::default_config_path)
        .ok_or(ConfigError::NoPlatformDir("config"))?;

    if path.exists() && !force {
        return Err(format!("{} already exists (use --force to overwrite)", path.display()).into());
    }

    let written = CartConfig::default().save(Some(path))?;
    println!("Wrote {}", written.display());
    Ok(())
}
