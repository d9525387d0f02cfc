//! # Cart Crate Errors
//!
//! Cart operation errors live in `rocketshoes-core` (`CartError`). This
//! module only adds the configuration errors raised while loading
//! `config.toml`.

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// Unknown storage backend name.
    #[error("Unknown storage backend: '{0}'. Valid options: sqlite, file, memory")]
    UnknownBackend(String),

    /// No platform directory could be determined.
    #[error("No {0} directory available on this platform")]
    NoPlatformDir(&'static str),

    /// Reading or writing the config file failed.
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be rendered as TOML.
    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
