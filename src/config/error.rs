use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file '{0}' not found")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Configuration lists no sites")]
    NoSites,

    #[error("Site '{0}' is listed in `sites` but has no [{0}] entry")]
    MissingSiteEntry(String),

    #[error("Invalid [{0}] entry")]
    InvalidSiteEntry(String, #[source] toml::de::Error),

    #[error("Site '{0}' is listed more than once in `sites`")]
    DuplicateSite(String),

    #[error("Configuration lists no years")]
    NoYears,

    #[error("Year {0} is not a four-digit year")]
    InvalidYear(i32),

    #[error("Year {0} is listed more than once in `years`")]
    DuplicateYear(i32),

    #[error("`api_settings.parameters` must name at least one parameter")]
    NoParameters,
}
