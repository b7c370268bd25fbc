//! Error types for Flavorize
//!
//! Centralized configuration error handling using thiserror.

use std::path::PathBuf;

use thiserror::Error;

use crate::platform::Platform;

/// Fatal configuration error. Any of these aborts the host build.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error reading {path}: {source}")]
    YamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Error reading {path}: {source}")]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unsupported configuration file format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("{platform} default app {field} is missing!")]
    MissingDefaultField {
        platform: Platform,
        field: &'static str,
    },

    #[error("{platform} flavor '{variant}' app {field} is missing!")]
    MissingVariantField {
        platform: Platform,
        variant: String,
        field: &'static str,
    },

    #[error("No platform configured: at least one of android, ios, windows or web must be present")]
    NoPlatformConfigured,

    #[error("Unknown build type: {0}")]
    UnknownBuildType(String),

    #[error("No valid service configuration file found for flavor: {variant} and buildType: {build_type}")]
    ServiceFileUnresolved { variant: String, build_type: String },

    #[error("Service configuration file missing: {0}")]
    ServiceFileMissing(PathBuf),

    #[error("Service configuration file copy failed: {0}")]
    ServiceFileCopyFailed(PathBuf),
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigurationError>;
