//! Flavorize Core - configuration model and resolution
//!
//! This crate parses the declarative flavor configuration, merges every
//! variant with its platform default and validates the result.

pub mod error;
pub mod loader;
pub mod merge;
pub mod model;
pub mod platform;
pub mod resolve;

pub use error::{ConfigurationError, Result};
pub use model::FlavorizeSpec;
pub use platform::{BuildType, Platform};
pub use resolve::{resolve, ResolvedAndroid, ResolvedConfig, ResolvedPlatform, ResolvedVariant};

/// Flavorize version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Plugin name used in log output
pub const PLUGIN_NAME: &str = "Flavorize";
