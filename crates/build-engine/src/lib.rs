//! Flavorize Build Engine
//!
//! Pushes a resolved configuration into the host build system and wires the
//! per-variant hooks that stage service files around compilation.

pub mod configurator;
pub mod context;
pub mod detector;
pub mod hooks;
pub mod host;
pub mod lifecycle;
pub mod plugin;
pub mod report;
pub mod service_file;
pub mod signing;
pub mod tasks;

#[cfg(test)]
pub(crate) mod test_support;

pub use configurator::BuildConfigurator;
pub use context::BuildContext;
pub use detector::{detect, Detection};
pub use hooks::{BuildHook, PostBuildHook, PreBuildHook, ServiceFileHook};
pub use host::{HostExtension, RecordingHost, VariantDeclaration};
pub use lifecycle::{wire, WiredVariant};
pub use plugin::{Applied, FlavorizePlugin};
pub use service_file::StageOutcome;
pub use signing::{KeyStore, SigningConfig};
pub use tasks::{TaskGraph, TaskRegistry};

use flavorize_core::ConfigurationError;

/// Build errors
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("No valid flavor detected! Available flavors: {}", available_list(.available))]
    NoVariantDetected { available: Vec<String> },
    #[error("Unknown flavor: {0}")]
    UnknownVariant(String),
    #[error("Unknown task: {0}")]
    UnknownTask(String),
    #[error("Invalid task pattern: {0}")]
    TaskPattern(#[from] regex::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BuildError>;

fn available_list(available: &[String]) -> String {
    if available.is_empty() {
        "None".to_string()
    } else {
        available.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_variant_message_lists_available() {
        let err = BuildError::NoVariantDetected {
            available: vec!["banking".into(), "shop".into()],
        };
        assert_eq!(
            err.to_string(),
            "No valid flavor detected! Available flavors: banking, shop"
        );

        let err = BuildError::NoVariantDetected { available: vec![] };
        assert!(err.to_string().ends_with("None"));
    }
}
