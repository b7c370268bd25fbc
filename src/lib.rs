//! Flavorize - multi-platform build flavor configuration
//!
//! Reads a declarative flavor configuration, resolves every variant against
//! its platform default and applies the result to the host build system.
//!
//! ## Architecture
//!
//! - `flavorize-core`: configuration model, loading, merging and validation
//! - `flavorize-build-engine`: host configuration, variant detection,
//!   service file staging and lifecycle hooks

#![warn(clippy::all)]

pub mod commands;
pub mod logging;

// Re-export main components for library usage
pub use flavorize_build_engine as build;
pub use flavorize_core as core;

/// Prelude module for convenient imports
pub mod prelude {
    pub use flavorize_build_engine::{
        BuildConfigurator, BuildContext, BuildError, FlavorizePlugin, HostExtension, RecordingHost,
        TaskGraph, TaskRegistry,
    };
    pub use flavorize_core::{resolve, BuildType, ConfigurationError, FlavorizeSpec, Platform, ResolvedConfig};
}
