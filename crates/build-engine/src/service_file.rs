//! Service file staging
//!
//! Copies the per-variant service config file (e.g. `google-services.json`)
//! into the module root before the host processes it, and removes it again
//! once the build finishes.

use std::path::PathBuf;

use flavorize_core::model::{ServiceConfig, ServiceEntry};
use flavorize_core::{BuildType, ConfigurationError};
use tracing::{debug, info, warn};

use crate::context::BuildContext;
use crate::Result;

/// Outcome of a service file lookup for one variant and build type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceLookup {
    /// The variant has no service configuration
    NotConfigured,
    /// The platform ships no service file
    NotApplicable,
    /// Relative path of the file, if the fallback chain found one
    File(Option<String>),
}

/// Result of [`stage`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Staged(PathBuf),
    Skipped,
}

pub fn lookup<E: ServiceEntry>(service: Option<&ServiceConfig<E>>, build_type: BuildType) -> ServiceLookup {
    match service {
        None => ServiceLookup::NotConfigured,
        Some(_) if E::FILE_NAME.is_none() => ServiceLookup::NotApplicable,
        Some(service) => ServiceLookup::File(service.config_file(build_type)),
    }
}

/// Copy the service file of `variant` into the module root and record it in
/// the context.
pub fn stage(context: &BuildContext, variant: &str, build_type: BuildType) -> Result<StageOutcome> {
    let relative = match context.service_lookup(variant, build_type)? {
        ServiceLookup::NotConfigured => {
            warn!(
                "No service configuration for flavor '{}'. Skipping service file processing.",
                variant
            );
            return Ok(StageOutcome::Skipped);
        }
        ServiceLookup::NotApplicable => {
            debug!("{} has no service file to stage", context.platform());
            return Ok(StageOutcome::Skipped);
        }
        ServiceLookup::File(None) => {
            return Err(ConfigurationError::ServiceFileUnresolved {
                variant: variant.to_string(),
                build_type: build_type.as_str().to_string(),
            }
            .into());
        }
        ServiceLookup::File(Some(relative)) => relative,
    };

    let source = context.source_root().join(&relative);
    if !source.is_file() {
        return Err(ConfigurationError::ServiceFileMissing(source).into());
    }
    let file_name = source
        .file_name()
        .ok_or_else(|| ConfigurationError::ServiceFileMissing(source.clone()))?;
    let destination = context.module_root().join(file_name);

    std::fs::copy(&source, &destination)?;
    if !destination.exists() {
        return Err(ConfigurationError::ServiceFileCopyFailed(destination).into());
    }

    info!(
        "Copied {:?} for flavor '{}' ({}) to {:?}",
        file_name, variant, build_type, destination
    );
    context.record_staged(destination.clone());
    Ok(StageOutcome::Staged(destination))
}

/// Delete the staged file recorded in the context.
///
/// Never fails: a missing record or file only logs a warning.
pub fn cleanup(context: &BuildContext) -> Option<PathBuf> {
    let Some(path) = context.take_staged() else {
        warn!("No staged service file recorded. Nothing to clean up.");
        return None;
    };

    if !path.exists() {
        warn!("Staged service file {:?} no longer exists", path);
        return None;
    }

    match std::fs::remove_file(&path) {
        Ok(()) => {
            info!("Removed staged service file {:?}", path);
            Some(path)
        }
        Err(e) => {
            warn!("Failed to remove staged service file {:?}: {}", path, e);
            None
        }
    }
}
