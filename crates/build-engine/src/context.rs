//! Per-invocation build state shared by the hooks

use std::path::{Path, PathBuf};

use flavorize_core::{BuildType, Platform, ResolvedConfig};
use parking_lot::Mutex;

use crate::detector::{self, Detection};
use crate::service_file::{self, ServiceLookup};
use crate::{BuildError, Result};

/// State of one build invocation.
///
/// Created once per invocation and shared by the hooks through an `Arc`.
/// The staged service file path is the only mutable part.
#[derive(Debug)]
pub struct BuildContext {
    config: ResolvedConfig,
    platform: Platform,
    requested_tasks: Vec<String>,
    module_root: PathBuf,
    source_root: PathBuf,
    staged_file: Mutex<Option<PathBuf>>,
}

impl BuildContext {
    /// Context for an Android module at `module_root` (`<root>/android/app`).
    /// The source root defaults to the module root's grandparent.
    pub fn new(config: ResolvedConfig, requested_tasks: Vec<String>, module_root: impl Into<PathBuf>) -> Self {
        let module_root = module_root.into();
        let source_root = module_root
            .parent()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| module_root.clone());

        Self {
            config,
            platform: Platform::Android,
            requested_tasks,
            module_root,
            source_root,
            staged_file: Mutex::new(None),
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn requested_tasks(&self) -> &[String] {
        &self.requested_tasks
    }

    pub fn module_root(&self) -> &Path {
        &self.module_root
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Variant names of the context platform in declaration order
    pub fn variant_names(&self) -> Vec<&str> {
        let config = &self.config;
        match self.platform {
            Platform::Android => config.android.as_ref().map(|a| a.apps.variant_names()),
            Platform::Ios => config.ios.as_ref().map(|p| p.variant_names()),
            Platform::Windows => config.windows.as_ref().map(|p| p.variant_names()),
            Platform::Web => config.web.as_ref().map(|p| p.variant_names()),
        }
        .unwrap_or_default()
    }

    /// Detect the variant and build type from the requested tasks
    pub fn detect(&self) -> Result<Detection> {
        detector::detect(self.requested_tasks.as_slice(), &self.variant_names())
    }

    /// Service file lookup for a variant of the context platform
    pub fn service_lookup(&self, variant: &str, build_type: BuildType) -> Result<ServiceLookup> {
        let unknown = || BuildError::UnknownVariant(variant.to_string());
        let config = &self.config;

        let lookup = match self.platform {
            Platform::Android => {
                let apps = &config.android.as_ref().ok_or_else(unknown)?.apps;
                let app = &apps.variant(variant).ok_or_else(unknown)?.app;
                service_file::lookup(app.service.as_ref(), build_type)
            }
            Platform::Ios => {
                let app = &config.ios.as_ref().and_then(|p| p.variant(variant)).ok_or_else(unknown)?.app;
                service_file::lookup(app.service.as_ref(), build_type)
            }
            Platform::Windows => {
                let app = &config.windows.as_ref().and_then(|p| p.variant(variant)).ok_or_else(unknown)?.app;
                service_file::lookup(app.service.as_ref(), build_type)
            }
            Platform::Web => {
                let app = &config.web.as_ref().and_then(|p| p.variant(variant)).ok_or_else(unknown)?.app;
                service_file::lookup(app.service.as_ref(), build_type)
            }
        };
        Ok(lookup)
    }

    pub fn record_staged(&self, path: PathBuf) {
        *self.staged_file.lock() = Some(path);
    }

    pub fn staged_file(&self) -> Option<PathBuf> {
        self.staged_file.lock().clone()
    }

    /// Take the recorded staged file, leaving no record behind
    pub fn take_staged(&self) -> Option<PathBuf> {
        self.staged_file.lock().take()
    }
}
