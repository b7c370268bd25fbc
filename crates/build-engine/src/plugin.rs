//! Plugin entry point
//!
//! Loads and resolves the configuration, configures the host and wires the
//! build hooks of every host variant.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use flavorize_core::{loader, resolve, ResolvedConfig, PLUGIN_NAME, VERSION};
use tracing::info;

use crate::configurator::BuildConfigurator;
use crate::context::BuildContext;
use crate::host::HostExtension;
use crate::lifecycle::{self, WiredVariant};
use crate::report;
use crate::tasks::TaskRegistry;
use crate::Result;

/// Result of a successful [`FlavorizePlugin::apply`]
pub struct Applied {
    pub context: Arc<BuildContext>,
    pub wired: Vec<WiredVariant>,
}

/// The plugin applied to one project
#[derive(Debug, Clone)]
pub struct FlavorizePlugin {
    root_dir: PathBuf,
    module_root: PathBuf,
    requested_tasks: Vec<String>,
}

impl FlavorizePlugin {
    /// Plugin for the project at `root_dir`. The Android module is expected
    /// at `<root_dir>/android/app`.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        let root_dir = root_dir.into();
        let module_root = root_dir.join("android").join("app");
        Self {
            root_dir,
            module_root,
            requested_tasks: Vec::new(),
        }
    }

    pub fn with_module_root(mut self, module_root: impl Into<PathBuf>) -> Self {
        self.module_root = module_root.into();
        self
    }

    /// Task names requested by this build invocation
    pub fn with_requested_tasks<I, S>(mut self, tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requested_tasks = tasks.into_iter().map(Into::into).collect();
        self
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn module_root(&self) -> &Path {
        &self.module_root
    }

    /// Load and resolve the configuration.
    ///
    /// `None` when the file is missing or the feature is disabled.
    pub fn load(&self) -> Result<Option<ResolvedConfig>> {
        let Some(spec) = loader::load_project(&self.root_dir)? else {
            return Ok(None);
        };

        if !spec.enabled {
            info!("{} is disabled", PLUGIN_NAME);
            return Ok(None);
        }

        Ok(Some(resolve(&spec)?))
    }

    /// Build context of this invocation for a resolved configuration
    pub fn context(&self, config: ResolvedConfig) -> BuildContext {
        BuildContext::new(config, self.requested_tasks.clone(), &self.module_root)
    }

    /// Apply the plugin: configure the host and wire the hooks.
    pub fn apply<H, R>(&self, host: &mut H, registry: &mut R) -> Result<Option<Applied>>
    where
        H: HostExtension + ?Sized,
        R: TaskRegistry + ?Sized,
    {
        info!("{} v{} applying to {:?}", PLUGIN_NAME, VERSION, self.root_dir);

        let Some(config) = self.load()? else {
            return Ok(None);
        };

        BuildConfigurator::new(&self.module_root).apply(&config, host);
        if config.debug.print_sdk_versions {
            report::print_sdk_info(host.sdk());
        }

        let flavors: Vec<String> = config
            .android
            .as_ref()
            .map(|a| a.apps.variant_names().into_iter().map(String::from).collect())
            .unwrap_or_default();
        let host_variants = lifecycle::host_variant_names(&flavors);

        let context = Arc::new(self.context(config));
        let wired = lifecycle::wire(registry, &host_variants, context.clone())?;

        Ok(Some(Applied { context, wired }))
    }
}
