//! CLI commands for Flavorize
//!
//! Every command works on a project root (the directory holding
//! `pubspec.yaml` or `android/`).

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use flavorize_build_engine::hooks::{BuildHook, PostBuildHook, PreBuildHook, ServiceFileHook};
use flavorize_build_engine::lifecycle::{self, WiredVariant};
use flavorize_build_engine::report::{self, VariantSummary};
use flavorize_build_engine::tasks::Edge;
use flavorize_build_engine::{
    detect, BuildConfigurator, Detection, FlavorizePlugin, RecordingHost, TaskGraph,
};
use flavorize_core::{loader, Platform, ResolvedConfig};
use serde::Serialize;
use tracing::{info, warn};

use crate::logging;

/// Project options shared by every command
#[derive(Debug, Clone)]
pub struct ProjectOptions {
    pub project_path: PathBuf,
    pub module_path: Option<PathBuf>,
}

impl ProjectOptions {
    pub fn new(project_path: impl Into<PathBuf>) -> Self {
        Self {
            project_path: project_path.into(),
            module_path: None,
        }
    }

    fn plugin(&self) -> FlavorizePlugin {
        let plugin = FlavorizePlugin::new(&self.project_path);
        match &self.module_path {
            Some(module) => plugin.with_module_root(module),
            None => plugin,
        }
    }

    /// Load the resolved configuration. Missing or disabled is an error here.
    fn load(&self, plugin: &FlavorizePlugin) -> Result<ResolvedConfig> {
        let config = plugin
            .load()
            .with_context(|| format!("Failed to load configuration for {:?}", self.project_path))?;

        let Some(config) = config else {
            bail!(
                "No enabled configuration found at {:?}",
                loader::locate(&self.project_path)
            );
        };

        if config.debug.print_debug {
            logging::raise_to_debug();
        }
        Ok(config)
    }
}

/// Print the resolved configuration
pub struct ResolveCommand {
    pub options: ProjectOptions,
}

impl ResolveCommand {
    pub fn execute(&self) -> Result<ResolvedConfig> {
        let plugin = self.options.plugin();
        let config = self.options.load(&plugin)?;
        info!(
            "Resolved {} android flavor(s)",
            config.android.as_ref().map(|a| a.apps.variants.len()).unwrap_or(0)
        );
        Ok(config)
    }
}

/// Detection result with the detected variant's final values
#[derive(Debug, Serialize)]
pub struct DetectReport {
    #[serde(flatten)]
    pub detection: Detection,
    pub summary: Option<VariantSummary>,
}

/// Detect the variant and build type of a set of build commands
pub struct DetectCommand {
    pub options: ProjectOptions,
    pub platform: Platform,
    pub commands: Vec<String>,
}

impl DetectCommand {
    pub fn execute(&self) -> Result<DetectReport> {
        let plugin = self.options.plugin();
        let config = self.options.load(&plugin)?;

        let known: Vec<&str> = match self.platform {
            Platform::Android => config.android.as_ref().map(|a| a.apps.variant_names()),
            Platform::Ios => config.ios.as_ref().map(|p| p.variant_names()),
            Platform::Windows => config.windows.as_ref().map(|p| p.variant_names()),
            Platform::Web => config.web.as_ref().map(|p| p.variant_names()),
        }
        .unwrap_or_default();

        let detection = detect(self.commands.as_slice(), &known)?;
        let summary = report::variant_summary(&config, self.platform, &detection.variant);
        Ok(DetectReport { detection, summary })
    }
}

/// Apply the configuration to an in-memory host
pub struct ConfigureCommand {
    pub options: ProjectOptions,
}

impl ConfigureCommand {
    pub fn execute(&self) -> Result<RecordingHost> {
        let plugin = self.options.plugin();
        let config = self.options.load(&plugin)?;

        let mut host = RecordingHost::new();
        BuildConfigurator::new(plugin.module_root()).apply(&config, &mut host);
        if config.debug.print_sdk_versions {
            report::print_sdk_info(&host.sdk);
        }
        Ok(host)
    }
}

/// Hook tasks and ordering edges of every host variant
#[derive(Debug, Serialize)]
pub struct Plan {
    pub variants: Vec<WiredVariant>,
    pub edges: Vec<Edge>,
}

/// Wire the hooks against the host tasks of every variant
pub struct PlanCommand {
    pub options: ProjectOptions,
}

impl PlanCommand {
    pub fn execute(&self) -> Result<Plan> {
        let plugin = self.options.plugin();
        let config = self.options.load(&plugin)?;

        let flavors: Vec<&str> = config
            .android
            .as_ref()
            .map(|a| a.apps.variant_names())
            .unwrap_or_default();

        let mut graph = TaskGraph::new();
        for variant in lifecycle::host_variant_names(&flavors) {
            for task in lifecycle::host_tasks(&variant) {
                graph.add_host_task(&task);
            }
        }

        let mut host = RecordingHost::new();
        let applied = plugin
            .apply(&mut host, &mut graph)?
            .context("Configuration disappeared while planning")?;

        Ok(Plan {
            variants: applied.wired,
            edges: graph.edges(),
        })
    }
}

/// Run one build command between the hooks
pub struct ExecCommand {
    pub options: ProjectOptions,
    pub platform: Platform,
    pub command: Vec<String>,
}

impl ExecCommand {
    /// Returns the exit code of the build command
    pub fn execute(&self) -> Result<i32> {
        let Some((program, args)) = self.command.split_first() else {
            bail!("No build command given");
        };

        let plugin = self.options.plugin().with_requested_tasks(args.iter().cloned());
        let Some(config) = plugin.load()? else {
            warn!("Running {} without flavor processing", program);
            return run(program, args);
        };
        if config.debug.print_debug {
            logging::raise_to_debug();
        }

        let context = Arc::new(plugin.context(config).with_platform(self.platform));
        let detection = context.detect()?;
        let wired = WiredVariant::new(&format!(
            "{}{}",
            detection.variant,
            detection.build_type.task_suffix()
        ));

        ServiceFileHook::new(&wired.service_file_task, context.clone()).execute()?;

        let result = PreBuildHook::new(&wired.pre_build_task, context.clone())
            .execute()
            .map_err(anyhow::Error::from)
            .and_then(|_| run(program, args));

        PostBuildHook::new(&wired.post_build_task, context).execute()?;
        result
    }
}

fn run(program: &str, args: &[String]) -> Result<i32> {
    info!("Running {} {}", program, args.join(" "));
    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("Failed to run {}", program))?;

    Ok(status.code().unwrap_or(1))
}

/// Project root of `path`: the path itself, or the project holding it when
/// `path` is an `android/` directory.
pub fn project_root(path: &Path) -> PathBuf {
    let is_android_dir = path.file_name().map(|n| n == "android").unwrap_or(false);
    match path.parent() {
        Some(parent) if is_android_dir && !path.join(loader::WRAPPER_MANIFEST).exists() => {
            parent.to_path_buf()
        }
        _ => path.to_path_buf(),
    }
}
