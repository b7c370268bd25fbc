//! Lifecycle wiring
//!
//! Registers the three hooks of every host variant and orders them around
//! the host's tasks:
//!
//! - `process{V}GoogleServices` depends on `serviceFileProcessing{V}`
//! - `(assemble|bundle|generate){V}` depends on `preBuildProcessing{V}` and
//!   is finalized by `postBuildProcessing{V}`

use std::sync::Arc;

use flavorize_core::BuildType;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::context::BuildContext;
use crate::hooks::{PostBuildHook, PreBuildHook, ServiceFileHook};
use crate::tasks::{EdgeKind, TaskRegistry};
use crate::Result;

pub const SERVICE_FILE_TASK_PREFIX: &str = "serviceFileProcessing";
pub const PRE_BUILD_TASK_PREFIX: &str = "preBuildProcessing";
pub const POST_BUILD_TASK_PREFIX: &str = "postBuildProcessing";

/// Hook task names of one host variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WiredVariant {
    pub variant: String,
    pub service_file_task: String,
    pub pre_build_task: String,
    pub post_build_task: String,
}

impl WiredVariant {
    pub fn new(variant: &str) -> Self {
        let capitalized = capitalize(variant);
        Self {
            variant: variant.to_string(),
            service_file_task: format!("{}{}", SERVICE_FILE_TASK_PREFIX, capitalized),
            pre_build_task: format!("{}{}", PRE_BUILD_TASK_PREFIX, capitalized),
            post_build_task: format!("{}{}", POST_BUILD_TASK_PREFIX, capitalized),
        }
    }
}

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Host variant names (`<flavor><BuildType>`) for every flavor
pub fn host_variant_names<S: AsRef<str>>(flavors: &[S]) -> Vec<String> {
    flavors
        .iter()
        .flat_map(|flavor| {
            BuildType::ALL
                .iter()
                .map(move |build_type| format!("{}{}", flavor.as_ref(), build_type.task_suffix()))
        })
        .collect()
}

/// Host tasks the wiring attaches to for one host variant
pub fn host_tasks(variant: &str) -> Vec<String> {
    let capitalized = capitalize(variant);
    vec![
        format!("process{}GoogleServices", capitalized),
        format!("generate{}", capitalized),
        format!("assemble{}", capitalized),
        format!("bundle{}", capitalized),
    ]
}

fn task_pattern(pattern: &str) -> Result<Regex> {
    Ok(Regex::new(pattern)?)
}

/// Register and order the hooks of every host variant.
///
/// Ordering rules also reach host tasks registered after this call. Safe to
/// call repeatedly: tasks are registered once and edges are never
/// duplicated.
pub fn wire<R: TaskRegistry + ?Sized>(
    registry: &mut R,
    host_variants: &[String],
    context: Arc<BuildContext>,
) -> Result<Vec<WiredVariant>> {
    let mut wired = Vec::with_capacity(host_variants.len());

    for variant in host_variants {
        let tasks = WiredVariant::new(variant);
        let escaped = regex::escape(&capitalize(variant));

        registry.register(
            &tasks.service_file_task,
            Arc::new(ServiceFileHook::new(&tasks.service_file_task, context.clone())),
        );
        registry.register(
            &tasks.pre_build_task,
            Arc::new(PreBuildHook::new(&tasks.pre_build_task, context.clone())),
        );
        registry.register(
            &tasks.post_build_task,
            Arc::new(PostBuildHook::new(&tasks.post_build_task, context.clone())),
        );

        let process = task_pattern(&format!("^process{}GoogleServices$", escaped))?;
        for task in registry.configure_each(process, EdgeKind::DependsOn, &tasks.service_file_task)? {
            debug!("{} added before: {}", tasks.service_file_task, task);
        }

        let build = task_pattern(&format!("^(assemble|bundle|generate){}$", escaped))?;
        let before = registry.configure_each(build.clone(), EdgeKind::DependsOn, &tasks.pre_build_task)?;
        let after = registry.configure_each(build, EdgeKind::FinalizedBy, &tasks.post_build_task)?;
        for task in before.iter().chain(after.iter().filter(|t| !before.contains(t))) {
            debug!("Pre & post build tasks added around: {}", task);
        }

        wired.push(tasks);
    }

    Ok(wired)
}
