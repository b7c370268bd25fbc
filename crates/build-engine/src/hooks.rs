//! Build hooks run by the host around its compilation tasks

use std::sync::Arc;

use flavorize_core::{BuildType, PLUGIN_NAME};
use tracing::info;

use crate::context::BuildContext;
use crate::{report, service_file, Result};

/// An action registered as a host task
pub trait BuildHook: Send + Sync {
    fn name(&self) -> &str;
    fn execute(&self) -> Result<()>;
}

/// Stages the detected variant's service file
pub struct ServiceFileHook {
    name: String,
    context: Arc<BuildContext>,
}

impl ServiceFileHook {
    pub fn new(name: impl Into<String>, context: Arc<BuildContext>) -> Self {
        Self {
            name: name.into(),
            context,
        }
    }
}

impl BuildHook for ServiceFileHook {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self) -> Result<()> {
        info!("{} Service File Processing: Started...", PLUGIN_NAME);
        let detection = self.context.detect()?;
        service_file::stage(&self.context, &detection.variant, detection.build_type)?;
        Ok(())
    }
}

/// Detects the variant and prints the build reports
pub struct PreBuildHook {
    name: String,
    context: Arc<BuildContext>,
}

impl PreBuildHook {
    pub fn new(name: impl Into<String>, context: Arc<BuildContext>) -> Self {
        Self {
            name: name.into(),
            context,
        }
    }
}

impl BuildHook for PreBuildHook {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self) -> Result<()> {
        info!("{} Pre-Build Processing: Started...", PLUGIN_NAME);
        let detection = self.context.detect()?;
        let config = self.context.config();

        if config.debug.print_build_and_flavor_info {
            report::print_flavor_info(&self.context, &detection);
        }
        if config.debug.print_release_build_type_info && detection.build_type == BuildType::Release {
            let overrides = config.android.as_ref().and_then(|a| a.release_build_types.as_ref());
            report::print_release_build_type_info(overrides);
        }
        Ok(())
    }
}

/// Removes the staged service file
pub struct PostBuildHook {
    name: String,
    context: Arc<BuildContext>,
}

impl PostBuildHook {
    pub fn new(name: impl Into<String>, context: Arc<BuildContext>) -> Self {
        Self {
            name: name.into(),
            context,
        }
    }
}

impl BuildHook for PostBuildHook {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self) -> Result<()> {
        service_file::cleanup(&self.context);
        info!("{} Post-Build Processing: completed.", PLUGIN_NAME);
        Ok(())
    }
}
