//! Host build system extension points
//!
//! [`HostExtension`] is the surface the configurator writes into: SDK levels,
//! flavor declarations, signing configs, build types and lint options.
//! [`RecordingHost`] keeps everything in memory.

use indexmap::IndexMap;
use serde::Serialize;

use crate::signing::SigningConfig;

/// SDK levels of the host module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SdkSettings {
    pub compile_sdk: Option<u32>,
    pub target_sdk: Option<u32>,
    pub min_sdk: Option<u32>,
}

/// Generated resource value (`resValue("string", name, value)`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResValue {
    pub kind: String,
    pub name: String,
    pub value: String,
}

impl ResValue {
    pub fn string(name: &str, value: &str) -> Self {
        Self {
            kind: "string".to_string(),
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// A product flavor declared on the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantDeclaration {
    pub name: String,
    pub dimension: String,
    pub application_id: String,
    pub version_name: String,
    pub version_code: Option<i64>,
    pub res_values: Vec<ResValue>,
}

impl VariantDeclaration {
    pub fn res_value(&self, name: &str) -> Option<&str> {
        self.res_values
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.value.as_str())
    }
}

/// Settings of one build type (e.g. `release`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildTypeSettings {
    pub shrink_resources: bool,
    pub minify_enabled: bool,
    pub ndk_debug_symbol_level: Option<String>,
    pub ndk_abi_filters: Vec<String>,
    pub signing_config: Option<String>,
}

/// Lint options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintSettings {
    pub check_release_builds: bool,
}

impl Default for LintSettings {
    fn default() -> Self {
        Self {
            check_release_builds: true,
        }
    }
}

/// Extension points of the host build system
pub trait HostExtension {
    fn sdk(&self) -> &SdkSettings;
    fn sdk_mut(&mut self) -> &mut SdkSettings;
    fn add_flavor_dimension(&mut self, dimension: &str);
    fn create_variant(&mut self, declaration: VariantDeclaration);
    fn register_signing_config(&mut self, name: &str, config: SigningConfig);
    /// Get a build type, creating it with host defaults when missing
    fn build_type_mut(&mut self, name: &str) -> &mut BuildTypeSettings;
    fn ndk_version(&self) -> Option<&str>;
    fn set_ndk_version(&mut self, version: &str);
    fn lint_mut(&mut self) -> &mut LintSettings;
}

/// In-memory host that records every setting
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordingHost {
    pub sdk: SdkSettings,
    pub flavor_dimensions: Vec<String>,
    pub variants: IndexMap<String, VariantDeclaration>,
    #[serde(skip)]
    pub signing_configs: IndexMap<String, SigningConfig>,
    pub build_types: IndexMap<String, BuildTypeSettings>,
    pub ndk_version: Option<String>,
    pub lint: LintSettings,
}

impl RecordingHost {
    /// Host with the standard `debug` and `release` build types
    pub fn new() -> Self {
        let mut host = Self::default();
        host.build_types.insert("debug".to_string(), BuildTypeSettings::default());
        host.build_types.insert("release".to_string(), BuildTypeSettings::default());
        host
    }

    pub fn variant(&self, name: &str) -> Option<&VariantDeclaration> {
        self.variants.get(name)
    }

    pub fn build_type(&self, name: &str) -> Option<&BuildTypeSettings> {
        self.build_types.get(name)
    }

    pub fn signing_config(&self, name: &str) -> Option<&SigningConfig> {
        self.signing_configs.get(name)
    }
}

impl HostExtension for RecordingHost {
    fn sdk(&self) -> &SdkSettings {
        &self.sdk
    }

    fn sdk_mut(&mut self) -> &mut SdkSettings {
        &mut self.sdk
    }

    fn add_flavor_dimension(&mut self, dimension: &str) {
        if !self.flavor_dimensions.iter().any(|d| d == dimension) {
            self.flavor_dimensions.push(dimension.to_string());
        }
    }

    fn create_variant(&mut self, declaration: VariantDeclaration) {
        self.variants.insert(declaration.name.clone(), declaration);
    }

    fn register_signing_config(&mut self, name: &str, config: SigningConfig) {
        self.signing_configs.insert(name.to_string(), config);
    }

    fn build_type_mut(&mut self, name: &str) -> &mut BuildTypeSettings {
        self.build_types.entry(name.to_string()).or_default()
    }

    fn ndk_version(&self) -> Option<&str> {
        self.ndk_version.as_deref()
    }

    fn set_ndk_version(&mut self, version: &str) {
        self.ndk_version = Some(version.to_string());
    }

    fn lint_mut(&mut self) -> &mut LintSettings {
        &mut self.lint
    }
}
