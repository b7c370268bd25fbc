//! Configuration root

use serde::{Deserialize, Serialize};

use crate::model::app::{IosApp, WebApp, WindowsApp};
use crate::model::section::{AndroidSection, PlatformSection};

fn default_true() -> bool {
    true
}

/// Root of the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorizeSpec {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub app: AppData,
    #[serde(default)]
    pub debug: DebugFlags,
}

impl Default for FlavorizeSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            app: AppData::default(),
            debug: DebugFlags::default(),
        }
    }
}

/// Toggles for the diagnostic reports printed during a build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugFlags {
    #[serde(default, alias = "printDebug")]
    pub print_debug: bool,
    #[serde(default = "default_true", alias = "printBuildAndFlavorInfo")]
    pub print_build_and_flavor_info: bool,
    #[serde(default = "default_true", alias = "printSdkVersions")]
    pub print_sdk_versions: bool,
    #[serde(default, alias = "printReleaseBuildTypeInfo")]
    pub print_release_build_type_info: bool,
}

impl Default for DebugFlags {
    fn default() -> Self {
        Self {
            print_debug: false,
            print_build_and_flavor_info: true,
            print_sdk_versions: true,
            print_release_build_type_info: false,
        }
    }
}

/// Platform sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios: Option<PlatformSection<IosApp>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows: Option<PlatformSection<WindowsApp>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<PlatformSection<WebApp>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general: Option<GeneralSection>,
}

impl AppData {
    pub fn has_platform(&self) -> bool {
        self.android.is_some() || self.ios.is_some() || self.windows.is_some() || self.web.is_some()
    }
}

/// Shared app metadata (pubspec-style), carried through unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_code: Option<i64>,
}
