//! Platform sections: a default app plus named variant overrides

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::app::AndroidApp;
use crate::model::null_as_default;

/// A variant's override of the platform default app.
///
/// The app fields sit at the same level as the suffixes in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOverride<A> {
    #[serde(flatten)]
    pub app: A,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_name_suffix: Option<String>,
}

/// Default app and variants of one platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de> + Default"))]
pub struct PlatformSection<A> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub default: A,
    /// Variants in declaration order
    #[serde(default, rename = "flavor", alias = "variants", deserialize_with = "null_as_default")]
    pub variants: IndexMap<String, VariantOverride<A>>,
}

/// SDK levels pushed into the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidSdk {
    #[serde(default, alias = "minSdk", skip_serializing_if = "Option::is_none")]
    pub min_sdk: Option<u32>,
    #[serde(default, alias = "compileSdk", skip_serializing_if = "Option::is_none")]
    pub compile_sdk: Option<u32>,
    #[serde(default, alias = "targetSdk", skip_serializing_if = "Option::is_none")]
    pub target_sdk: Option<u32>,
}

/// Release build type settings. Unset fields leave host defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseBuildTypeOverrides {
    #[serde(default, alias = "shrinkResources", skip_serializing_if = "Option::is_none")]
    pub shrink_resources: Option<bool>,
    #[serde(default, alias = "minifyEnabled", skip_serializing_if = "Option::is_none")]
    pub minify_enabled: Option<bool>,
    #[serde(default, alias = "ndkVersion", skip_serializing_if = "Option::is_none")]
    pub ndk_version: Option<String>,
    #[serde(default, alias = "ndkDebugSymbolLevel", skip_serializing_if = "Option::is_none")]
    pub ndk_debug_symbol_level: Option<String>,
    #[serde(default, alias = "ndkAbiFilters", skip_serializing_if = "Option::is_none")]
    pub ndk_abi_filters: Option<Vec<String>>,
    #[serde(default, alias = "lintCheckReleaseBuilds", skip_serializing_if = "Option::is_none")]
    pub lint_check_release_builds: Option<bool>,
}

impl ReleaseBuildTypeOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Android section: the richest platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdk: Option<AndroidSdk>,
    #[serde(default, alias = "releaseBuildTypes", skip_serializing_if = "Option::is_none")]
    pub release_build_types: Option<ReleaseBuildTypeOverrides>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub default: AndroidApp,
    #[serde(default, rename = "flavor", alias = "variants", deserialize_with = "null_as_default")]
    pub variants: IndexMap<String, VariantOverride<AndroidApp>>,
}

