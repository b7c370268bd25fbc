//! Build information reports

use flavorize_core::model::{AppRecord, ReleaseBuildTypeOverrides};
use flavorize_core::{Platform, ResolvedConfig, ResolvedPlatform};
use serde::Serialize;
use tracing::{info, warn};

use crate::context::BuildContext;
use crate::detector::Detection;
use crate::host::SdkSettings;

/// Final values of one variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantSummary {
    pub variant: String,
    pub app_id: String,
    pub app_name: String,
    pub version_name: String,
    pub version_code: Option<i64>,
}

fn summarize<A: AppRecord>(platform: Option<&ResolvedPlatform<A>>, variant: &str) -> Option<VariantSummary> {
    let resolved = platform?.variant(variant)?;
    Some(VariantSummary {
        variant: resolved.name.clone(),
        app_id: resolved.final_id(),
        app_name: resolved.final_name(),
        version_name: resolved.final_version_name(),
        version_code: resolved.version_code(),
    })
}

/// Summary of `variant` on `platform`, if it exists
pub fn variant_summary(config: &ResolvedConfig, platform: Platform, variant: &str) -> Option<VariantSummary> {
    match platform {
        Platform::Android => summarize(config.android.as_ref().map(|a| &a.apps), variant),
        Platform::Ios => summarize(config.ios.as_ref(), variant),
        Platform::Windows => summarize(config.windows.as_ref(), variant),
        Platform::Web => summarize(config.web.as_ref(), variant),
    }
}

pub fn print_flavor_info(context: &BuildContext, detection: &Detection) {
    info!("Build Information");
    info!("  Build Type: {}", detection.build_type);

    match variant_summary(context.config(), context.platform(), &detection.variant) {
        Some(summary) => {
            info!("  Flavor: {}", summary.variant);
            info!("  App Name: {}", summary.app_name);
            info!("  App ID: {}", summary.app_id);
            info!("  Version Name: {}", summary.version_name);
            match summary.version_code {
                Some(code) => info!("  Version Code: {}", code),
                None => info!("  Version Code: Unknown"),
            }
        }
        None => info!("  No flavor detected..."),
    }
}

pub fn print_sdk_info(sdk: &SdkSettings) {
    let level = |value: Option<u32>| value.map(|v| v.to_string()).unwrap_or_else(|| "Unknown".to_string());

    info!("SDK Information");
    info!("  minSdk: {}", level(sdk.min_sdk));
    info!("  targetSdk: {}", level(sdk.target_sdk));
    info!("  compileSdk: {}", level(sdk.compile_sdk));
}

pub fn print_release_build_type_info(overrides: Option<&ReleaseBuildTypeOverrides>) {
    let Some(overrides) = overrides.filter(|o| !o.is_empty()) else {
        warn!("No release build type settings configured");
        return;
    };

    info!("Release Build Type Information");
    if let Some(shrink) = overrides.shrink_resources {
        info!("  shrinkResources: {}", shrink);
    }
    if let Some(minify) = overrides.minify_enabled {
        info!("  minifyEnabled: {}", minify);
    }
    if let Some(ndk_version) = &overrides.ndk_version {
        info!("  ndkVersion: {}", ndk_version);
    }
    if let Some(level) = &overrides.ndk_debug_symbol_level {
        info!("  ndk.debugSymbolLevel: {}", level);
    }
    if let Some(filters) = &overrides.ndk_abi_filters {
        info!("  ndk.abiFilters: {}", filters.join(", "));
    }
    if let Some(lint) = overrides.lint_check_release_builds {
        info!("  lint.checkReleaseBuilds: {}", lint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{resolved, ANDROID_CONFIG};

    #[test]
    fn test_variant_summary() {
        let config = resolved(ANDROID_CONFIG);
        let shop = variant_summary(&config, Platform::Android, "shop").unwrap();

        assert_eq!(shop.app_id, "com.x.shop");
        assert_eq!(shop.app_name, "X Shop");
        assert_eq!(shop.version_name, "1.0.0-shop");
        assert_eq!(shop.version_code, Some(1));

        assert!(variant_summary(&config, Platform::Android, "missing").is_none());
        assert!(variant_summary(&config, Platform::Web, "shop").is_none());
    }
}
