//! Build configurator
//!
//! Pushes SDK levels, flavors, signing and release settings of a resolved
//! configuration into the host.

use std::path::{Path, PathBuf};

use flavorize_core::model::{AndroidApp, AndroidSdk, AppRecord, ReleaseBuildTypeOverrides};
use flavorize_core::{ResolvedAndroid, ResolvedConfig, ResolvedPlatform, ResolvedVariant};
use tracing::{debug, info, warn};

use crate::host::{HostExtension, ResValue, VariantDeclaration};
use crate::signing::{self, RELEASE_SIGNING_CONFIG};

/// Flavor dimension every variant is declared under
pub const FLAVOR_DIMENSION: &str = "variant";

/// Applies a resolved configuration to the host
#[derive(Debug, Clone)]
pub struct BuildConfigurator {
    module_root: PathBuf,
}

impl BuildConfigurator {
    pub fn new(module_root: impl Into<PathBuf>) -> Self {
        Self {
            module_root: module_root.into(),
        }
    }

    /// Android project directory holding the module (`<root>/android`)
    pub fn project_dir(&self) -> &Path {
        self.module_root.parent().unwrap_or(self.module_root.as_path())
    }

    /// Apply the android section. Skipped with a warning when the section is
    /// missing or declares no variants.
    pub fn apply<H: HostExtension + ?Sized>(&self, config: &ResolvedConfig, host: &mut H) {
        match &config.android {
            Some(android) if !android.apps.variants.is_empty() => self.configure_android(android, host),
            _ => warn!("Invalid android flavor data in the configuration file. Skipping host configuration."),
        }
    }

    pub fn configure_android<H: HostExtension + ?Sized>(&self, android: &ResolvedAndroid, host: &mut H) {
        if let Some(sdk) = &android.sdk {
            configure_sdk(sdk, host);
        }
        declare_variants(&android.apps, host);
        self.configure_signing(&android.apps.default, host);
        if let Some(overrides) = &android.release_build_types {
            configure_release_build_type(overrides, host);
        }
        info!(
            "Configured {} android flavor(s)",
            android.apps.variants.len()
        );
    }

    fn configure_signing<H: HostExtension + ?Sized>(&self, default: &AndroidApp, host: &mut H) {
        let Some(reference) = &default.signature else {
            warn!("No signature configured for the default android app");
            return;
        };

        if let Some(config) = signing::load_signing_config(reference, self.project_dir()) {
            host.register_signing_config(RELEASE_SIGNING_CONFIG, config);
            host.build_type_mut("release").signing_config = Some(RELEASE_SIGNING_CONFIG.to_string());
            debug!("Attached signing config '{}' to release", RELEASE_SIGNING_CONFIG);
        }
    }
}

/// Overwrite host SDK levels that are set in the configuration
pub fn configure_sdk<H: HostExtension + ?Sized>(sdk: &AndroidSdk, host: &mut H) {
    let settings = host.sdk_mut();
    if let Some(compile_sdk) = sdk.compile_sdk {
        settings.compile_sdk = Some(compile_sdk);
    }
    if let Some(target_sdk) = sdk.target_sdk {
        settings.target_sdk = Some(target_sdk);
    }
    if let Some(min_sdk) = sdk.min_sdk {
        settings.min_sdk = Some(min_sdk);
    }
}

/// Host declaration of one resolved variant
pub fn variant_declaration<A: AppRecord>(variant: &ResolvedVariant<A>) -> VariantDeclaration {
    let mut res_values = vec![ResValue::string("app_name", &variant.final_name())];
    if let Some(ads_id) = variant.app.ads_id() {
        res_values.push(ResValue::string("gms_ads_id", ads_id));
    }

    VariantDeclaration {
        name: variant.name.clone(),
        dimension: FLAVOR_DIMENSION.to_string(),
        application_id: variant.final_id(),
        version_name: variant.final_version_name(),
        version_code: variant.version_code(),
        res_values,
    }
}

/// Declare every variant of a platform under the flavor dimension
pub fn declare_variants<A: AppRecord, H: HostExtension + ?Sized>(platform: &ResolvedPlatform<A>, host: &mut H) {
    host.add_flavor_dimension(FLAVOR_DIMENSION);
    for variant in &platform.variants {
        let declaration = variant_declaration(variant);
        debug!(
            "Declaring {} flavor '{}' ({})",
            platform.platform, declaration.name, declaration.application_id
        );
        host.create_variant(declaration);
    }
}

/// Apply release build type settings that are set. Unset values keep the
/// host's current ones.
pub fn configure_release_build_type<H: HostExtension + ?Sized>(
    overrides: &ReleaseBuildTypeOverrides,
    host: &mut H,
) {
    if let Some(version) = &overrides.ndk_version {
        host.set_ndk_version(version);
    }

    let release = host.build_type_mut("release");
    if let Some(shrink) = overrides.shrink_resources {
        release.shrink_resources = shrink;
    }
    if let Some(minify) = overrides.minify_enabled {
        release.minify_enabled = minify;
    }
    if let Some(level) = &overrides.ndk_debug_symbol_level {
        release.ndk_debug_symbol_level = Some(level.clone());
    }
    if let Some(filters) = overrides.ndk_abi_filters.as_ref().filter(|f| !f.is_empty()) {
        release.ndk_abi_filters = filters.clone();
    }

    if let Some(check) = overrides.lint_check_release_builds {
        host.lint_mut().check_release_builds = check;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;
    use crate::test_support::{resolved, Project, ANDROID_CONFIG};

    #[test]
    fn test_apply_declares_variants() {
        let project = Project::new(ANDROID_CONFIG);
        let mut host = RecordingHost::new();
        BuildConfigurator::new(project.module_root()).apply(&resolved(ANDROID_CONFIG), &mut host);

        assert_eq!(host.flavor_dimensions, vec![FLAVOR_DIMENSION]);
        assert_eq!(host.variants.len(), 2);

        let shop = host.variant("shop").unwrap();
        assert_eq!(shop.application_id, "com.x.shop");
        assert_eq!(shop.version_name, "1.0.0-shop");
        assert_eq!(shop.version_code, Some(1));
        assert_eq!(shop.res_value("app_name"), Some("X Shop"));
        assert_eq!(shop.res_value("gms_ads_id"), Some("ca-app-pub-1"));

        let banking = host.variant("banking").unwrap();
        assert_eq!(banking.res_value("app_name"), Some("Bank"));
        assert_eq!(banking.application_id, "com.x");
    }

    #[test]
    fn test_sdk_only_overwrites_present_values() {
        let project = Project::new(ANDROID_CONFIG);
        let mut host = RecordingHost::new();
        host.sdk.target_sdk = Some(33);
        BuildConfigurator::new(project.module_root()).apply(&resolved(ANDROID_CONFIG), &mut host);

        assert_eq!(host.sdk.min_sdk, Some(23));
        assert_eq!(host.sdk.compile_sdk, Some(34));
        assert_eq!(host.sdk.target_sdk, Some(33));
    }

    #[test]
    fn test_release_settings_applied_when_set() {
        let project = Project::new(ANDROID_CONFIG);
        let mut host = RecordingHost::new();
        host.build_type_mut("release").shrink_resources = true;
        host.build_type_mut("release").ndk_abi_filters = vec!["x86".into(), "armeabi-v7a".into()];
        BuildConfigurator::new(project.module_root()).apply(&resolved(ANDROID_CONFIG), &mut host);

        let release = host.build_type("release").unwrap();
        assert!(release.minify_enabled);
        assert!(release.shrink_resources);
        assert_eq!(release.ndk_abi_filters, vec!["arm64-v8a"]);
        assert!(!host.lint.check_release_builds);
        assert_eq!(host.ndk_version, None);
        assert_eq!(release.signing_config, None);
    }

    #[test]
    fn test_empty_abi_filters_keep_host_filters() {
        let mut host = RecordingHost::new();
        host.build_type_mut("release").ndk_abi_filters = vec!["x86".into()];
        let overrides = ReleaseBuildTypeOverrides {
            ndk_abi_filters: Some(vec![]),
            ndk_version: Some("26.1.10909125".into()),
            ..Default::default()
        };
        configure_release_build_type(&overrides, &mut host);

        assert_eq!(host.build_type("release").unwrap().ndk_abi_filters, vec!["x86"]);
        assert_eq!(host.ndk_version(), Some("26.1.10909125"));
    }

    #[test]
    fn test_signing_attached_to_release() {
        let yaml = ANDROID_CONFIG.replace(
            "      gms_ads_id: ca-app-pub-1\n",
            "      gms_ads_id: ca-app-pub-1\n      signature:\n        key_file: key.properties\n",
        );
        let project = Project::new(&yaml);
        project.write(
            "android/key.properties",
            "keyAlias=upload\nstorePassword=s\nkeyPassword=k\nkeyStoreFile=upload.jks\n",
        );
        project.write("android/upload.jks", "store");

        let mut host = RecordingHost::new();
        BuildConfigurator::new(project.module_root()).apply(&resolved(&yaml), &mut host);

        let signing = host.signing_config(RELEASE_SIGNING_CONFIG).unwrap();
        assert_eq!(signing.keystore.path, project.root().join("android").join("upload.jks"));
        assert_eq!(
            host.build_type("release").unwrap().signing_config.as_deref(),
            Some(RELEASE_SIGNING_CONFIG)
        );
    }

    #[test]
    fn test_signing_material_at_project_root() {
        let yaml = ANDROID_CONFIG.replace(
            "      gms_ads_id: ca-app-pub-1\n",
            "      gms_ads_id: ca-app-pub-1\n      signature:\n        key_file: keys/key.properties\n        keystore_file: keys/upload.jks\n",
        );
        let project = Project::new(&yaml);
        project.write("keys/key.properties", "keyAlias=upload\nstorePassword=s\n");
        project.write("keys/upload.jks", "store");

        let mut host = RecordingHost::new();
        BuildConfigurator::new(project.module_root()).apply(&resolved(&yaml), &mut host);

        let signing = host.signing_config(RELEASE_SIGNING_CONFIG).unwrap();
        assert_eq!(signing.keystore.path, project.root().join("keys").join("upload.jks"));
    }

    #[test]
    fn test_no_variants_skips_android() {
        let yaml = "app:\n  android:\n    default:\n      id: com.x\n      version_code: 1\n";
        let mut host = RecordingHost::new();
        BuildConfigurator::new("/tmp/android/app").apply(&resolved(yaml), &mut host);

        assert!(host.variants.is_empty());
        assert!(host.flavor_dimensions.is_empty());
    }
}
