//! Resolution engine
//!
//! Merges every variant with its platform default and validates the result.
//! Validation is fail-fast: the first violation aborts resolution.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ConfigurationError, Result};
use crate::merge::{suffix, Merge};
use crate::model::{
    AndroidApp, AndroidSdk, AppRecord, DebugFlags, FlavorizeSpec, GeneralSection, IosApp,
    ReleaseBuildTypeOverrides, VariantOverride, WebApp, WindowsApp,
};
use crate::platform::Platform;

/// A variant merged with its platform default
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVariant<A> {
    pub name: String,
    pub app: A,
    pub id_suffix: String,
    pub name_suffix: String,
    pub version_name_suffix: String,
}

impl<A: AppRecord> ResolvedVariant<A> {
    /// Merge `variant` over `default`. Suffixes are never inherited.
    pub fn merge(name: &str, variant: &VariantOverride<A>, default: &A) -> Self {
        Self {
            name: name.to_string(),
            app: variant.app.merge_with(default),
            id_suffix: suffix(&variant.id_suffix),
            name_suffix: suffix(&variant.name_suffix),
            version_name_suffix: suffix(&variant.version_name_suffix),
        }
    }

    pub fn final_id(&self) -> String {
        format!("{}{}", self.app.id().unwrap_or_default(), self.id_suffix)
    }

    pub fn final_name(&self) -> String {
        format!("{}{}", self.app.name().unwrap_or_default(), self.name_suffix)
    }

    pub fn final_version_name(&self) -> String {
        format!(
            "{}{}",
            self.app.version_name().unwrap_or_default(),
            self.version_name_suffix
        )
    }

    pub fn version_code(&self) -> Option<i64> {
        self.app.version_code()
    }
}

/// Resolved default and variants of one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPlatform<A> {
    pub platform: Platform,
    pub default: A,
    /// Declaration order of the configuration file
    pub variants: Vec<ResolvedVariant<A>>,
}

impl<A: AppRecord> ResolvedPlatform<A> {
    pub fn variant(&self, name: &str) -> Option<&ResolvedVariant<A>> {
        self.variants.iter().find(|v| v.name == name)
    }

    pub fn variant_names(&self) -> Vec<&str> {
        self.variants.iter().map(|v| v.name.as_str()).collect()
    }
}

/// Resolved android section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAndroid {
    pub sdk: Option<AndroidSdk>,
    pub release_build_types: Option<ReleaseBuildTypeOverrides>,
    #[serde(flatten)]
    pub apps: ResolvedPlatform<AndroidApp>,
}

/// Fully merged and validated configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    pub debug: DebugFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<ResolvedAndroid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ios: Option<ResolvedPlatform<IosApp>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows: Option<ResolvedPlatform<WindowsApp>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<ResolvedPlatform<WebApp>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general: Option<GeneralSection>,
}

pub fn is_valid_id(id: Option<&str>) -> bool {
    id.map(|id| !id.trim().is_empty()).unwrap_or(false)
}

pub fn is_valid_version_code(version_code: Option<i64>) -> bool {
    matches!(version_code, Some(code) if code > 0)
}

pub fn is_valid_priority(priority: Option<i32>) -> bool {
    matches!(priority, Some(1..=5))
}

/// Merge and validate every platform section of `spec`.
pub fn resolve(spec: &FlavorizeSpec) -> Result<ResolvedConfig> {
    let app = &spec.app;

    if !app.has_platform() {
        return Err(ConfigurationError::NoPlatformConfigured);
    }

    let android = match &app.android {
        Some(section) => {
            let apps = resolve_platform(Platform::Android, &section.default, &section.variants)?;
            for variant in &apps.variants {
                if variant.app.priority.is_some() && !is_valid_priority(variant.app.priority) {
                    warn!(
                        "android flavor '{}' priority {:?} is outside 1..=5",
                        variant.name, variant.app.priority
                    );
                }
            }
            Some(ResolvedAndroid {
                sdk: section.sdk.clone(),
                release_build_types: section.release_build_types.clone(),
                apps,
            })
        }
        None => None,
    };

    let ios = app
        .ios
        .as_ref()
        .map(|s| resolve_platform(Platform::Ios, &s.default, &s.variants))
        .transpose()?;
    let windows = app
        .windows
        .as_ref()
        .map(|s| resolve_platform(Platform::Windows, &s.default, &s.variants))
        .transpose()?;
    let web = app
        .web
        .as_ref()
        .map(|s| resolve_platform(Platform::Web, &s.default, &s.variants))
        .transpose()?;

    Ok(ResolvedConfig {
        debug: spec.debug,
        android,
        ios,
        windows,
        web,
        general: app.general.clone(),
    })
}

fn resolve_platform<A: AppRecord>(
    platform: Platform,
    default: &A,
    variants: &IndexMap<String, VariantOverride<A>>,
) -> Result<ResolvedPlatform<A>> {
    if variants.is_empty() {
        validate_default(platform, default)?;
    }

    let mut resolved = Vec::with_capacity(variants.len());
    for (name, variant) in variants {
        let merged = ResolvedVariant::merge(name, variant, default);
        validate_variant(platform, &merged)?;
        debug!("Resolved {} flavor '{}' -> {}", platform, name, merged.final_id());
        resolved.push(merged);
    }

    Ok(ResolvedPlatform {
        platform,
        default: default.clone(),
        variants: resolved,
    })
}

fn validate_default<A: AppRecord>(platform: Platform, default: &A) -> Result<()> {
    if !is_valid_id(default.id()) {
        return Err(ConfigurationError::MissingDefaultField { platform, field: "id" });
    }
    if !is_valid_version_code(default.version_code()) {
        return Err(ConfigurationError::MissingDefaultField {
            platform,
            field: "version_code",
        });
    }
    Ok(())
}

fn validate_variant<A: AppRecord>(platform: Platform, variant: &ResolvedVariant<A>) -> Result<()> {
    let missing = |field| ConfigurationError::MissingVariantField {
        platform,
        variant: variant.name.clone(),
        field,
    };

    if !is_valid_id(variant.app.id()) {
        return Err(missing("id"));
    }
    if !is_valid_version_code(variant.version_code()) {
        return Err(missing("version_code"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AndroidSection, AppData, PlatformSection};

    fn android_spec(default: AndroidApp, variants: Vec<(&str, VariantOverride<AndroidApp>)>) -> FlavorizeSpec {
        FlavorizeSpec {
            app: AppData {
                android: Some(AndroidSection {
                    default,
                    variants: variants
                        .into_iter()
                        .map(|(name, v)| (name.to_string(), v))
                        .collect(),
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn default_app(version_code: i64) -> AndroidApp {
        AndroidApp {
            id: Some("com.x".into()),
            name: Some("X".into()),
            version_name: Some("1.2.0".into()),
            version_code: Some(version_code),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_only_passes() {
        let resolved = resolve(&android_spec(default_app(1), vec![])).unwrap();
        let android = resolved.android.unwrap();
        assert!(android.apps.variants.is_empty());
        assert_eq!(android.apps.default.id.as_deref(), Some("com.x"));
    }

    #[test]
    fn test_default_zero_version_code_fails() {
        let err = resolve(&android_spec(default_app(0), vec![])).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingDefaultField {
                platform: Platform::Android,
                field: "version_code"
            }
        ));
        assert!(err.to_string().contains("android"));
    }

    #[test]
    fn test_suffix_builds_final_id() {
        let banking = VariantOverride {
            id_suffix: Some(".paid".into()),
            ..Default::default()
        };
        let resolved = resolve(&android_spec(default_app(1), vec![("banking", banking)])).unwrap();
        let apps = resolved.android.unwrap().apps;
        let banking = apps.variant("banking").unwrap();

        assert_eq!(banking.final_id(), "com.x.paid");
        assert_eq!(banking.final_name(), "X");
        assert_eq!(banking.final_version_name(), "1.2.0");
        assert_eq!(banking.version_code(), Some(1));
    }

    #[test]
    fn test_override_wins_and_suffixes_concatenate() {
        let premium = VariantOverride {
            app: AndroidApp {
                name: Some("Premium".into()),
                version_code: Some(9),
                ..Default::default()
            },
            name_suffix: Some(" Dev".into()),
            version_name_suffix: Some("-beta".into()),
            ..Default::default()
        };
        let resolved = resolve(&android_spec(default_app(1), vec![("premium", premium)])).unwrap();
        let apps = resolved.android.unwrap().apps;
        let premium = &apps.variants[0];

        assert_eq!(premium.final_name(), "Premium Dev");
        assert_eq!(premium.final_version_name(), "1.2.0-beta");
        assert_eq!(premium.version_code(), Some(9));
        assert_eq!(premium.id_suffix, "");
    }

    #[test]
    fn test_invalid_variant_fails_whole_configuration() {
        let good = VariantOverride::default();
        let bad = VariantOverride {
            app: AndroidApp {
                version_code: Some(-1),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = resolve(&android_spec(default_app(1), vec![("good", good), ("bad", bad)])).unwrap_err();
        match err {
            ConfigurationError::MissingVariantField { variant, field, .. } => {
                assert_eq!(variant, "bad");
                assert_eq!(field, "version_code");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_variants_skip_default_validation() {
        let mut default = default_app(0);
        default.id = None;
        let variant = VariantOverride {
            app: AndroidApp {
                id: Some("com.v".into()),
                version_code: Some(3),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(resolve(&android_spec(default, vec![("v", variant)])).is_ok());
    }

    #[test]
    fn test_blank_variant_id_fails() {
        let mut default = default_app(1);
        default.id = Some("  ".into());
        let variant = VariantOverride {
            id_suffix: Some(".paid".into()),
            ..Default::default()
        };
        let err = resolve(&android_spec(default, vec![("v", variant)])).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingVariantField { field: "id", .. }));
    }

    #[test]
    fn test_no_platform() {
        let err = resolve(&FlavorizeSpec::default()).unwrap_err();
        assert!(matches!(err, ConfigurationError::NoPlatformConfigured));
    }

    #[test]
    fn test_ios_section_validated_independently() {
        let spec = FlavorizeSpec {
            app: AppData {
                android: android_spec(default_app(1), vec![]).app.android,
                ios: Some(PlatformSection {
                    default: IosApp {
                        id: Some("com.x.ios".into()),
                        ..Default::default()
                    },
                    variants: IndexMap::new(),
                }),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = resolve(&spec).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingDefaultField {
                platform: Platform::Ios,
                ..
            }
        ));
    }
}
