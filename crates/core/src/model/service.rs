//! Per-build-type external service configuration (Firebase-style)
//!
//! Every platform holds up to three entries (release/debug/profile). Lookups
//! fall back field by field: `debug` falls back to `release`, `profile` falls
//! back to `debug` and then `release`. `release` never falls back.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::merge::{merge_field, merge_nested, Merge};
use crate::platform::BuildType;

/// Shared capability of the per-platform service entries
pub trait ServiceEntry: Merge + Clone {
    /// Name of the config file inside the entry's `path` directory, if the
    /// platform ships one.
    const FILE_NAME: Option<&'static str>;

    fn project_id(&self) -> Option<&str>;
    fn app_id(&self) -> Option<&str>;

    fn path(&self) -> Option<&str> {
        None
    }
}

/// Android service entry (`google-services.json`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidServiceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, alias = "firebase_app_id", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    /// Directory holding the config file, relative to the source root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Merge for AndroidServiceEntry {
    fn merge_with(&self, fallback: &Self) -> Self {
        Self {
            project_id: merge_field(&self.project_id, &fallback.project_id),
            app_id: merge_field(&self.app_id, &fallback.app_id),
            path: merge_field(&self.path, &fallback.path),
        }
    }
}

impl ServiceEntry for AndroidServiceEntry {
    const FILE_NAME: Option<&'static str> = Some("google-services.json");

    fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

/// iOS service entry (`GoogleService-Info.plist`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IosServiceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, alias = "firebase_app_id", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_target: Option<String>,
}

impl Merge for IosServiceEntry {
    fn merge_with(&self, fallback: &Self) -> Self {
        Self {
            project_id: merge_field(&self.project_id, &fallback.project_id),
            app_id: merge_field(&self.app_id, &fallback.app_id),
            path: merge_field(&self.path, &fallback.path),
            build_target: merge_field(&self.build_target, &fallback.build_target),
        }
    }
}

impl ServiceEntry for IosServiceEntry {
    const FILE_NAME: Option<&'static str> = Some("GoogleService-Info.plist");

    fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

/// Service entry without a config file (Windows, Web)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainServiceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, alias = "firebase_app_id", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

impl Merge for PlainServiceEntry {
    fn merge_with(&self, fallback: &Self) -> Self {
        Self {
            project_id: merge_field(&self.project_id, &fallback.project_id),
            app_id: merge_field(&self.app_id, &fallback.app_id),
        }
    }
}

impl ServiceEntry for PlainServiceEntry {
    const FILE_NAME: Option<&'static str> = None;

    fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }
}

pub type WindowsServiceEntry = PlainServiceEntry;
pub type WebServiceEntry = PlainServiceEntry;

/// Release/debug/profile service entries of one platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig<E> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<E>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<E>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<E>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

impl<E: ServiceEntry> ServiceConfig<E> {
    /// Field-level lookup. Blank values count as absent.
    pub fn resolve<'a, F>(&'a self, build_type: BuildType, field: F) -> Option<&'a str>
    where
        F: Fn(&'a E) -> Option<&'a str>,
    {
        let pick = |entry: &'a Option<E>| non_blank(entry.as_ref().and_then(&field));

        match build_type {
            BuildType::Release => pick(&self.release),
            BuildType::Debug => pick(&self.debug).or_else(|| pick(&self.release)),
            BuildType::Profile => pick(&self.profile)
                .or_else(|| pick(&self.debug))
                .or_else(|| pick(&self.release)),
        }
    }

    /// Same as [`ServiceConfig::resolve`] for a build type given by name
    pub fn resolve_named<'a, F>(&'a self, build_type: &str, field: F) -> Result<Option<&'a str>>
    where
        F: Fn(&'a E) -> Option<&'a str>,
    {
        let build_type: BuildType = build_type.parse()?;
        Ok(self.resolve(build_type, field))
    }

    pub fn project_id(&self, build_type: BuildType) -> Option<&str> {
        self.resolve(build_type, |e| e.project_id())
    }

    pub fn app_id(&self, build_type: BuildType) -> Option<&str> {
        self.resolve(build_type, |e| e.app_id())
    }

    pub fn path(&self, build_type: BuildType) -> Option<&str> {
        self.resolve(build_type, |e| e.path())
    }

    /// Relative path of the service file (`<path>/<file name>`)
    pub fn config_file(&self, build_type: BuildType) -> Option<String> {
        let file_name = E::FILE_NAME?;
        let dir = self.path(build_type)?;
        Some(format!("{}/{}", dir.trim_end_matches('/'), file_name))
    }
}

impl ServiceConfig<IosServiceEntry> {
    pub fn build_target(&self, build_type: BuildType) -> Option<&str> {
        self.resolve(build_type, |e| e.build_target.as_deref())
    }
}

impl<E: ServiceEntry> Merge for ServiceConfig<E> {
    fn merge_with(&self, fallback: &Self) -> Self {
        Self {
            release: merge_nested(&self.release, &fallback.release),
            debug: merge_nested(&self.debug, &fallback.debug),
            profile: merge_nested(&self.profile, &fallback.profile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(project_id: &str) -> AndroidServiceEntry {
        AndroidServiceEntry {
            project_id: Some(project_id.to_string()),
            app_id: None,
            path: Some(format!("firebase/{}", project_id)),
        }
    }

    fn config(release: Option<&str>, debug: Option<&str>, profile: Option<&str>) -> ServiceConfig<AndroidServiceEntry> {
        ServiceConfig {
            release: release.map(entry),
            debug: debug.map(entry),
            profile: profile.map(entry),
        }
    }

    #[test]
    fn test_release_never_falls_back() {
        let config = config(None, Some("dev"), Some("prof"));
        assert_eq!(config.project_id(BuildType::Release), None);
    }

    #[test]
    fn test_debug_falls_back_to_release() {
        let config = config(Some("prod"), None, None);
        assert_eq!(config.project_id(BuildType::Debug), Some("prod"));

        let config = config_with_blank_debug();
        assert_eq!(config.project_id(BuildType::Debug), Some("prod"));
    }

    fn config_with_blank_debug() -> ServiceConfig<AndroidServiceEntry> {
        let mut config = config(Some("prod"), Some("dev"), None);
        config.debug.as_mut().unwrap().project_id = Some("   ".into());
        config
    }

    #[test]
    fn test_profile_chain() {
        assert_eq!(config(Some("prod"), Some("dev"), Some("prof")).project_id(BuildType::Profile), Some("prof"));
        assert_eq!(config(Some("prod"), Some("dev"), None).project_id(BuildType::Profile), Some("dev"));
        assert_eq!(config(Some("prod"), None, None).project_id(BuildType::Profile), Some("prod"));
    }

    #[test]
    fn test_resolve_named_rejects_unknown_build_type() {
        let config = config(Some("prod"), None, None);
        assert!(config.resolve_named("staging", |e| e.project_id()).is_err());
        assert_eq!(
            config.resolve_named("Debug", |e| e.project_id()).unwrap(),
            Some("prod")
        );
    }

    #[test]
    fn test_config_file() {
        let config = config(Some("prod"), Some("dev"), None);
        assert_eq!(
            config.config_file(BuildType::Debug).as_deref(),
            Some("firebase/dev/google-services.json")
        );

        let web: ServiceConfig<WebServiceEntry> = ServiceConfig {
            release: Some(PlainServiceEntry {
                project_id: Some("web".into()),
                app_id: None,
            }),
            ..Default::default()
        };
        assert_eq!(web.config_file(BuildType::Release), None);
        assert_eq!(web.project_id(BuildType::Profile), Some("web"));
    }

    #[test]
    fn test_merge_per_build_type() {
        let variant = ServiceConfig {
            release: Some(AndroidServiceEntry {
                project_id: Some("variant".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let default = config(Some("prod"), Some("dev"), None);

        let merged = variant.merge_with(&default);
        let release = merged.release.unwrap();
        assert_eq!(release.project_id.as_deref(), Some("variant"));
        assert_eq!(release.path.as_deref(), Some("firebase/prod"));
        assert_eq!(merged.debug, default.debug);
    }

    #[test]
    fn test_ios_build_target() {
        let config: ServiceConfig<IosServiceEntry> = ServiceConfig {
            release: Some(IosServiceEntry {
                build_target: Some("Runner".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(config.build_target(BuildType::Profile), Some("Runner"));
    }
}
