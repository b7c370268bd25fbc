//! Per-platform app records
//!
//! The same record shape is used for a platform's `default` app and for the
//! body of each variant override.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::merge::{merge_field, merge_nested, Merge};
use crate::model::service::{
    AndroidServiceEntry, IosServiceEntry, ServiceConfig, WebServiceEntry, WindowsServiceEntry,
};

/// Fields every platform app record exposes
pub trait AppRecord: Merge + Clone + Default {
    fn id(&self) -> Option<&str>;
    fn name(&self) -> Option<&str>;
    fn version_name(&self) -> Option<&str>;
    fn version_code(&self) -> Option<i64>;
    fn ads_id(&self) -> Option<&str> {
        None
    }
}

/// In-app subscription metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InAppSubscription {
    #[serde(default, alias = "apiKey", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, alias = "entitlementIds", skip_serializing_if = "Option::is_none")]
    pub entitlement_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub others: Option<IndexMap<String, String>>,
}

/// Auth client configuration for one build type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default, alias = "clientId", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub others: Option<IndexMap<String, String>>,
}

impl Merge for AuthConfig {
    fn merge_with(&self, fallback: &Self) -> Self {
        Self {
            client_id: merge_field(&self.client_id, &fallback.client_id),
            others: merge_field(&self.others, &fallback.others),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<AuthConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<AuthConfig>,
}

impl Merge for AuthData {
    fn merge_with(&self, fallback: &Self) -> Self {
        Self {
            release: merge_nested(&self.release, &fallback.release),
            debug: merge_nested(&self.debug, &fallback.debug),
        }
    }
}

/// Reference to signing material on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningReference {
    /// Path to the key properties file (alias, passwords, keystore path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_file: Option<String>,
    /// Keystore used when the properties file names none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keystore_file: Option<String>,
}

impl Merge for SigningReference {
    fn merge_with(&self, fallback: &Self) -> Self {
        Self {
            key_file: merge_field(&self.key_file, &fallback.key_file),
            keystore_file: merge_field(&self.keystore_file, &fallback.keystore_file),
        }
    }
}

/// Play Store automation credentials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastlaneAndroid {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_api_key: Option<String>,
}

impl Merge for FastlaneAndroid {
    fn merge_with(&self, fallback: &Self) -> Self {
        Self {
            google_api_key: merge_field(&self.google_api_key, &fallback.google_api_key),
        }
    }
}

/// App Store automation credentials and export options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastlaneIos {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apple_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_options_plist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_options_team_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_options_signing_certificate: Option<String>,
}

impl Merge for FastlaneIos {
    fn merge_with(&self, fallback: &Self) -> Self {
        Self {
            apple_api_key: merge_field(&self.apple_api_key, &fallback.apple_api_key),
            export_options_plist: merge_field(&self.export_options_plist, &fallback.export_options_plist),
            export_options_team_id: merge_field(
                &self.export_options_team_id,
                &fallback.export_options_team_id,
            ),
            export_options_signing_certificate: merge_field(
                &self.export_options_signing_certificate,
                &fallback.export_options_signing_certificate,
            ),
        }
    }
}

/// Android app
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidApp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_code: Option<i64>,
    /// Store rollout priority (1-5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gms_ads_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<SigningReference>,
    #[serde(default, rename = "firebase", skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceConfig<AndroidServiceEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_app_subscription: Option<Vec<InAppSubscription>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fastlane: Option<FastlaneAndroid>,
}

impl Merge for AndroidApp {
    fn merge_with(&self, fallback: &Self) -> Self {
        Self {
            id: merge_field(&self.id, &fallback.id),
            name: merge_field(&self.name, &fallback.name),
            version_name: merge_field(&self.version_name, &fallback.version_name),
            version_code: merge_field(&self.version_code, &fallback.version_code),
            priority: merge_field(&self.priority, &fallback.priority),
            main_file: merge_field(&self.main_file, &fallback.main_file),
            gms_ads_id: merge_field(&self.gms_ads_id, &fallback.gms_ads_id),
            signature: merge_nested(&self.signature, &fallback.signature),
            service: merge_nested(&self.service, &fallback.service),
            in_app_subscription: merge_field(&self.in_app_subscription, &fallback.in_app_subscription),
            auth: merge_nested(&self.auth, &fallback.auth),
            fastlane: merge_nested(&self.fastlane, &fallback.fastlane),
        }
    }
}

impl AppRecord for AndroidApp {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn version_name(&self) -> Option<&str> {
        self.version_name.as_deref()
    }

    fn version_code(&self) -> Option<i64> {
        self.version_code
    }

    fn ads_id(&self) -> Option<&str> {
        self.gms_ads_id.as_deref()
    }
}

/// iOS app
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IosApp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apple_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gms_ads_id: Option<String>,
    #[serde(default, rename = "firebase", skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceConfig<IosServiceEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_app_subscription: Option<Vec<InAppSubscription>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fastlane: Option<FastlaneIos>,
}

impl Merge for IosApp {
    fn merge_with(&self, fallback: &Self) -> Self {
        Self {
            id: merge_field(&self.id, &fallback.id),
            name: merge_field(&self.name, &fallback.name),
            version_name: merge_field(&self.version_name, &fallback.version_name),
            version_code: merge_field(&self.version_code, &fallback.version_code),
            main_file: merge_field(&self.main_file, &fallback.main_file),
            apple_id: merge_field(&self.apple_id, &fallback.apple_id),
            gms_ads_id: merge_field(&self.gms_ads_id, &fallback.gms_ads_id),
            service: merge_nested(&self.service, &fallback.service),
            in_app_subscription: merge_field(&self.in_app_subscription, &fallback.in_app_subscription),
            auth: merge_nested(&self.auth, &fallback.auth),
            fastlane: merge_nested(&self.fastlane, &fallback.fastlane),
        }
    }
}

impl AppRecord for IosApp {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn version_name(&self) -> Option<&str> {
        self.version_name.as_deref()
    }

    fn version_code(&self) -> Option<i64> {
        self.version_code
    }

    fn ads_id(&self) -> Option<&str> {
        self.gms_ads_id.as_deref()
    }
}

/// Desktop/browser app record; Windows and Web share the same fields.
macro_rules! basic_app {
    ($(#[$meta:meta])* $name:ident, $entry:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub id: Option<String>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub name: Option<String>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub version_name: Option<String>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub version_code: Option<i64>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub main_file: Option<String>,
            #[serde(default, rename = "firebase", skip_serializing_if = "Option::is_none")]
            pub service: Option<ServiceConfig<$entry>>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub in_app_subscription: Option<Vec<InAppSubscription>>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub auth: Option<AuthData>,
        }

        impl Merge for $name {
            fn merge_with(&self, fallback: &Self) -> Self {
                Self {
                    id: merge_field(&self.id, &fallback.id),
                    name: merge_field(&self.name, &fallback.name),
                    version_name: merge_field(&self.version_name, &fallback.version_name),
                    version_code: merge_field(&self.version_code, &fallback.version_code),
                    main_file: merge_field(&self.main_file, &fallback.main_file),
                    service: merge_nested(&self.service, &fallback.service),
                    in_app_subscription: merge_field(
                        &self.in_app_subscription,
                        &fallback.in_app_subscription,
                    ),
                    auth: merge_nested(&self.auth, &fallback.auth),
                }
            }
        }

        impl AppRecord for $name {
            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }

            fn name(&self) -> Option<&str> {
                self.name.as_deref()
            }

            fn version_name(&self) -> Option<&str> {
                self.version_name.as_deref()
            }

            fn version_code(&self) -> Option<i64> {
                self.version_code
            }
        }
    };
}

basic_app!(
    /// Windows app
    WindowsApp,
    WindowsServiceEntry
);
basic_app!(
    /// Web app
    WebApp,
    WebServiceEntry
);

#[cfg(test)]
mod tests {
    use super::*;

    fn default_app() -> AndroidApp {
        AndroidApp {
            id: Some("com.x".into()),
            name: Some("X".into()),
            version_name: Some("1.0.0".into()),
            version_code: Some(7),
            gms_ads_id: Some("ca-app-pub-default".into()),
            in_app_subscription: Some(vec![InAppSubscription {
                api_key: Some("default-key".into()),
                ..Default::default()
            }]),
            auth: Some(AuthData {
                release: Some(AuthConfig {
                    client_id: Some("prod-client".into()),
                    others: None,
                }),
                debug: None,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_override_wins() {
        let variant = AndroidApp {
            name: Some("Banking".into()),
            version_code: Some(42),
            ..Default::default()
        };
        let merged = variant.merge_with(&default_app());
        assert_eq!(merged.name.as_deref(), Some("Banking"));
        assert_eq!(merged.version_code, Some(42));
        assert_eq!(merged.id.as_deref(), Some("com.x"));
        assert_eq!(merged.gms_ads_id.as_deref(), Some("ca-app-pub-default"));
    }

    #[test]
    fn test_purchase_list_is_replaced_wholesale() {
        let variant = AndroidApp {
            in_app_subscription: Some(vec![]),
            ..Default::default()
        };
        let merged = variant.merge_with(&default_app());
        assert_eq!(merged.in_app_subscription, Some(vec![]));
    }

    #[test]
    fn test_auth_merges_per_build_type() {
        let variant = AndroidApp {
            auth: Some(AuthData {
                release: None,
                debug: Some(AuthConfig {
                    client_id: Some("dev-client".into()),
                    others: None,
                }),
            }),
            ..Default::default()
        };
        let auth = variant.merge_with(&default_app()).auth.unwrap();
        assert_eq!(auth.release.unwrap().client_id.as_deref(), Some("prod-client"));
        assert_eq!(auth.debug.unwrap().client_id.as_deref(), Some("dev-client"));
    }

    #[test]
    fn test_web_app_record() {
        let app = WebApp {
            id: Some("web.x".into()),
            version_code: Some(3),
            ..Default::default()
        };
        assert_eq!(AppRecord::id(&app), Some("web.x"));
        assert_eq!(app.ads_id(), None);
    }
}
