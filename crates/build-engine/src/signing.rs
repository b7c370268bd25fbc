//! Release signing material
//!
//! Locates the key-properties file and the keystore it names. Nothing here is
//! fatal: missing material is logged and signing is skipped.

use std::path::{Path, PathBuf};

use java_properties::PropertiesError;
use flavorize_core::model::SigningReference;
use tracing::{debug, info, warn};

/// Name of the signing config registered on the host
pub const RELEASE_SIGNING_CONFIG: &str = "release";

/// Keystore information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStore {
    /// Path to keystore file
    pub path: PathBuf,
    /// Keystore password
    pub password: Option<String>,
    /// Key alias
    pub alias: Option<String>,
    /// Key password (if different from keystore password)
    pub key_password: Option<String>,
    /// Keystore type (JKS, PKCS12)
    pub store_type: KeyStoreType,
}

/// Keystore type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStoreType {
    Jks,
    Pkcs12,
}

impl KeyStoreType {
    /// Guess the type from the file extension. Anything unknown is JKS.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("p12") || ext.eq_ignore_ascii_case("pfx") => {
                KeyStoreType::Pkcs12
            }
            _ => KeyStoreType::Jks,
        }
    }
}

impl KeyStore {
    pub fn new(path: PathBuf) -> Self {
        let store_type = KeyStoreType::from_path(&path);
        Self {
            path,
            password: None,
            alias: None,
            key_password: None,
            store_type,
        }
    }

    /// Get the effective key password
    pub fn effective_key_password(&self) -> Option<&str> {
        self.key_password.as_deref().or(self.password.as_deref())
    }
}

/// Signing configuration handed to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningConfig {
    pub keystore: KeyStore,
}

impl SigningConfig {
    pub fn new(keystore: KeyStore) -> Self {
        Self { keystore }
    }
}

/// Values read from a key-properties file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyProperties {
    pub key_alias: Option<String>,
    pub key_password: Option<String>,
    pub store_password: Option<String>,
    pub store_file: Option<String>,
}

impl KeyProperties {
    /// Parse Java properties content (escapes, continuations and every
    /// separator form included)
    pub fn parse(content: &str) -> Result<Self, PropertiesError> {
        let values = java_properties::read(content.as_bytes())?;

        let get = |key: &str| values.get(key).filter(|v| !v.trim().is_empty()).cloned();

        Ok(Self {
            key_alias: get("keyAlias"),
            key_password: get("keyPassword"),
            store_password: get("storePassword"),
            store_file: get("keyStoreFile").or_else(|| get("storeFile")),
        })
    }
}

/// Find `path` as given, relative to the Android project directory
/// (`<root>/android`), or relative to its parent. First existing candidate
/// wins.
pub fn find_valid_file(path: &str, project_dir: &Path) -> Option<PathBuf> {
    if path.trim().is_empty() {
        return None;
    }

    let mut candidates = vec![PathBuf::from(path), project_dir.join(path)];
    if let Some(parent) = project_dir.parent() {
        candidates.push(parent.join(path));
    }

    candidates.into_iter().find(|candidate| {
        debug!("Checking signing file candidate {:?}", candidate);
        candidate.is_file()
    })
}

/// Build the release signing config from a signing reference.
///
/// Returns `None` (with a warning) when any piece of the material is missing.
pub fn load_signing_config(reference: &SigningReference, project_dir: &Path) -> Option<SigningConfig> {
    let key_file = reference.key_file.as_deref().unwrap_or_default();
    let Some(properties_path) = find_valid_file(key_file, project_dir) else {
        warn!("Key properties file not found: '{}'. Skipping signing config.", key_file);
        return None;
    };

    let content = match std::fs::read_to_string(&properties_path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read {:?}: {}. Skipping signing config.", properties_path, e);
            return None;
        }
    };
    let properties = match KeyProperties::parse(&content) {
        Ok(properties) => properties,
        Err(e) => {
            warn!("Failed to parse {:?}: {}. Skipping signing config.", properties_path, e);
            return None;
        }
    };

    let store_file = properties
        .store_file
        .clone()
        .or_else(|| reference.keystore_file.clone())
        .unwrap_or_default();
    let Some(store_path) = find_valid_file(&store_file, project_dir) else {
        warn!("Keystore file not found: '{}'. Skipping signing config.", store_file);
        return None;
    };

    info!("Using keystore {:?} for release signing", store_path);
    let mut keystore = KeyStore::new(store_path);
    keystore.alias = properties.key_alias;
    keystore.key_password = properties.key_password;
    keystore.password = properties.store_password;

    Some(SigningConfig::new(keystore))
}
