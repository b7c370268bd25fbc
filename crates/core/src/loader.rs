//! Configuration file discovery and parsing
//!
//! A wrapper project (a `pubspec.yaml` next to the root) keeps the file at
//! its root; a plain Android project keeps it under `android/`.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigurationError, Result};
use crate::model::FlavorizeSpec;

/// Configuration file name (YAML)
pub const SPEC_FILE_YAML: &str = "flavorize.yaml";

/// Configuration file name (TOML)
pub const SPEC_FILE_TOML: &str = "flavorize.toml";

/// Manifest that marks a multi-target wrapper project
pub const WRAPPER_MANIFEST: &str = "pubspec.yaml";

/// Project layout relative to the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectLayout {
    /// Multi-target wrapper (e.g. Flutter) with the Android module under `android/`
    Wrapper,
    /// Stand-alone Android project
    Native,
}

/// Detect the layout of the project rooted at `root_dir`
pub fn detect_layout(root_dir: &Path) -> ProjectLayout {
    if root_dir.join(WRAPPER_MANIFEST).exists() {
        ProjectLayout::Wrapper
    } else {
        ProjectLayout::Native
    }
}

/// Directory that should contain the configuration file
pub fn spec_dir(root_dir: &Path) -> PathBuf {
    match detect_layout(root_dir) {
        ProjectLayout::Wrapper => root_dir.to_path_buf(),
        ProjectLayout::Native => root_dir.join("android"),
    }
}

/// Locate the configuration file. YAML wins over TOML when both exist.
pub fn locate(root_dir: &Path) -> PathBuf {
    let dir = spec_dir(root_dir);
    let yaml = dir.join(SPEC_FILE_YAML);
    let toml = dir.join(SPEC_FILE_TOML);

    if !yaml.exists() && toml.exists() {
        toml
    } else {
        yaml
    }
}

/// Parse configuration content. The format follows the file extension.
pub fn parse(path: &Path, content: &str) -> Result<FlavorizeSpec> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(content).map_err(|source| ConfigurationError::YamlParse {
            path: path.to_path_buf(),
            source,
        }),
        "toml" => toml::from_str(content).map_err(|source| ConfigurationError::TomlParse {
            path: path.to_path_buf(),
            source,
        }),
        _ => Err(ConfigurationError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Load the configuration file at `path`.
///
/// A missing file is not an error: the feature is disabled and `None` is
/// returned. Malformed content is fatal.
pub fn load(path: &Path) -> Result<Option<FlavorizeSpec>> {
    if !path.exists() {
        warn!("Missing {} file at {}", SPEC_FILE_YAML, path.display());
        return Ok(None);
    }

    info!("Loading configuration from {:?}", path);
    let content = std::fs::read_to_string(path)?;
    let spec = parse(path, &content)?;
    debug!("Configuration enabled: {}", spec.enabled);
    Ok(Some(spec))
}

/// Locate and load the configuration for the project rooted at `root_dir`
pub fn load_project(root_dir: &Path) -> Result<Option<FlavorizeSpec>> {
    load(&locate(root_dir))
}
