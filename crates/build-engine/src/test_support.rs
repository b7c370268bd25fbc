//! Shared fixtures for unit tests

use std::path::PathBuf;

use flavorize_core::model::FlavorizeSpec;
use flavorize_core::ResolvedConfig;
use tempfile::TempDir;

pub const ANDROID_CONFIG: &str = r#"
debug:
  print_release_build_type_info: true
app:
  android:
    sdk:
      min_sdk: 23
      compile_sdk: 34
    release_build_types:
      minify_enabled: true
      ndk_abi_filters: [arm64-v8a]
      lint_check_release_builds: false
    default:
      id: com.x
      name: X
      version_name: 1.0.0
      version_code: 1
      gms_ads_id: ca-app-pub-1
      firebase:
        release:
          project_id: prod
          path: firebase/prod
        debug:
          path: firebase/dev
    flavor:
      banking:
        name: Bank
      shop:
        id_suffix: .shop
        name_suffix: " Shop"
        version_name_suffix: -shop
"#;

pub fn resolved(yaml: &str) -> ResolvedConfig {
    let spec: FlavorizeSpec = serde_yaml::from_str(yaml).unwrap();
    flavorize_core::resolve(&spec).unwrap()
}

/// A wrapper project on disk: `<root>/pubspec.yaml`, `<root>/flavorize.yaml`
/// and an empty `<root>/android/app` module.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new(yaml: &str) -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pubspec.yaml"), "name: x\n").unwrap();
        std::fs::write(dir.path().join("flavorize.yaml"), yaml).unwrap();
        std::fs::create_dir_all(dir.path().join("android").join("app")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    pub fn module_root(&self) -> PathBuf {
        self.dir.path().join("android").join("app")
    }

    /// Write a file relative to the project root
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }
}
