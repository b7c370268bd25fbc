//! Variant and build type detection from the requested build commands

use flavorize_core::BuildType;
use serde::Serialize;

use crate::{BuildError, Result};

/// Variant and build type of the current invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub variant: String,
    pub build_type: BuildType,
}

/// First build type (in [`BuildType::ALL`] order) named by any command.
/// Defaults to debug.
pub fn detect_build_type<S: AsRef<str>>(commands: &[S]) -> BuildType {
    let commands: Vec<String> = commands.iter().map(|c| c.as_ref().to_lowercase()).collect();

    BuildType::ALL
        .into_iter()
        .find(|build_type| commands.iter().any(|c| c.contains(build_type.as_str())))
        .unwrap_or_default()
}

/// First known variant (in declaration order) named by any command
pub fn detect_variant<'a, S: AsRef<str>>(commands: &[S], known: &[&'a str]) -> Option<&'a str> {
    let commands: Vec<String> = commands.iter().map(|c| c.as_ref().to_lowercase()).collect();

    known.iter().copied().find(|name| {
        let name = name.to_lowercase();
        !name.is_empty() && commands.iter().any(|c| c.contains(&name))
    })
}

/// Detect the variant and build type of an invocation
pub fn detect<S: AsRef<str>>(commands: &[S], known: &[&str]) -> Result<Detection> {
    let variant = detect_variant(commands, known).ok_or_else(|| BuildError::NoVariantDetected {
        available: known.iter().map(|n| n.to_string()).collect(),
    })?;

    Ok(Detection {
        variant: variant.to_string(),
        build_type: detect_build_type(commands),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_release_variant() {
        let detection = detect(&["assembleBankingRelease"], &["banking", "shop"]).unwrap();
        assert_eq!(detection.variant, "banking");
        assert_eq!(detection.build_type, BuildType::Release);
    }

    #[test]
    fn test_debug_has_priority() {
        let commands = ["assembleShopRelease", "installShopDebug"];
        assert_eq!(detect_build_type(&commands), BuildType::Debug);
    }

    #[test]
    fn test_build_type_defaults_to_debug() {
        let detection = detect(&["bundleShop"], &["banking", "shop"]).unwrap();
        assert_eq!(detection.variant, "shop");
        assert_eq!(detection.build_type, BuildType::Debug);
    }

    #[test]
    fn test_profile_detected() {
        assert_eq!(detect_build_type(&["assembleShopProfile"]), BuildType::Profile);
    }

    #[test]
    fn test_first_declared_variant_wins() {
        let known = ["shopPlus", "shop"];
        assert_eq!(detect_variant(&["assembleShopPlusDebug"], &known), Some("shopPlus"));

        let known = ["shop", "shopPlus"];
        assert_eq!(detect_variant(&["assembleShopPlusDebug"], &known), Some("shop"));
    }

    #[test]
    fn test_no_match_is_error() {
        let err = detect(&["clean"], &["banking"]).unwrap_err();
        assert!(err.to_string().contains("banking"));

        let none: [&str; 0] = [];
        let err = detect(&["clean"], &none).unwrap_err();
        assert!(err.to_string().contains("None"));
    }
}
