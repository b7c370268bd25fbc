//! Configuration data model

pub mod app;
pub mod section;
pub mod service;
pub mod spec;

use serde::{Deserialize, Deserializer};

pub use app::{
    AndroidApp, AppRecord, AuthConfig, AuthData, FastlaneAndroid, FastlaneIos, InAppSubscription,
    IosApp, SigningReference, WebApp, WindowsApp,
};
pub use section::{AndroidSdk, AndroidSection, PlatformSection, ReleaseBuildTypeOverrides, VariantOverride};
pub use service::{
    AndroidServiceEntry, IosServiceEntry, PlainServiceEntry, ServiceConfig, ServiceEntry,
    WebServiceEntry, WindowsServiceEntry,
};
pub use spec::{AppData, DebugFlags, FlavorizeSpec, GeneralSection};

/// An explicit `null` in the file reads as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
