//! Field-level merge policy
//!
//! A variant value wins when present; otherwise the platform default is used.
//! Nested records merge field by field through [`Merge`].

/// Override-if-present, else inherit the default.
pub fn merge_field<T: Clone>(value: &Option<T>, fallback: &Option<T>) -> Option<T> {
    value.as_ref().or(fallback.as_ref()).cloned()
}

/// Merge a nested record. A missing override takes the default's whole record.
pub fn merge_nested<T: Merge + Clone>(value: &Option<T>, fallback: &Option<T>) -> Option<T> {
    match (value, fallback) {
        (Some(value), Some(fallback)) => Some(value.merge_with(fallback)),
        (Some(value), None) => Some(value.clone()),
        (None, fallback) => fallback.clone(),
    }
}

/// Suffixes are never inherited: an unset suffix means no suffix.
pub fn suffix(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Record that can be merged against a fallback of the same shape
pub trait Merge {
    fn merge_with(&self, fallback: &Self) -> Self;
}
