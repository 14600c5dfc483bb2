//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handling never reads environment variables; binaries
//! resolve them into a `CoreConfig` before the interaction table is built.

use crate::constants::DEFAULT_DRUG_INTERACTIONS_FILE;
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    dataset_path: PathBuf,
    demo_fallback: bool,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if `dataset_path` is empty.
    pub fn new(dataset_path: PathBuf, demo_fallback: bool) -> CoreResult<Self> {
        if dataset_path.as_os_str().is_empty() {
            return Err(CoreError::InvalidInput(
                "dataset path cannot be empty".into(),
            ));
        }

        Ok(Self {
            dataset_path,
            demo_fallback,
        })
    }

    /// Location of the interaction CSV.
    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    /// Whether a flagged demonstration result is added when no real interaction is found.
    pub fn demo_fallback(&self) -> bool {
        self.demo_fallback
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DRUG_INTERACTIONS_FILE),
            demo_fallback: false,
        }
    }
}

/// Resolve the dataset path from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default dataset location.
pub fn dataset_path_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DRUG_INTERACTIONS_FILE))
}

/// Parse the demonstration-fallback switch from an optional string value.
///
/// If `value` is `None` or empty/whitespace, the fallback is disabled.
///
/// # Errors
///
/// Returns `CoreError::InvalidInput` for anything other than `true`/`false`, `1`/`0`, `yes`/`no`.
pub fn demo_fallback_from_env_value(value: Option<String>) -> CoreResult<bool> {
    let value = value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty());

    match value.as_deref() {
        None => Ok(false),
        Some("true" | "1" | "yes") => Ok(true),
        Some("false" | "0" | "no") => Ok(false),
        Some(other) => Err(CoreError::InvalidInput(format!(
            "CARECHAIN_DEMO_FALLBACK must be true or false, got {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_config_rejects_empty_dataset_path() {
        let err = CoreConfig::new(PathBuf::new(), false).expect_err("should reject empty path");
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("cannot be empty")));
    }

    #[test]
    fn test_dataset_path_defaults_when_unset_or_blank() {
        assert_eq!(
            dataset_path_from_env_value(None),
            PathBuf::from(DEFAULT_DRUG_INTERACTIONS_FILE)
        );
        assert_eq!(
            dataset_path_from_env_value(Some("  ".into())),
            PathBuf::from(DEFAULT_DRUG_INTERACTIONS_FILE)
        );
        assert_eq!(
            dataset_path_from_env_value(Some(" data/ddi.csv ".into())),
            PathBuf::from("data/ddi.csv")
        );
    }

    #[test]
    fn test_demo_fallback_parses_switch_values() {
        assert!(!demo_fallback_from_env_value(None).unwrap());
        assert!(demo_fallback_from_env_value(Some("TRUE".into())).unwrap());
        assert!(demo_fallback_from_env_value(Some("1".into())).unwrap());
        assert!(!demo_fallback_from_env_value(Some("no".into())).unwrap());
    }

    #[test]
    fn test_demo_fallback_rejects_unknown_values() {
        let err = demo_fallback_from_env_value(Some("sometimes".into()))
            .expect_err("should reject unknown switch");
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("sometimes")));
    }
}
