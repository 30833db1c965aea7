//! Environment lookup used by the section overlays.
//!
//! Sections never call `std::env` directly; they read through an
//! [`EnvSource`] so the same overlay code runs against the process
//! environment or against a plain map.

use crate::error::{ArlNetError, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

/// Set this to skip `.env` loading (tests, containers with injected env).
pub const DOTENV_DISABLED_VAR: &str = "ARL_NET_DOTENV_DISABLED";

pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| v.to_string())
    }
}

/// Overwrite `target` with the parsed value of `key` when it is set.
///
/// Unset variables leave `target` untouched. A value that does not parse is
/// an error rather than a silent fallback to the default.
pub fn override_parsed<T>(env: &dyn EnvSource, key: &str, target: &mut T) -> Result<()>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = env.var(key) else {
        return Ok(());
    };
    let parsed = raw.trim().parse::<T>().map_err(|e| ArlNetError::InvalidEnv {
        key: key.to_string(),
        value: raw.clone(),
        reason: e.to_string(),
    })?;
    log::debug!("{} overridden from environment", key);
    *target = parsed;
    Ok(())
}

/// String fields take the raw value; an empty variable still counts as set.
pub fn override_string(env: &dyn EnvSource, key: &str, target: &mut String) {
    if let Some(raw) = env.var(key) {
        log::debug!("{} overridden from environment", key);
        *target = raw;
    }
}

pub fn override_path(env: &dyn EnvSource, key: &str, target: &mut PathBuf) {
    if let Some(raw) = env.var(key) {
        log::debug!("{} overridden from environment", key);
        *target = PathBuf::from(raw);
    }
}

/// Load `.env` from the working directory into the process environment.
///
/// Returns whether a file was loaded. Variables already present in the
/// environment win over the file.
pub fn load_dotenv() -> Result<bool> {
    if std::env::var_os(DOTENV_DISABLED_VAR).is_some() {
        log::debug!("{} set, skipping .env", DOTENV_DISABLED_VAR);
        return Ok(false);
    }
    match dotenvy::dotenv() {
        Ok(path) => {
            log::debug!("Loaded environment from {}", path.display());
            Ok(true)
        }
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(ArlNetError::Configuration(format!(
            "Failed to load .env: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_unset_key_leaves_target() {
        let mut value = 0.5_f64;
        override_parsed(&env(&[]), "RL_GAMMA", &mut value).unwrap();
        assert_eq!(value, 0.5);
    }

    #[test]
    fn test_value_is_trimmed_before_parse() {
        let mut value = 0_usize;
        override_parsed(&env(&[("RL_BUFFER_SIZE", " 2048 ")]), "RL_BUFFER_SIZE", &mut value)
            .unwrap();
        assert_eq!(value, 2048);
    }

    #[test]
    fn test_unparsable_value_is_error() {
        let mut value = 64_usize;
        let err = override_parsed(&env(&[("RL_BATCH_SIZE", "-3")]), "RL_BATCH_SIZE", &mut value)
            .unwrap_err();
        assert!(matches!(err, ArlNetError::InvalidEnv { ref key, .. } if key == "RL_BATCH_SIZE"));
        assert_eq!(value, 64);
    }

    #[test]
    fn test_empty_string_override_is_kept() {
        let mut value = "arl-net-default".to_string();
        override_string(&env(&[("FIREBASE_PROJECT_ID", "")]), "FIREBASE_PROJECT_ID", &mut value);
        assert_eq!(value, "");
    }
}
