//! Configuration for pysetup
//!
//! All configuration is read from environment variables or CLI arguments.
//! No global configuration file is used.
//!
//! Environment variable keys are centralized here for consistency.

use std::env;
use std::sync::OnceLock;

/// Environment variable key constants.
/// Use these when reading env vars to avoid typos and enable refactoring.
pub mod env_keys {
    pub const PYSETUP_VENV_DIR: &str = "PYSETUP_VENV_DIR";
    pub const PYSETUP_QUIET: &str = "PYSETUP_QUIET";
    pub const PYSETUP_LOG_LEVEL: &str = "PYSETUP_LOG_LEVEL";
    pub const PYSETUP_LOG_JSON: &str = "PYSETUP_LOG_JSON";
    pub const PYSETUP_AUDIT_LOG: &str = "PYSETUP_AUDIT_LOG";
}

/// Read an env var, using `default` when unset or empty.
pub fn env_or<F>(key: &str, default: F) -> String
where
    F: FnOnce() -> String,
{
    env::var(key)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(default)
}

/// Read an env var as `Option` (empty value treated as unset).
pub fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|s| {
        let s = s.trim().to_string();
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    })
}

/// Parse a boolean env var: 0/false/no/off are false, any other value is true.
pub fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key).as_deref() {
        Ok(s) => !matches!(
            s.trim().to_lowercase().as_str(),
            "0" | "false" | "no" | "off"
        ),
        Err(_) => default,
    }
}

/// Observability configuration: quiet, log_level, log_json, audit_log.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
    pub audit_log: Option<String>,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| Self {
            quiet: env_bool(env_keys::PYSETUP_QUIET, false),
            log_level: env_or(env_keys::PYSETUP_LOG_LEVEL, || "pysetup=info".to_string()),
            log_json: env_bool(env_keys::PYSETUP_LOG_JSON, false),
            audit_log: env_optional(env_keys::PYSETUP_AUDIT_LOG),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses a unique key so parallel test threads never race on env state.

    #[test]
    fn test_env_or_default_when_unset() {
        let v = env_or("PYSETUP_TEST_ENV_OR_UNSET", || "fallback".to_string());
        assert_eq!(v, "fallback");
    }

    #[test]
    fn test_env_or_reads_value() {
        env::set_var("PYSETUP_TEST_ENV_OR_SET", "value");
        let v = env_or("PYSETUP_TEST_ENV_OR_SET", || "fallback".to_string());
        assert_eq!(v, "value");
    }

    #[test]
    fn test_env_optional_empty_is_none() {
        env::set_var("PYSETUP_TEST_ENV_OPT_EMPTY", "   ");
        assert_eq!(env_optional("PYSETUP_TEST_ENV_OPT_EMPTY"), None);
    }

    #[test]
    fn test_env_bool_values() {
        assert!(env_bool("PYSETUP_TEST_BOOL_UNSET", true));
        assert!(!env_bool("PYSETUP_TEST_BOOL_UNSET", false));

        env::set_var("PYSETUP_TEST_BOOL_OFF", "off");
        assert!(!env_bool("PYSETUP_TEST_BOOL_OFF", true));

        env::set_var("PYSETUP_TEST_BOOL_ONE", "1");
        assert!(env_bool("PYSETUP_TEST_BOOL_ONE", false));
    }
}
