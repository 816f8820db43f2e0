//! Configuration access for the registration procedure.
//!
//! Registration reads a handful of environment-style keys through the narrow
//! [`ConfigSource`] interface, so hosts can back it with whatever
//! configuration system they already use. [`EnvConfig`] is the default,
//! reading process environment variables.

use std::collections::HashMap;

/// Read-only key-value configuration source.
pub trait ConfigSource: Send + Sync {
    /// Get a configuration value by key.
    ///
    /// Returns `None` if the key is unset.
    fn get(&self, key: &str) -> Option<String>;
}

/// Configuration source backed by process environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfig;

impl ConfigSource for EnvConfig {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory configuration source.
///
/// For hosts that assemble configuration by hand, and for tests.
#[derive(Debug, Clone, Default)]
pub struct MapConfig {
    values: HashMap<String, String>,
}

impl MapConfig {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, replacing any existing one.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigSource for MapConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Parse a boolean-style flag value.
///
/// Accepts `true`/`false` in any casing after trimming; anything else
/// (including an empty string) is `None`.
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_config_reads_process_environment() {
        std::env::set_var("MONITORING_CLIENT_TEST_KEY", "from-env");
        assert_eq!(
            EnvConfig.get("MONITORING_CLIENT_TEST_KEY").as_deref(),
            Some("from-env")
        );
        assert_eq!(EnvConfig.get("MONITORING_CLIENT_TEST_UNSET"), None);
        std::env::remove_var("MONITORING_CLIENT_TEST_KEY");
    }

    #[test]
    fn test_map_config_returns_only_known_keys() {
        let config = MapConfig::new().with("MyMonitoringName", "billing-api");
        assert_eq!(config.get("MyMonitoringName").as_deref(), Some("billing-api"));
        assert_eq!(config.get("MyMonitoringUrl"), None);
    }

    #[test]
    fn test_parse_flag_accepts_any_casing() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag("True"), Some(true));
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" false "), Some(false));
    }

    #[test]
    fn test_parse_flag_rejects_everything_else() {
        assert_eq!(parse_flag(""), None);
        assert_eq!(parse_flag("1"), None);
        assert_eq!(parse_flag("yes"), None);
        assert_eq!(parse_flag("disabled"), None);
    }
}
