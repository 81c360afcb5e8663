//! Application configuration loaded from environment variables.

use std::time::Duration;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `APP_ENV`, then `NODE_ENV` — environment name (default: `"development"`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `SHUTDOWN_TIMEOUT_SECS` — upper bound on graceful shutdown (default: none)
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    pub shutdown_timeout: Option<Duration>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
            environment: lookup("APP_ENV")
                .filter(|env| !env.is_empty())
                .or_else(|| lookup("NODE_ENV").filter(|env| !env.is_empty()))
                .unwrap_or(defaults.environment),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            shutdown_timeout: lookup("SHUTDOWN_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(Duration::from_secs),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            shutdown_timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, "development");
        assert_eq!(config.log_level, "info");
        assert!(config.shutdown_timeout.is_none());
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("APP_ENV", "production"),
            ("SHUTDOWN_TIMEOUT_SECS", "15"),
        ]));
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.environment, "production");
        assert_eq!(config.shutdown_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_node_env_is_fallback_for_environment() {
        let config = Config::from_lookup(lookup_from(&[("NODE_ENV", "staging")]));
        assert_eq!(config.environment, "staging");

        let config = Config::from_lookup(lookup_from(&[
            ("NODE_ENV", "staging"),
            ("APP_ENV", "test"),
        ]));
        assert_eq!(config.environment, "test");
    }

    #[test]
    fn test_empty_app_env_falls_through_to_node_env() {
        let config = Config::from_lookup(lookup_from(&[("APP_ENV", ""), ("NODE_ENV", "staging")]));
        assert_eq!(config.environment, "staging");

        let config = Config::from_lookup(lookup_from(&[("APP_ENV", ""), ("NODE_ENV", "")]));
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_invalid_port_falls_back_to_default() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "not-a-port")]));
        assert_eq!(config.port, 3000);

        let config = Config::from_lookup(lookup_from(&[("PORT", "70000")]));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_addr_default() {
        let config = Config::default();
        assert_eq!(config.addr(), "0.0.0.0:3000");
    }
}
