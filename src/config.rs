//! Process-wide configuration.
//!
//! Supports YAML file and environment variable overrides. Decorator
//! behaviour (retry budget, backoff shape) lives here, not on the decorator
//! declarations: a declaration names a behaviour, configuration tunes it.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "SWITCHYARD_CONFIG";
/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
/// Environment variable for the tracing filter.
pub const LOG_ENV_VAR: &str = "SWITCHYARD_LOG";
/// Environment variable overriding the retry budget.
pub const MAX_RETRIES_ENV_VAR: &str = "SWITCHYARD_MAX_RETRIES";
/// Environment variable overriding the base retry delay (milliseconds).
pub const BASE_DELAY_ENV_VAR: &str = "SWITCHYARD_BASE_DELAY_MS";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Retry behaviour for the Retry decorator.
    pub retry: RetryConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file
    /// 3. Defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let mut config = if Path::new(&config_path).exists() {
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(max) = std::env::var(MAX_RETRIES_ENV_VAR) {
            if let Ok(n) = max.parse() {
                self.retry.max_retries = n;
            }
        }

        if let Ok(base) = std::env::var(BASE_DELAY_ENV_VAR) {
            if let Ok(ms) = base.parse() {
                self.retry.base_delay_ms = ms;
            }
        }
    }
}

/// Retry behaviour: bounded attempts with exponential backoff, cap, and jitter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (0 = no retries, just the initial attempt).
    pub max_retries: u32,
    /// Base delay for the first retry, in milliseconds (before jitter).
    pub base_delay_ms: u64,
    /// Maximum delay cap, in milliseconds (before jitter).
    pub max_delay_ms: u64,
    /// Jitter factor: delay is multiplied by a value in [1-jitter, 1+jitter].
    /// Set to 0.0 for no jitter.
    pub jitter: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 10,
            max_delay_ms: 2_000,
            jitter: 0.25,
        }
    }
}

impl RetryConfig {
    /// Check if another retry attempt should be made.
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }

    /// Calculate the delay for a given attempt number (0-indexed).
    ///
    /// Uses exponential backoff: delay = base * 2^attempt, capped at
    /// `max_delay_ms`. Jitter uses a time-based hash to avoid thundering herd.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponential_ms = self.base_delay_ms.saturating_mul(1u64 << attempt.min(20));
        let capped_ms = exponential_ms.min(self.max_delay_ms);

        let jittered_ms = if self.jitter > 0.0 {
            let now = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0) as u64;
            let hash = now.wrapping_mul(31).wrapping_add(attempt as u64 * 17);
            // hash % 1000 gives 0-999, normalized to [-1.0, 1.0]
            let jitter_pct = ((hash % 1000) as f64 / 1000.0) * 2.0 - 1.0;
            let jitter_factor = 1.0 + (jitter_pct * self.jitter);
            (capped_ms as f64 * jitter_factor) as u64
        } else {
            capped_ms
        };

        Duration::from_millis(jittered_ms)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.retry.base_delay_ms, 10);
        assert_eq!(config.retry.max_delay_ms, 2_000);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
retry:
  max_retries: 5
  base_delay_ms: 50
  max_delay_ms: 10000
  jitter: 0.0
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.retry.max_retries, 5);
        assert_eq!(config.retry.base_delay_ms, 50);
        assert_eq!(config.retry.jitter, 0.0);
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let yaml = r#"
retry:
  max_retries: 1
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.retry.max_retries, 1);
        assert_eq!(config.retry.base_delay_ms, 10);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "retry:\n  max_retries: 7").unwrap();

        let config = Config::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.retry.max_retries, 7);
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file("/nonexistent/config.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileRead(_, _)));
    }

    #[test]
    fn test_should_retry_respects_budget() {
        let config = RetryConfig {
            max_retries: 2,
            ..RetryConfig::default()
        };

        assert!(config.should_retry(0));
        assert!(config.should_retry(1));
        assert!(!config.should_retry(2));
        assert!(!config.should_retry(10));
    }

    #[test]
    fn test_delay_exponential_without_jitter() {
        let config = RetryConfig {
            base_delay_ms: 10,
            max_delay_ms: 2_000,
            jitter: 0.0,
            ..RetryConfig::default()
        };

        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(10));
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(20));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(40));
    }

    #[test]
    fn test_delay_caps_at_max() {
        let config = RetryConfig {
            base_delay_ms: 1_000,
            max_delay_ms: 3_000,
            jitter: 0.0,
            ..RetryConfig::default()
        };

        assert_eq!(config.delay_for_attempt(5), Duration::from_millis(3_000));
        assert_eq!(config.delay_for_attempt(30), Duration::from_millis(3_000));
    }

    #[test]
    fn test_delay_jitter_stays_in_band() {
        let config = RetryConfig {
            base_delay_ms: 100,
            max_delay_ms: 100,
            jitter: 0.25,
            ..RetryConfig::default()
        };

        for attempt in 0..10 {
            let ms = config.delay_for_attempt(attempt).as_millis() as u64;
            assert!((75..=125).contains(&ms), "delay {ms}ms outside jitter band");
        }
    }
}
