//! Runtime configuration
//!
//! Read from environment variables, falling back to defaults for anything
//! missing or unparsable.

use crate::navigator::dashboard::DashboardConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Database path that selects in-memory storage
pub const IN_MEMORY_DB: &str = ":memory:";

#[derive(Debug, Clone)]
pub struct NavigatorConfig {
    pub host: String,
    pub port: u16,
    /// SQLite file backing the profile store and activity timeline
    pub db_path: String,
    pub generation_delay: Duration,
    pub hours_per_week: u32,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            db_path: "learning_navigator.db".to_string(),
            generation_delay: Duration::from_millis(2000),
            hours_per_week: 10,
        }
    }
}

impl NavigatorConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; used by `from_env` and tests
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            db_path: lookup("NAVIGATOR_DB").unwrap_or(defaults.db_path),
            generation_delay: lookup("NAVIGATOR_GENERATION_DELAY_MS")
                .and_then(|ms| ms.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.generation_delay),
            hours_per_week: lookup("NAVIGATOR_HOURS_PER_WEEK")
                .and_then(|h| h.parse().ok())
                .unwrap_or(defaults.hours_per_week),
        }
    }

    pub fn in_memory(&self) -> bool {
        self.db_path == IN_MEMORY_DB
    }

    pub fn db_file(&self) -> PathBuf {
        PathBuf::from(&self.db_path)
    }

    pub fn dashboard(&self) -> DashboardConfig {
        DashboardConfig {
            generation_delay: self.generation_delay,
            hours_per_week: self.hours_per_week,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = NavigatorConfig::from_lookup(|_| None);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.generation_delay, Duration::from_secs(2));
        assert!(!config.in_memory());
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let vars: HashMap<&str, &str> = [
            ("PORT", "not-a-port"),
            ("NAVIGATOR_DB", ":memory:"),
            ("NAVIGATOR_GENERATION_DELAY_MS", "0"),
            ("NAVIGATOR_HOURS_PER_WEEK", "6"),
        ]
        .into_iter()
        .collect();
        let config = NavigatorConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.port, 8080);
        assert!(config.in_memory());
        assert!(config.dashboard().generation_delay.is_zero());
        assert_eq!(config.dashboard().hours_per_week, 6);
    }
}
