//! Configuration Module
//!
//! Handles loading and managing server configuration from environment
//! variables.

use std::env;

use crate::scoring::ScoringConfig;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Session lifetime in seconds
    pub session_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Band-heuristic tuning knobs
    pub scoring: ScoringConfig,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SESSION_TTL` - Session lifetime in seconds (default: 3600)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `MAX_SUBMISSION_CHARS` - Submission length cap (default: 20000)
    pub fn from_env() -> Self {
        let mut scoring = ScoringConfig::default();
        if let Some(max_chars) = env::var("MAX_SUBMISSION_CHARS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            scoring.max_input_chars = max_chars;
        }

        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            session_ttl: env::var("SESSION_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            scoring,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            session_ttl: 3600,
            cleanup_interval: 60,
            scoring: ScoringConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.session_ttl, 3600);
        assert_eq!(config.cleanup_interval, 60);
        assert_eq!(config.scoring.max_input_chars, 20_000);
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("SERVER_PORT");
        env::remove_var("SESSION_TTL");
        env::remove_var("CLEANUP_INTERVAL");
        env::remove_var("MAX_SUBMISSION_CHARS");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.session_ttl, 3600);
        assert_eq!(config.cleanup_interval, 60);
    }
}
