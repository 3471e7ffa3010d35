//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::store::{
    BACKEND_COMPARISON_CAPACITY, CACHE_EVENT_CAPACITY, INVALIDATION_LOG_CAPACITY,
    TEST_RESULT_CAPACITY,
};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Address the HTTP server binds to
    pub server_host: String,
    /// HTTP server port
    pub server_port: u16,
    /// Clear requests kept for `/stats`
    pub invalidation_capacity: usize,
    /// Simulated cache events kept for `/savings`
    pub cache_event_capacity: usize,
    /// Test results kept for `/results`
    pub test_result_capacity: usize,
    /// Backend comparisons kept for `/backend-comparison`
    pub comparison_capacity: usize,
    /// Fixed seed for the traffic generator; random when unset
    pub simulation_seed: Option<u64>,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_HOST` - Bind address (default: 0.0.0.0)
    /// - `SERVER_PORT` - HTTP server port (default: 9000)
    /// - `INVALIDATION_LOG_CAPACITY` - Clear log size (default: 100)
    /// - `CACHE_EVENT_CAPACITY` - Cache event log size (default: 500)
    /// - `TEST_RESULT_CAPACITY` - Test result log size (default: 100)
    /// - `BACKEND_COMPARISON_CAPACITY` - Comparison log size (default: 200)
    /// - `SIMULATION_SEED` - Seed for reproducible traffic (default: unset)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_host: env_or("SERVER_HOST", defaults.server_host),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            invalidation_capacity: env_or("INVALIDATION_LOG_CAPACITY", defaults.invalidation_capacity),
            cache_event_capacity: env_or("CACHE_EVENT_CAPACITY", defaults.cache_event_capacity),
            test_result_capacity: env_or("TEST_RESULT_CAPACITY", defaults.test_result_capacity),
            comparison_capacity: env_or("BACKEND_COMPARISON_CAPACITY", defaults.comparison_capacity),
            simulation_seed: env::var("SIMULATION_SEED")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }

    /// Returns `host:port` for binding the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 9000,
            invalidation_capacity: INVALIDATION_LOG_CAPACITY,
            cache_event_capacity: CACHE_EVENT_CAPACITY,
            test_result_capacity: TEST_RESULT_CAPACITY,
            comparison_capacity: BACKEND_COMPARISON_CAPACITY,
            simulation_seed: None,
        }
    }
}
