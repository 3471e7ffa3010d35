//! Request DTOs for the mock API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

/// Largest traffic batch a single `/simulate-traffic` call may generate.
pub const MAX_SIMULATED_REQUESTS: u32 = 10_000;

/// Batch size used when the caller does not give one.
pub const DEFAULT_SIMULATED_REQUESTS: u32 = 50;

fn default_instance_id() -> Option<String> {
    Some("default".to_string())
}

fn default_location() -> Option<String> {
    Some("LocalCPUBackend".to_string())
}

/// Request body for POST /clear
///
/// # Fields
/// - `instance_id`: Cache instance to clear (default: "default")
/// - `location`: Storage tier label (default: "LocalCPUBackend")
/// - `document_id`: Document whose change triggered the clear
/// - `reason`: Free-text reason
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClearRequest {
    #[serde(default = "default_instance_id")]
    pub instance_id: Option<String>,
    #[serde(default = "default_location")]
    pub location: Option<String>,
    #[serde(default)]
    pub document_id: Option<i64>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Default for ClearRequest {
    fn default() -> Self {
        Self {
            instance_id: default_instance_id(),
            location: default_location(),
            document_id: None,
            reason: None,
        }
    }
}

/// Request body for POST /lookup
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LookupRequest {
    /// Token ids to look up
    #[serde(default)]
    pub tokens: Vec<i64>,
}

/// Batch size for POST /simulate-traffic, from the query string or a JSON body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct SimulateTrafficRequest {
    #[serde(default)]
    pub requests: Option<u32>,
}

impl SimulateTrafficRequest {
    /// Picks the batch size: query first, then body, then the default.
    pub fn resolve(query: Self, body: Option<Self>) -> u32 {
        query
            .requests
            .or_else(|| body.and_then(|b| b.requests))
            .unwrap_or(DEFAULT_SIMULATED_REQUESTS)
    }

    /// Validates a resolved batch size
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(requests: u32) -> Option<String> {
        if requests > MAX_SIMULATED_REQUESTS {
            return Some(format!(
                "requests exceeds maximum of {}",
                MAX_SIMULATED_REQUESTS
            ));
        }
        None
    }
}
