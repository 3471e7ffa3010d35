//! Response DTOs for the mock API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::clock::local_timestamp;
use crate::store::savings::{LatencyReport, SavingsProjection, SavingsSummary};
use crate::store::{InvalidationRecord, PriceTable, ResultRecord, SavingsStats, WinnersByContext};

/// Service name reported by `/health`.
pub const SERVICE_NAME: &str = "lmcache-mock-api";

/// Simulated token count reported for every clear.
pub const CLEARED_TOKENS: u64 = 256;

/// Storage tier reported by `/lookup`.
pub const LOOKUP_LOCATION: &str = "LocalCPUBackend";

const SAVINGS_MESSAGE: &str = "Token anxiety? Cache hits = $0 input cost. This is the savings.";
const SIMULATION_MESSAGE: &str = "Traffic simulated. Check /savings for the dashboard.";

/// Response body for POST /clear
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub event_id: String,
    /// Simulated number of tokens released
    pub num_tokens: u64,
    pub message: String,
}

impl ClearResponse {
    /// Creates a ClearResponse, naming the document when one was given
    pub fn new(event_id: impl Into<String>, document_id: Option<i64>) -> Self {
        let message = match document_id {
            Some(id) if id != 0 => format!("Cache cleared for document {}", id),
            _ => "Cache cleared".to_string(),
        };
        Self {
            event_id: event_id.into(),
            num_tokens: CLEARED_TOKENS,
            message,
        }
    }
}

/// Response body for POST /lookup
///
/// `layout_info` maps an instance to `[location, token_count]`.
#[derive(Debug, Clone, Serialize)]
pub struct LookupResponse {
    pub event_id: String,
    pub layout_info: BTreeMap<String, (String, usize)>,
}

impl LookupResponse {
    pub fn new(event_id: impl Into<String>, token_count: usize) -> Self {
        let mut layout_info = BTreeMap::new();
        layout_info.insert(
            "default_instance".to_string(),
            (LOOKUP_LOCATION.to_string(), token_count),
        );
        Self {
            event_id: event_id.into(),
            layout_info,
        }
    }
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (always "healthy")
    pub status: String,
    pub service: String,
    /// Current local time in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            timestamp: local_timestamp(),
        }
    }
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub total_invalidations: usize,
    /// Most recent clears, oldest first
    pub recent_invalidations: Vec<InvalidationRecord>,
    pub timestamp: String,
}

/// Response body for GET /savings
#[derive(Debug, Clone, Serialize)]
pub struct SavingsResponse {
    pub summary: SavingsSummary,
    pub latency: LatencyReport,
    pub projections: SavingsProjection,
    pub token_pricing: PriceTable,
    pub message: String,
    pub timestamp: String,
}

impl SavingsResponse {
    /// Builds the dashboard from aggregated event statistics
    pub fn from_stats(stats: &SavingsStats) -> Self {
        Self {
            summary: stats.summary(),
            latency: stats.latency(),
            projections: stats.projections(),
            token_pricing: PriceTable,
            message: SAVINGS_MESSAGE.to_string(),
            timestamp: local_timestamp(),
        }
    }
}

/// Response body for POST /simulate-traffic
#[derive(Debug, Clone, Serialize)]
pub struct SimulateTrafficResponse {
    pub simulated_requests: u32,
    /// Events in the log after the batch was appended and trimmed
    pub total_events: usize,
    pub message: String,
}

impl SimulateTrafficResponse {
    pub fn new(simulated_requests: u32, total_events: usize) -> Self {
        Self {
            simulated_requests,
            total_events,
            message: SIMULATION_MESSAGE.to_string(),
        }
    }
}

/// Response body for POST /results
#[derive(Debug, Clone, Serialize)]
pub struct ResultReceivedResponse {
    pub status: String,
    pub total_results: usize,
}

impl ResultReceivedResponse {
    pub fn new(total_results: usize) -> Self {
        Self {
            status: "received".to_string(),
            total_results,
        }
    }
}

/// Response body for POST /backend-comparison
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReceivedResponse {
    pub status: String,
    pub total_comparisons: usize,
}

impl ComparisonReceivedResponse {
    pub fn new(total_comparisons: usize) -> Self {
        Self {
            status: "received".to_string(),
            total_comparisons,
        }
    }
}

/// Response body for GET /results
#[derive(Debug, Clone, Serialize)]
pub struct ResultsResponse {
    pub total_results: usize,
    pub results: Vec<ResultRecord>,
    pub timestamp: String,
}

/// Response body for GET /backend-comparison
#[derive(Debug, Clone, Serialize)]
pub struct BackendComparisonResponse {
    pub total_comparisons: usize,
    pub winners_by_context: WinnersByContext,
    pub recent_comparisons: Vec<ResultRecord>,
    pub timestamp: String,
}

/// Response body for GET /
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub endpoints: EndpointListing,
}

impl RootResponse {
    pub fn listing() -> Self {
        Self {
            message: "LMCache Mock API".to_string(),
            endpoints: EndpointListing,
        }
    }
}

/// Serializes [`ENDPOINTS`] as a JSON object in route order.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndpointListing;

impl Serialize for EndpointListing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ENDPOINTS.len()))?;
        for (route, purpose) in ENDPOINTS {
            map.serialize_entry(route, purpose)?;
        }
        map.end()
    }
}

/// Every route with a one-line purpose.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("POST /clear", "Clear cache entries (called on document changes)"),
    ("POST /lookup", "Lookup cache status"),
    ("GET /health", "Health check"),
    ("GET /stats", "View invalidation statistics"),
    ("GET /savings", "View token cost savings dashboard"),
    ("POST /simulate-traffic", "Simulate agent traffic for demo"),
    ("GET /results", "View aggregated test results"),
    ("POST /results", "Receive test results"),
    ("GET /backend-comparison", "View backend comparison summary"),
    ("POST /backend-comparison", "Receive backend comparison"),
];

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
