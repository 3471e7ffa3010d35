//! Record Types Module
//!
//! Entries kept in the in-memory logs.

use serde::{Deserialize, Serialize};

use crate::clock::local_timestamp;

// == Invalidation Record ==
/// One cache clear request, as logged for `/stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidationRecord {
    pub event_id: String,
    pub timestamp: String,
    pub instance_id: Option<String>,
    pub location: Option<String>,
    pub document_id: Option<i64>,
    pub reason: Option<String>,
}

// == Cache Event ==
/// Outcome of a simulated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Hit,
    Miss,
}

/// A simulated request served (or not) from cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheEvent {
    pub event_type: EventType,
    pub model: String,
    pub input_tokens: u64,
    pub latency_ms: u64,
    pub saved_dollars: f64,
    pub timestamp: String,
}

impl CacheEvent {
    pub fn is_hit(&self) -> bool {
        self.event_type == EventType::Hit
    }

    pub fn is_miss(&self) -> bool {
        self.event_type == EventType::Miss
    }
}

// == Submitted Result ==
fn default_backend() -> Option<String> {
    Some("default".to_string())
}

/// Performance metrics pushed by an external test pipeline.
///
/// Used for both `/results` and `/backend-comparison`. Every field is
/// optional; `backend` defaults to `"default"` when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedResult {
    #[serde(default = "default_backend")]
    pub backend: Option<String>,
    #[serde(default)]
    pub context_size: Option<i64>,
    #[serde(default)]
    pub cache_hit_rate: Option<f64>,
    #[serde(default)]
    pub avg_ttft_ms: Option<f64>,
    #[serde(default)]
    pub throughput: Option<f64>,
    #[serde(default)]
    pub cost_per_request: Option<f64>,
    #[serde(default)]
    pub savings_per_request: Option<f64>,
    #[serde(default)]
    pub monthly_savings_100k: Option<f64>,
    #[serde(default)]
    pub performance_score: Option<f64>,
    #[serde(default)]
    pub rank_note: Option<String>,
    #[serde(default)]
    pub source_file: Option<String>,
}

impl Default for SubmittedResult {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            context_size: None,
            cache_hit_rate: None,
            avg_ttft_ms: None,
            throughput: None,
            cost_per_request: None,
            savings_per_request: None,
            monthly_savings_100k: None,
            performance_score: None,
            rank_note: None,
            source_file: None,
        }
    }
}

/// A submitted result stamped with its arrival time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    #[serde(flatten)]
    pub result: SubmittedResult,
    pub received_at: String,
}

impl ResultRecord {
    /// Stamps a submission with the current local time.
    pub fn received(result: SubmittedResult) -> Self {
        Self {
            result,
            received_at: local_timestamp(),
        }
    }
}
