//! API Handlers
//!
//! HTTP request handlers for each mock API endpoint.

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use tracing::{debug, info};

use crate::clock::{local_timestamp, EventIds};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    BackendComparisonResponse, ClearRequest, ClearResponse, ComparisonReceivedResponse,
    HealthResponse, LookupRequest, LookupResponse, ResultReceivedResponse, ResultsResponse,
    RootResponse, SavingsResponse, SimulateTrafficRequest, SimulateTrafficResponse,
    StatsResponse, SubmittedResult,
};
use crate::store::{
    winners_by_context, CacheEvent, InvalidationRecord, ResultRecord, RingLog, SavingsStats,
    TrafficProfile, TrafficSimulator, SAMPLE_EVENT_COUNT,
};

/// Clears returned by `/stats`
const RECENT_INVALIDATIONS: usize = 10;
/// Results returned by `GET /results`
const RECENT_RESULTS: usize = 20;
/// Raw comparisons returned by `GET /backend-comparison`
const RECENT_COMPARISONS: usize = 10;

/// Application state shared across all handlers.
///
/// Each log sits behind its own lock, so an append and the trim that
/// follows it are never observed half-done.
#[derive(Clone)]
pub struct AppState {
    /// Clear requests
    pub invalidations: Arc<RwLock<RingLog<InvalidationRecord>>>,
    /// Simulated cache traffic
    pub cache_events: Arc<RwLock<RingLog<CacheEvent>>>,
    /// Submitted test results
    pub test_results: Arc<RwLock<RingLog<ResultRecord>>>,
    /// Submitted backend comparisons
    pub comparisons: Arc<RwLock<RingLog<ResultRecord>>>,
    /// Random source for synthetic traffic
    pub simulator: Arc<Mutex<TrafficSimulator>>,
    /// Event id generator
    pub event_ids: Arc<EventIds>,
}

impl AppState {
    /// Creates a new AppState around the given logs and simulator.
    pub fn new(
        invalidations: RingLog<InvalidationRecord>,
        cache_events: RingLog<CacheEvent>,
        test_results: RingLog<ResultRecord>,
        comparisons: RingLog<ResultRecord>,
        simulator: TrafficSimulator,
    ) -> Self {
        Self {
            invalidations: Arc::new(RwLock::new(invalidations)),
            cache_events: Arc::new(RwLock::new(cache_events)),
            test_results: Arc::new(RwLock::new(test_results)),
            comparisons: Arc::new(RwLock::new(comparisons)),
            simulator: Arc::new(Mutex::new(simulator)),
            event_ids: Arc::new(EventIds::new()),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Sizes each log and seeds the simulator from the Config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            RingLog::new(config.invalidation_capacity),
            RingLog::new(config.cache_event_capacity),
            RingLog::new(config.test_result_capacity),
            RingLog::new(config.comparison_capacity),
            TrafficSimulator::new(config.simulation_seed),
        )
    }

    // == Clear ==
    /// Logs a clear request and returns the stored record.
    pub async fn record_clear(&self, req: ClearRequest) -> InvalidationRecord {
        let record = InvalidationRecord {
            event_id: self.event_ids.mint("Clear"),
            timestamp: local_timestamp(),
            instance_id: req.instance_id,
            location: req.location,
            document_id: req.document_id,
            reason: req.reason,
        };

        self.invalidations.write().await.record(record.clone());
        record
    }

    // == Savings ==
    /// Seeds sample traffic into an empty event log, then aggregates it.
    ///
    /// The emptiness check and the seeding share one write lock, so
    /// concurrent first reads seed exactly once.
    pub async fn savings_stats(&self) -> SavingsStats {
        let mut events = self.cache_events.write().await;
        if events.is_empty() {
            let sample = self
                .simulator
                .lock()
                .await
                .generate(&TrafficProfile::sample(), SAMPLE_EVENT_COUNT);
            events.record_all(sample);
            info!(events = events.len(), "Seeded empty event log with sample traffic");
        }

        SavingsStats::from_log(&events)
    }

    // == Simulate ==
    /// Appends `count` swarm events and returns the resulting log size.
    pub async fn simulate_traffic(&self, count: usize) -> usize {
        let mut events = self.cache_events.write().await;
        let batch = self
            .simulator
            .lock()
            .await
            .generate(&TrafficProfile::swarm(), count);
        let evicted = events.record_all(batch);
        debug!(count, evicted, "Simulated traffic batch");
        events.len()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Handler for POST /clear
///
/// Records an invalidation and reports a simulated token count.
pub async fn clear_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ClearRequest>, JsonRejection>,
) -> Result<Json<ClearResponse>> {
    let Json(req) = payload?;
    let record = state.record_clear(req).await;

    info!(
        event_id = %record.event_id,
        instance_id = ?record.instance_id,
        location = ?record.location,
        document_id = ?record.document_id,
        reason = ?record.reason,
        "Cache clear"
    );

    Ok(Json(ClearResponse::new(record.event_id, record.document_id)))
}

/// Handler for POST /lookup
///
/// Reports a fixed layout sized to the requested tokens.
pub async fn lookup_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LookupRequest>, JsonRejection>,
) -> Result<Json<LookupResponse>> {
    let Json(req) = payload?;
    let event_id = state.event_ids.mint("Lookup");

    Ok(Json(LookupResponse::new(event_id, req.tokens.len())))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /stats
///
/// Returns the invalidation count and the most recent clears.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let log = state.invalidations.read().await;

    Json(StatsResponse {
        total_invalidations: log.len(),
        recent_invalidations: log.recent(RECENT_INVALIDATIONS).into_iter().cloned().collect(),
        timestamp: local_timestamp(),
    })
}

/// Handler for GET /savings
///
/// Returns the token savings dashboard, seeding sample traffic on first use.
pub async fn savings_handler(State(state): State<AppState>) -> Json<SavingsResponse> {
    let stats = state.savings_stats().await;
    Json(SavingsResponse::from_stats(&stats))
}

/// Handler for POST /simulate-traffic
///
/// Takes the batch size from `?requests=N` or a `{"requests": N}` body.
pub async fn simulate_traffic_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<SimulateTrafficRequest>, QueryRejection>,
    body: Bytes,
) -> Result<Json<SimulateTrafficResponse>> {
    let Query(query) = query?;
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        Some(
            serde_json::from_slice::<SimulateTrafficRequest>(&body)
                .map_err(|e| ApiError::InvalidRequest(e.to_string()))?,
        )
    };

    let requests = SimulateTrafficRequest::resolve(query, body);
    if let Some(error_msg) = SimulateTrafficRequest::validate(requests) {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let total_events = state.simulate_traffic(requests as usize).await;
    info!(requests, total_events, "Traffic simulated");

    Ok(Json(SimulateTrafficResponse::new(requests, total_events)))
}

/// Handler for POST /results
pub async fn submit_result_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SubmittedResult>, JsonRejection>,
) -> Result<Json<ResultReceivedResponse>> {
    let Json(result) = payload?;
    info!(
        cache_hit_rate = ?result.cache_hit_rate,
        monthly_savings_100k = ?result.monthly_savings_100k,
        "Received test result"
    );

    let mut log = state.test_results.write().await;
    log.record(ResultRecord::received(result));

    Ok(Json(ResultReceivedResponse::new(log.len())))
}

/// Handler for GET /results
pub async fn results_handler(State(state): State<AppState>) -> Json<ResultsResponse> {
    let log = state.test_results.read().await;

    Json(ResultsResponse {
        total_results: log.len(),
        results: log.recent(RECENT_RESULTS).into_iter().cloned().collect(),
        timestamp: local_timestamp(),
    })
}

/// Handler for POST /backend-comparison
pub async fn submit_comparison_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SubmittedResult>, JsonRejection>,
) -> Result<Json<ComparisonReceivedResponse>> {
    let Json(result) = payload?;
    info!(
        backend = ?result.backend,
        performance_score = ?result.performance_score,
        rank_note = ?result.rank_note,
        "Received backend comparison"
    );

    let mut log = state.comparisons.write().await;
    log.record(ResultRecord::received(result));

    Ok(Json(ComparisonReceivedResponse::new(log.len())))
}

/// Handler for GET /backend-comparison
///
/// Reports the lowest-scoring backend for each context size.
pub async fn backend_comparison_handler(
    State(state): State<AppState>,
) -> Json<BackendComparisonResponse> {
    let log = state.comparisons.read().await;

    Json(BackendComparisonResponse {
        total_comparisons: log.len(),
        winners_by_context: winners_by_context(&log),
        recent_comparisons: log.recent(RECENT_COMPARISONS).into_iter().cloned().collect(),
        timestamp: local_timestamp(),
    })
}

/// Handler for GET /
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse::listing())
}
