//! Savings Statistics Module
//!
//! Aggregates the cache-event log into hit/miss, latency and projected savings figures.

use serde::Serialize;

use crate::store::{CacheEvent, RingLog};

/// Monthly request volume assumed by the projection.
pub const PROJECTED_MONTHLY_REQUESTS: u64 = 100_000;
/// Average prompt size assumed by the projection.
pub const PROJECTED_AVG_INPUT_TOKENS: f64 = 12_000.0;
/// Blended input price per million tokens assumed by the projection.
pub const BLENDED_PRICE_PER_MILLION: f64 = 2.5;

pub const PROJECTION_NOTE: &str = "Based on current hit rate and average token usage";

// == Savings Stats ==
/// Raw aggregates over the current cache-event log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavingsStats {
    pub total_requests: usize,
    pub hits: usize,
    pub misses: usize,
    pub total_saved: f64,
    pub hit_latency_sum: u64,
    pub miss_latency_sum: u64,
}

impl SavingsStats {
    // == Aggregate ==
    /// Scans the whole log once per figure.
    pub fn from_log(log: &RingLog<CacheEvent>) -> Self {
        Self {
            total_requests: log.len(),
            hits: log.count_where(CacheEvent::is_hit),
            misses: log.count_where(CacheEvent::is_miss),
            total_saved: log.aggregate(|_| true, 0.0, |acc, e| acc + e.saved_dollars),
            hit_latency_sum: log.aggregate(CacheEvent::is_hit, 0, |acc, e| acc + e.latency_ms),
            miss_latency_sum: log.aggregate(CacheEvent::is_miss, 0, |acc, e| acc + e.latency_ms),
        }
    }

    /// Fraction of requests served from cache, in `[0, 1]`.
    pub fn hit_rate(&self) -> f64 {
        self.hits as f64 / self.total_requests.max(1) as f64
    }

    pub fn avg_hit_latency(&self) -> f64 {
        self.hit_latency_sum as f64 / self.hits.max(1) as f64
    }

    pub fn avg_miss_latency(&self) -> f64 {
        self.miss_latency_sum as f64 / self.misses.max(1) as f64
    }

    /// Percentage by which hits are faster than misses.
    pub fn latency_improvement(&self) -> f64 {
        (1.0 - self.avg_hit_latency() / self.avg_miss_latency().max(1.0)) * 100.0
    }

    /// Dollars saved per month at the assumed volume and the observed hit rate.
    pub fn projected_monthly_savings(&self) -> f64 {
        PROJECTED_MONTHLY_REQUESTS as f64 * self.hit_rate() * PROJECTED_AVG_INPUT_TOKENS
            / 1_000_000.0
            * BLENDED_PRICE_PER_MILLION
    }

    // == Report Sections ==
    pub fn summary(&self) -> SavingsSummary {
        SavingsSummary {
            total_requests: self.total_requests,
            cache_hits: self.hits,
            cache_misses: self.misses,
            hit_rate_percent: round_to(self.hit_rate() * 100.0, 1),
            total_saved_dollars: round_to(self.total_saved, 4),
        }
    }

    pub fn latency(&self) -> LatencyReport {
        LatencyReport {
            avg_hit_latency_ms: self.avg_hit_latency().round_ties_even() as u64,
            avg_miss_latency_ms: self.avg_miss_latency().round_ties_even() as u64,
            latency_improvement_percent: round_to(self.latency_improvement(), 1),
        }
    }

    pub fn projections(&self) -> SavingsProjection {
        SavingsProjection {
            monthly_requests: PROJECTED_MONTHLY_REQUESTS,
            projected_monthly_savings_dollars: round_to(self.projected_monthly_savings(), 2),
            note: PROJECTION_NOTE.to_string(),
        }
    }
}

/// Rounds to a fixed number of decimal places, halves to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

// == Report Sections ==
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsSummary {
    pub total_requests: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub hit_rate_percent: f64,
    pub total_saved_dollars: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencyReport {
    pub avg_hit_latency_ms: u64,
    pub avg_miss_latency_ms: u64,
    pub latency_improvement_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsProjection {
    pub monthly_requests: u64,
    pub projected_monthly_savings_dollars: f64,
    pub note: String,
}
