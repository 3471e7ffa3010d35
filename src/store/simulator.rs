//! Traffic Simulator Module
//!
//! Generates synthetic cache events for the savings dashboard.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::clock::local_timestamp;
use crate::store::pricing::saved_dollars;
use crate::store::{CacheEvent, EventType};

// == Traffic Profile ==
/// Distribution parameters for one kind of synthetic workload.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficProfile {
    /// Models drawn uniformly
    pub models: &'static [&'static str],
    /// Probability that a request is a cache hit
    pub hit_probability: f64,
    pub input_tokens: RangeInclusive<u64>,
    pub hit_latency_ms: RangeInclusive<u64>,
    pub miss_latency_ms: RangeInclusive<u64>,
}

/// Number of events seeded into an empty log before the first savings report.
pub const SAMPLE_EVENT_COUNT: usize = 20;

impl TrafficProfile {
    /// Typical agent workload used to seed an empty dashboard.
    pub fn sample() -> Self {
        Self {
            models: &["claude-3-5-sonnet", "gpt-4o", "gpt-4o-mini"],
            hit_probability: 0.70,
            input_tokens: 5_000..=20_000,
            hit_latency_ms: 100..=300,
            miss_latency_ms: 2_000..=4_000,
        }
    }

    /// Agent swarm traffic for `/simulate-traffic`.
    pub fn swarm() -> Self {
        Self {
            models: &["claude-3-5-sonnet", "gpt-4o", "gpt-4o-mini", "llama-3.1-70b"],
            hit_probability: 0.75,
            input_tokens: 5_000..=25_000,
            hit_latency_ms: 80..=250,
            miss_latency_ms: 1_800..=4_500,
        }
    }
}

// == Traffic Simulator ==
/// Random event generator.
#[derive(Debug)]
pub struct TrafficSimulator {
    rng: StdRng,
}

impl TrafficSimulator {
    /// Creates a simulator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a reproducible simulator.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a simulator from an optional seed.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    // == Generate ==
    /// Draws one synthetic event from `profile`.
    pub fn next_event(&mut self, profile: &TrafficProfile) -> CacheEvent {
        let model = profile
            .models
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("unknown");
        let hit = self.rng.gen_bool(profile.hit_probability);
        let input_tokens = self.rng.gen_range(profile.input_tokens.clone());
        let latency_ms = if hit {
            self.rng.gen_range(profile.hit_latency_ms.clone())
        } else {
            self.rng.gen_range(profile.miss_latency_ms.clone())
        };

        CacheEvent {
            event_type: if hit { EventType::Hit } else { EventType::Miss },
            model: model.to_string(),
            input_tokens,
            latency_ms,
            saved_dollars: saved_dollars(model, input_tokens, hit),
            timestamp: local_timestamp(),
        }
    }

    /// Draws `count` events from `profile`.
    pub fn generate(&mut self, profile: &TrafficProfile, count: usize) -> Vec<CacheEvent> {
        (0..count).map(|_| self.next_event(profile)).collect()
    }
}
