//! Store Module
//!
//! Bounded in-memory logs backing the mock API, plus the simulation and
//! aggregation logic that runs over them.

pub mod comparison;
pub mod pricing;
mod records;
mod ring;
pub mod savings;
pub mod simulator;


// Re-export public types
pub use comparison::{winners_by_context, ContextWinner, WinnersByContext};
pub use pricing::{ModelPricing, PriceTable, TOKEN_PRICING};
pub use records::{CacheEvent, EventType, InvalidationRecord, ResultRecord, SubmittedResult};
pub use ring::RingLog;
pub use savings::SavingsStats;
pub use simulator::{TrafficProfile, TrafficSimulator, SAMPLE_EVENT_COUNT};

// == Default Capacities ==
/// Clear requests retained for `/stats`
pub const INVALIDATION_LOG_CAPACITY: usize = 100;

/// Simulated cache events retained for `/savings`
pub const CACHE_EVENT_CAPACITY: usize = 500;

/// Test results retained for `/results`
pub const TEST_RESULT_CAPACITY: usize = 100;

/// Backend comparisons retained for `/backend-comparison`
pub const BACKEND_COMPARISON_CAPACITY: usize = 200;
