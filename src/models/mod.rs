//! Request and Response models for the mock API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use crate::store::SubmittedResult;
pub use requests::{ClearRequest, LookupRequest, SimulateTrafficRequest};
pub use responses::{
    BackendComparisonResponse, ClearResponse, ComparisonReceivedResponse, ErrorResponse,
    HealthResponse, LookupResponse, ResultReceivedResponse, ResultsResponse, RootResponse,
    SavingsResponse, SimulateTrafficResponse, StatsResponse,
};
