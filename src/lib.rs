//! LMCache Mock API - A stand-in for the LMCache controller
//!
//! Accepts cache clear and lookup calls, and reports simulated token savings
//! from bounded in-memory logs.

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::{create_router, AppState};
pub use config::Config;
