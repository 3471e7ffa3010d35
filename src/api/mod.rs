//! API Module
//!
//! HTTP handlers and routing for the mock LMCache controller API.
//!
//! # Endpoints
//! - `POST /clear` - Record a cache invalidation
//! - `POST /lookup` - Report a simulated cache layout
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Invalidation statistics
//! - `GET /savings` - Token cost savings dashboard
//! - `POST /simulate-traffic` - Generate synthetic cache traffic
//! - `GET|POST /results` - Test result intake and listing
//! - `GET|POST /backend-comparison` - Backend comparison intake and winners
//! - `GET /` - Endpoint listing

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
