//! # API Shared
//!
//! Shared definitions for the CareChain APIs.
//!
//! Contains:
//! - Request/response wire types (`wire` module), with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the `carechain` CLI so both speak the same JSON shapes.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
