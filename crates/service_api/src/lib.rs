//! REST API server for the precio pricing calculator
//!
//! This crate exposes the pricing engine and the tenant store over HTTP:
//! cost analysis, organization provisioning, profile management, product
//! snapshots, dashboard totals, and the session-readiness gate used during
//! onboarding.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod session;

// Re-export the pricing stack for embedding
pub use infra_store;
pub use precio_core;
pub use precio_engine;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
