//! Route modules for the precio API server
//!
//! This module contains endpoint group-specific routers:
//! - analysis: Cost analysis endpoint
//! - organizations: Provisioning, profile, and dashboard endpoints
//! - products: Saved product snapshot endpoints
//! - sessions: Session-readiness gate endpoints
//! - health: Health check and monitoring endpoints

pub mod analysis;
pub mod health;
pub mod organizations;
pub mod products;
pub mod sessions;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use infra_store::Store;

use crate::config::ServerConfig;
use crate::session::SessionRegistry;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Tenant store; handlers call it through `spawn_blocking`
    pub store: Arc<Store>,
    /// Session-readiness gate
    pub sessions: SessionRegistry,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Arc<ServerConfig>, store: Arc<Store>) -> Self {
        Self {
            config,
            store,
            sessions: SessionRegistry::new(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Build the main application router by merging all route modules
pub fn build_router(config: Arc<ServerConfig>, store: Arc<Store>) -> Router {
    let cors = if config.environment.is_production() {
        CorsLayer::new()
    } else {
        CorsLayer::permissive()
    };

    let state = AppState::new(config, store);

    Router::new()
        .merge(health::routes())
        .merge(analysis::routes())
        .merge(organizations::routes())
        .merge(products::routes())
        .merge(sessions::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
