//! coach-insights library interface
//!
//! Exposes the router and its building blocks for the binary and for
//! integration tests.

pub mod api;
pub mod config;
pub mod error;
pub mod generator;
pub mod llm;
pub mod parse;
pub mod prompt;

pub use crate::error::{ApiError, ApiResult};
pub use crate::generator::InsightGenerator;

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<InsightGenerator>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last generation failure for diagnostics
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(generator: InsightGenerator) -> Self {
        Self {
            generator: Arc::new(generator),
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::insight_routes())
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // The tutor front end may be served from another origin
        .layer(CorsLayer::permissive())
}
