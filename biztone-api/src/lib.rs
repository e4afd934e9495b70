//! biztone-api library - Business tone conversion service
//!
//! Rewrites informal Korean text into one of three business registers
//! (superior, peer, customer) through a hosted chat completion API, with a
//! deterministic local fallback when no API key is configured.

use axum::{extract::DefaultBodyLimit, Router};
use biztone_common::config::DEFAULT_MAX_BODY_BYTES;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod completion;
pub mod converter;
pub mod error;
pub mod error_log;
pub mod fallback;
pub mod prompt;

pub use converter::Converter;
pub use error::{ApiError, ApiResult};
pub use error_log::ErrorLog;

/// Application state shared across HTTP handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Conversion core, mode fixed at startup
    pub converter: Converter,
    /// Diagnostic side channel for upstream failures
    pub error_log: ErrorLog,
    /// Request body cap for `/api/convert`
    pub max_body_bytes: usize,
}

impl AppState {
    /// Create new application state
    pub fn new(converter: Converter, error_log: ErrorLog) -> Self {
        Self {
            converter,
            error_log,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Override the request body cap
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_body_bytes;
    Router::new()
        .merge(api::ui_routes())
        .merge(api::health_routes())
        .merge(api::convert_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
