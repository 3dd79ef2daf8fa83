//! labnote-server library
//!
//! JSON-over-HTTP access to per-user project descriptions, the update log,
//! and the wet/dry lab digests written by `labnote-summarize`.

use axum::Router;
use labnote_common::FileStore;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod registry;

pub use crate::error::{ApiError, ApiResult};
pub use crate::registry::{Lab, RegistryError};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// In-memory user registry
    pub lab: Arc<Lab>,
    /// Flat-file record store
    pub store: Arc<FileStore>,
}

impl AppState {
    pub fn new(lab: Lab, store: FileStore) -> Self {
        Self {
            lab: Arc::new(lab),
            store: Arc::new(store),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::user_routes())
        .merge(api::record_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
