//! Server-rendered front-end for Krill Space.
//!
//! # Overview
//! Four pages (home, contact, posts, todos) rendered as HTML by axum. Page
//! state and request decisions live in `krill-core`; this crate executes the
//! requests it hands out and turns form posts into row events.

pub mod config;
pub mod render;
pub mod routes;
pub mod transport;

use std::sync::Arc;

use axum::Router;
use krill_core::{ApiClient, ApiConfig};

pub use routes::AppState;
pub use transport::{Transport, UreqTransport};

pub fn app(config: &ApiConfig) -> Router {
    app_with(config, Arc::new(UreqTransport::new()))
}

pub fn app_with(config: &ApiConfig, transport: Arc<dyn Transport>) -> Router {
    routes::router(AppState::new(ApiClient::new(config), transport))
}
