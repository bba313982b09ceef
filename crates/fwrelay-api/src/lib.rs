//! fwrelay-api - HTTP JSON front end for the lookup chain
//!
//! Serves a single lookup endpoint on top of any [`DeviceLookup`]
//! implementation, so the router is independent of how lookups are done.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use fwrelay_api::{create_router, AppState};
//! use fwrelay_client::VendorClient;
//! use fwrelay_core::LookupChain;
//!
//! let chain = LookupChain::new(Arc::new(VendorClient::new()?));
//! let router = create_router(AppState::new(Arc::new(chain)));
//! ```

pub mod cors;
pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

// Re-export the lookup seam for convenience
pub use fwrelay_core::{DeviceLookup, LookupQuery, LookupResult};

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the relay router with the given application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Lookup, at the root and under an explicit path
        .route(
            "/",
            post(handlers::query::lookup).fallback(handlers::query::method_not_allowed),
        )
        .route(
            "/query",
            post(handlers::query::lookup).fallback(handlers::query::method_not_allowed),
        )
        // Middleware
        .layer(middleware::from_fn(cors::cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
