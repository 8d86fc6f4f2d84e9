//! Medibook HTTP Server
//!
//! JSON REST surface over [`medibook_core::BookingCore`].
//!
//! ```text
//!   request ─► TraceLayer ─► CorsLayer ─► TimeoutLayer ─► Router
//!                                                          │
//!                                       spawn_blocking ◄───┘
//!                                             │
//!                                       BookingCore (SQLite)
//! ```

pub mod config;
pub mod error;
pub mod routes;

use std::time::Duration;

use axum::Router;
use medibook_core::BookingCore;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::{ApiError, ApiJson, ApiPath, ApiQuery};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub core: BookingCore,
}

/// Build the application router with all routes and middleware.
pub fn app(core: BookingCore, request_timeout: Duration) -> Router {
    Router::new()
        .merge(routes::appointments::router())
        .merge(routes::catalog::router())
        .merge(routes::directory::router())
        .merge(routes::users::router())
        .route("/health", axum::routing::get(routes::health))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { core })
}
