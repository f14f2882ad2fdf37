//! HTTP front end for the station overlay.
//!
//! One [`ReactiveController`] is shared by all requests; the mutex around it
//! is the single event queue filter and view changes are serialized through.

pub mod config;
mod routes;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use bikeflow_core::{ReactiveController, WebMercatorView};
use tower::{BoxError, ServiceBuilder};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::{ConfigError, Limits, ServerConfig};

pub type OverlayController = ReactiveController<WebMercatorView>;

pub struct AppState {
    pub controller: Mutex<OverlayController>,
}

impl AppState {
    pub fn new(controller: OverlayController) -> Arc<Self> {
        Arc::new(Self {
            controller: Mutex::new(controller),
        })
    }
}

pub fn router(state: Arc<AppState>, limits: Limits) -> Router {
    routes::routes()
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(Duration::from_secs(limits.request_timeout_secs))
                .concurrency_limit(limits.max_concurrent_requests),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("unhandled internal error: {err}"),
        )
    }
}
