use std::sync::{Arc, MutexGuard};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bikeflow_core::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{AppState, OverlayController};

pub(crate) fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/frame", get(frame))
        .route("/frame.geojson", get(frame_geojson))
        .route("/filter", post(set_filter))
        .route("/view", post(update_view))
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ApiError {
    #[error("controller state is unavailable")]
    Poisoned,
    #[error(transparent)]
    Core(#[from] Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("{self}");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

fn lock(state: &AppState) -> Result<MutexGuard<'_, OverlayController>, ApiError> {
    state.controller.lock().map_err(|_| ApiError::Poisoned)
}

/// Frame after a transition together with the element changes it caused
#[derive(Debug, Serialize)]
pub(crate) struct FrameUpdate {
    frame: Frame,
    changes: Reconciliation<CircleElement>,
}

/// Slider value; numbers, numeric strings, `null` or nothing at all.
/// Anything that is not a minute of day clears the filter.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FilterRequest {
    #[serde(default)]
    minute: Option<serde_json::Value>,
}

impl FilterRequest {
    fn time_filter(&self) -> TimeFilter {
        match &self.minute {
            Some(serde_json::Value::Number(n)) => {
                TimeFilter::from_optional_signal(n.as_i64())
            }
            Some(serde_json::Value::String(s)) => TimeFilter::parse_signal(s),
            _ => TimeFilter::Unfiltered,
        }
    }
}

/// Any subset of the view parameters; `pan` is a screen offset in pixels
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ViewRequest {
    center: Option<[f64; 2]>,
    zoom: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    pan: Option<[f64; 2]>,
}

impl ViewRequest {
    fn apply(&self, view: &mut WebMercatorView) {
        if let Some(center) = self.center {
            view.center = center;
        }
        if let Some(zoom) = self.zoom {
            view.zoom_to(zoom);
        }
        if self.width.is_some() || self.height.is_some() {
            view.resize(
                self.width.unwrap_or(view.width),
                self.height.unwrap_or(view.height),
            );
        }
        if let Some([dx, dy]) = self.pan {
            view.pan_by(dx, dy);
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn frame(State(state): State<Arc<AppState>>) -> Result<Json<Frame>, ApiError> {
    Ok(Json(lock(&state)?.frame()))
}

async fn frame_geojson(
    State(state): State<Arc<AppState>>,
) -> Result<Json<geojson::FeatureCollection>, ApiError> {
    let frame = lock(&state)?.frame();
    Ok(Json(frame.to_geojson()?))
}

async fn set_filter(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FilterRequest>,
) -> Result<Json<FrameUpdate>, ApiError> {
    let filter = request.time_filter();
    let mut controller = lock(&state)?;
    let changes = controller.handle(Signal::FilterChanged { filter });
    info!("Filter set to {filter}");

    Ok(Json(FrameUpdate {
        frame: controller.frame(),
        changes,
    }))
}

async fn update_view(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ViewRequest>,
) -> Result<Json<FrameUpdate>, ApiError> {
    let mut controller = lock(&state)?;
    request.apply(controller.projection_mut());
    let changes = controller.handle(Signal::ViewTransformChanged);

    Ok(Json(FrameUpdate {
        frame: controller.frame(),
        changes,
    }))
}
