//! HTTP front end for the bridge.
//!
//! Each `/api` route maps its JSON body onto one [`Command`] and relays the
//! bulb's reply. Any other path is served from the static directory.

use std::path::Path;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use log::warn;
use serde::Deserialize;
use serde_json::json;
use tower_http::services::ServeDir;

use crate::bulb::Bulb;
use crate::command::Command;
use crate::errors::Error;

type SharedBulb = Arc<Bulb>;

/// Build the bridge router.
pub fn router(bulb: Bulb, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/api/power", post(api_power))
        .route("/api/brightness", post(api_brightness))
        .route("/api/color", post(api_color))
        .route("/api/temperature", post(api_temperature))
        .route("/api/scene", post(api_scene))
        .route("/api/state", get(api_state))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .with_state(Arc::new(bulb))
}

#[derive(Debug, Deserialize)]
struct PowerRequest {
    state: bool,
}

#[derive(Debug, Deserialize)]
struct BrightnessRequest {
    brightness: i64,
}

#[derive(Debug, Deserialize)]
struct ColorRequest {
    r: i64,
    g: i64,
    b: i64,
}

#[derive(Debug, Deserialize)]
struct TemperatureRequest {
    temp: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SceneRequest {
    scene_id: i64,
}

/// A failed exchange, rendered as `500 {"success": false, "error": ...}`.
struct ApiError(Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": self.0.to_string() })),
        )
            .into_response()
    }
}

type ApiResult = Result<Json<serde_json::Value>, ApiError>;

/// Runs one exchange and wraps the reply under `key`.
async fn relay(bulb: &Bulb, command: Command, key: &str) -> ApiResult {
    match bulb.send(&command).await {
        Ok(reply) => Ok(Json(json!({ "success": true, key: reply }))),
        Err(e) => {
            warn!("{} to {} failed: {}", command.method(), bulb.target(), e);
            Err(ApiError(e))
        }
    }
}

async fn api_power(State(bulb): State<SharedBulb>, Json(req): Json<PowerRequest>) -> ApiResult {
    relay(&bulb, Command::power(req.state), "response").await
}

async fn api_brightness(
    State(bulb): State<SharedBulb>,
    Json(req): Json<BrightnessRequest>,
) -> ApiResult {
    relay(&bulb, Command::brightness(req.brightness), "response").await
}

async fn api_color(State(bulb): State<SharedBulb>, Json(req): Json<ColorRequest>) -> ApiResult {
    relay(&bulb, Command::color(req.r, req.g, req.b), "response").await
}

async fn api_temperature(
    State(bulb): State<SharedBulb>,
    Json(req): Json<TemperatureRequest>,
) -> ApiResult {
    relay(&bulb, Command::temperature(req.temp), "response").await
}

async fn api_scene(State(bulb): State<SharedBulb>, Json(req): Json<SceneRequest>) -> ApiResult {
    relay(&bulb, Command::scene(req.scene_id), "response").await
}

async fn api_state(State(bulb): State<SharedBulb>) -> ApiResult {
    relay(&bulb, Command::get_pilot(), "state").await
}
