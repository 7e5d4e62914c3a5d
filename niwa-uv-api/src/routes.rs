use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{any, get},
};
use niwa_uv_core::{Config, UvError, UvReading, source_from_config, uv_forecast};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub const UV_PATH: &str = "/api/niwaUV";

#[derive(Debug, Clone)]
pub struct AppState {
    config: Arc<Config>,
    http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: Config, http: reqwest::Client) -> Self {
        Self { config: Arc::new(config), http }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(UV_PATH, any(get_uv))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn get_uv(State(state): State<AppState>) -> Result<Json<Vec<UvReading>>, ApiError> {
    let source = source_from_config(&state.config, state.http.clone())?;
    let readings = uv_forecast(source.as_ref()).await?;
    tracing::info!(readings = readings.len(), "served UV forecast");
    Ok(Json(readings))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub struct ApiError(pub UvError);

impl From<UvError> for ApiError {
    fn from(err: UvError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        tracing::error!(?kind, "UV request failed: {}", self.0);

        let body = Json(json!({
            "error": self.0.to_string(),
            "kind": kind,
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
