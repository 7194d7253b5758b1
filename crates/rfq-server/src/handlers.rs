//! Route handlers.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use rfq_core::{QuoteRequest, QuoteResponse};
use rfq_engine::EngineError;
use rfq_telemetry::Metrics;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::server::AppState;

/// Acknowledgement body for settlement notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub result: bool,
    pub message: String,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            result: true,
            message: "ok".to_string(),
        }
    }
}

/// Engine failure rendered as an HTTP error.
#[derive(Debug)]
pub struct ApiError(pub EngineError);

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            warn!(error = %self.0, "Rejected invalid quote request");
            StatusCode::BAD_REQUEST
        } else {
            error!(error = %self.0, "Quote failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub async fn quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let response = state.orchestrator().quote(&request).await?;
    Ok(Json(response))
}

pub async fn deal(Json(body): Json<Value>) -> Json<Ack> {
    info!(body = %body, "Deal notification");
    Json(Ack::ok())
}

pub async fn exception(Json(body): Json<Value>) -> Json<Ack> {
    warn!(body = %body, "Exception notification");
    Json(Ack::ok())
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn metrics() -> Response {
    match Metrics::render() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Metrics rendering failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
