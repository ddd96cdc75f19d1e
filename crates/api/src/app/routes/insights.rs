use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::app::services::{self, AppServices};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_insights))
        .route("/refresh", post(refresh))
        .route("/stream", get(stream))
        .route("/recommendation", post(recommendation))
}

/// Latest displayed batch, with live/fallback tags per insight.
pub async fn get_insights(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let board = services.board();
    let Some(batch) = board.current() else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_ready", "no insight batch has completed yet");
    };

    Json(dto::InsightsResponse {
        loading: board.is_loading(),
        live: batch.is_fully_live(),
        batch: &batch,
    })
    .into_response()
}

/// Manual refresh: always starts a new batch, even if one is in flight.
pub async fn refresh(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let ticket = services.refresh();
    (StatusCode::ACCEPTED, Json(dto::BatchAccepted::from(ticket)))
}

pub async fn stream(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Sse<impl tokio_stream::Stream<Item = Result<axum::response::sse::Event, std::convert::Infallible>>> {
    services::insights_sse_stream(services)
}

pub async fn recommendation(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RecommendationRequest>,
) -> axum::response::Response {
    if body.context.trim().is_empty() {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "context must not be empty");
    }
    Json(services.recommendation(&body.context).await).into_response()
}
