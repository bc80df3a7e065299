use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::error::AppError;
use crate::http::server::AppState;
use crate::votes::{self, TeamCount};

/// Liveness probe. Healthy whenever the process is serving.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// `POST /vote` with `{"team": "<option>"}`.
pub async fn cast_vote(State(state): State<AppState>, body: Bytes) -> Result<StatusCode, AppError> {
    votes::cast_vote(&state.options, state.store.as_ref(), &body).await?;
    Ok(StatusCode::CREATED)
}

/// `GET /counts`: one entry per allowed option, in configured order.
pub async fn counts(State(state): State<AppState>) -> Result<Json<Vec<TeamCount>>, AppError> {
    let counts = votes::current_counts(&state.options, state.store.as_ref()).await?;
    Ok(Json(counts))
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
