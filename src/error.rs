use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced to HTTP clients.
///
/// Client errors carry a short message. Store failures are logged in full
/// and reported with a generic message only.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request")]
    MalformedPayload,

    #[error("invalid team")]
    InvalidOption(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("internal error")]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedPayload | AppError::InvalidOption(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Store(source) = &self {
            tracing::error!(error = %source, "Store operation failed");
        }

        (self.status(), self.to_string()).into_response()
    }
}
