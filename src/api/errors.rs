//! HTTP-facing error kinds (§7). Unlike the plain enums used by the
//! storage/index/planner/executor layers, this one sits directly at the
//! HTTP boundary, so it is `thiserror`-derived and implements
//! `IntoResponse` directly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// Unknown key, non-parseable integer, empty value, `limit <= 0`,
    /// `order` not in {-1, 1}, or `keys` naming a non-whitelisted field.
    #[error("bad parameter")]
    BadParameter,
    /// Target account id absent (recommend/suggest only).
    #[error("not found")]
    NotFound,
    /// Response body could not be encoded. Never cached (§4.5).
    #[error("internal encoding error")]
    InternalEncoding,
}

impl ApiError {
    pub fn status_code(self) -> StatusCode {
        match self {
            ApiError::BadParameter => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InternalEncoding => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    /// Non-200 bodies are always empty (§6).
    fn into_response(self) -> Response {
        self.status_code().into_response()
    }
}
