//! Route wiring (§6). A non-GET method or an unrecognized path is `400`,
//! not axum's default `405`/`404` — normalized by the middleware below so
//! every out-of-contract request gets the same `BadParameter` treatment.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use super::handlers;
use super::state::AppState;

async fn unknown_route() -> Response {
    StatusCode::BAD_REQUEST.into_response()
}

async fn normalize_method_not_allowed(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        StatusCode::BAD_REQUEST.into_response()
    } else {
        response
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/accounts/filter/", get(handlers::filter))
        .route("/accounts/group/", get(handlers::group))
        .route("/accounts/:id/recommend/", get(handlers::recommend))
        .route("/accounts/:id/suggest/", get(handlers::suggest))
        .fallback(unknown_route)
        .layer(middleware::from_fn(normalize_method_not_allowed))
        .with_state(state)
}
