//! # REST API Interface Layer
//!
//! HTTP endpoints for the goal board, the expense planner and the advice
//! assistant, all nested under `/api`.
//!
//! Handlers are a pure translation layer: they map `shared` DTOs to domain
//! commands, call the [`PlannerService`](crate::domain::PlannerService) and
//! map the result back. Validation errors become `400` with an
//! [`ErrorResponse`] body; mutations on unknown ids answer `204`.
//! Request bodies go through [`ApiJson`] so a malformed body is a `400`
//! with the same shape. Mutations that write snapshots run on the blocking
//! pool via [`run_blocking`].

pub mod advice_apis;
pub mod category_apis;
pub mod expense_apis;
pub mod goal_apis;
pub mod mappers;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Router,
};
use log::{error, warn};
use shared::ErrorResponse;

use crate::AppState;

/// All API routes, to be nested under `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/goals", goal_apis::router())
        .nest("/expenses", expense_apis::router())
        .nest("/categories", category_apis::router())
        .nest("/advice", advice_apis::router())
}

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error: message.into() })).into_response()
}

/// JSON body extractor whose rejection is a `400` [`ErrorResponse`]
///
/// Missing fields, wrong types and unknown enum variants are input errors like
/// any other, so they share the validation error shape instead of axum's
/// plain-text `422`.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                let message = rejection.body_text();
                warn!("Rejected request body: {}", message);
                Err(error_response(StatusCode::BAD_REQUEST, message))
            }
        }
    }
}

/// Run a planner call that may write snapshots off the async workers
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T, Response>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        error!("Planner task failed: {}", e);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
    })
}
