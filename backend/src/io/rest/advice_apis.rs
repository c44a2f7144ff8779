//! # REST API for the Advice Assistant
//!
//! Answers always come back with `200`: provider problems are reported as a
//! fallback message inside the answer. Only a blank question is rejected.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use log::{info, warn};

use crate::domain::AdviceService;
use crate::io::rest::{error_response, ApiJson};
use crate::AppState;
use shared::{AdviceRequest, AdviceResponse};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(get_advice))
}

pub async fn get_advice(State(state): State<AppState>, ApiJson(request): ApiJson<AdviceRequest>) -> Response {
    info!("POST /api/advice");

    let question = match AdviceService::validate_question(&request.question) {
        Ok(question) => question,
        Err(e) => {
            warn!("Rejected advice request: {}", e);
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    // The state lock is released before the provider call
    let snapshot = state.planner_service.snapshot();
    let answer = state
        .advice_service
        .get_financial_advice(&snapshot.goals, &snapshot.expenses, question)
        .await;

    (StatusCode::OK, Json(AdviceResponse { answer })).into_response()
}
