//! # REST API for Expense Categories

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use log::{info, warn};

use crate::io::rest::{error_response, run_blocking, ApiJson};
use crate::io::rest::mappers::expense_mapper::ExpenseMapper;
use crate::AppState;
use shared::RegisterCategoryRequest;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_categories).post(register_category))
}

/// Defaults followed by custom categories
pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/categories");

    let response = ExpenseMapper::to_category_list_response(&state.planner_service.categories());
    (StatusCode::OK, Json(response))
}

/// Register a custom category. 201 when it is new, 200 when already known.
pub async fn register_category(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterCategoryRequest>,
) -> Response {
    info!("POST /api/categories - request: {:?}", request);

    let planner = state.planner_service.clone();
    let registered = match run_blocking(move || planner.register_category(&request.name)).await {
        Ok(registered) => registered,
        Err(response) => return response,
    };
    match registered {
        Ok(added) => {
            let status = if added { StatusCode::CREATED } else { StatusCode::OK };
            let response = ExpenseMapper::to_category_list_response(&state.planner_service.categories());
            (status, Json(response)).into_response()
        }
        Err(e) => {
            warn!("Rejected category: {}", e);
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::io::rest::test_support::TestApp;
    use axum::http::StatusCode;
    use serde_json::json;
    use shared::{CategoryListResponse, ErrorResponse};

    #[tokio::test]
    async fn test_default_categories() {
        let app = TestApp::new();

        let (status, categories) = app.send_json::<CategoryListResponse>("GET", "/api/categories", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(categories.default_categories.len(), 8);
        assert_eq!(categories.default_categories[0], "Housing");
        assert!(categories.custom_categories.is_empty());
        assert_eq!(categories.all_categories, categories.default_categories);
    }

    #[tokio::test]
    async fn test_register_category() {
        let app = TestApp::new();

        let (status, categories) = app
            .send_json::<CategoryListResponse>("POST", "/api/categories", Some(json!({"name": "Pets"})))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(categories.all_categories.last().map(String::as_str), Some("Pets"));

        let (status, categories) = app
            .send_json::<CategoryListResponse>("POST", "/api/categories", Some(json!({"name": "Pets"})))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(categories.custom_categories, vec!["Pets".to_string()]);

        let (status, _) = app
            .send_json::<CategoryListResponse>("POST", "/api/categories", Some(json!({"name": "Food"})))
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = app
            .send_json::<ErrorResponse>("POST", "/api/categories", Some(json!({"name": "  "})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_category_without_name_is_rejected() {
        let app = TestApp::new();

        let (status, body) = app
            .send_json::<ErrorResponse>("POST", "/api/categories", Some(json!({})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.contains("name"), "{}", body.error);

        let (_, categories) = app.send_json::<CategoryListResponse>("GET", "/api/categories", None).await;
        assert!(categories.custom_categories.is_empty());
    }
}
