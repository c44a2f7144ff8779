//! # REST API for the Goal Board
//!
//! Endpoints for listing, creating, deleting and moving goals between board
//! columns.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, put},
    Router,
};
use log::{info, warn};

use crate::domain::commands::goal::MoveGoalOutcome;
use crate::io::rest::{error_response, run_blocking, ApiJson};
use crate::io::rest::mappers::goal_mapper::GoalMapper;
use crate::AppState;
use shared::{CreateGoalRequest, CreateGoalResponse, GoalListResponse, MoveGoalRequest, MoveGoalResponse};

/// Create a router for goal related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_goals).post(create_goal))
        .route("/:id", delete(delete_goal))
        .route("/:id/status", put(move_goal))
}

/// Every goal in board order
pub async fn list_goals(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/goals");

    let goals = GoalMapper::to_dto_list(state.planner_service.goals());
    (StatusCode::OK, Json(GoalListResponse { goals }))
}

/// Create a new goal in the Planning column
pub async fn create_goal(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateGoalRequest>,
) -> Response {
    info!("POST /api/goals - request: {:?}", request);

    let command = match GoalMapper::to_create_command(request) {
        Ok(command) => command,
        Err(message) => {
            warn!("Rejected goal: {}", message);
            return error_response(StatusCode::BAD_REQUEST, message);
        }
    };

    let planner = state.planner_service.clone();
    let created = match run_blocking(move || planner.create_goal(command)).await {
        Ok(created) => created,
        Err(response) => return response,
    };
    match created {
        Ok(goal) => {
            let response = CreateGoalResponse {
                success_message: format!("Goal '{}' created", goal.title),
                goal: GoalMapper::to_dto(goal),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            warn!("Rejected goal: {}", e);
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
    }
}

/// Delete a goal; unknown ids are a no-op
pub async fn delete_goal(State(state): State<AppState>, Path(goal_id): Path<String>) -> Response {
    info!("DELETE /api/goals/{}", goal_id);

    let planner = state.planner_service.clone();
    match run_blocking(move || planner.delete_goal(&goal_id)).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(response) => response,
    }
}

/// Move a goal to another board column
pub async fn move_goal(
    State(state): State<AppState>,
    Path(goal_id): Path<String>,
    ApiJson(request): ApiJson<MoveGoalRequest>,
) -> Response {
    info!("PUT /api/goals/{}/status - request: {:?}", goal_id, request);

    let command = GoalMapper::to_move_command(goal_id, request.status);
    let planner = state.planner_service.clone();
    let outcome = match run_blocking(move || planner.move_goal(command)).await {
        Ok(outcome) => outcome,
        Err(response) => return response,
    };
    match outcome {
        MoveGoalOutcome::Moved(goal) => {
            let response = MoveGoalResponse {
                success_message: format!("Goal '{}' moved to {}", goal.title, request.status.column_title()),
                goal: GoalMapper::to_dto(goal),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        MoveGoalOutcome::Unchanged(_) | MoveGoalOutcome::NotFound => StatusCode::NO_CONTENT.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use crate::io::rest::test_support::TestApp;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;
    use shared::{CreateGoalResponse, ErrorResponse, GoalListResponse, GoalStatus, MoveGoalResponse};

    async fn create(app: &TestApp, title: &str) -> CreateGoalResponse {
        let (status, body) = app
            .send_json::<CreateGoalResponse>(
                "POST",
                "/api/goals",
                Some(json!({"title": title, "amount": 1000.0, "deadline": "2024-12-01"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    #[tokio::test]
    async fn test_create_and_list_goals() {
        let app = TestApp::new();

        let created = create(&app, "  Laptop ").await;
        assert_eq!(created.goal.title, "Laptop");
        assert_eq!(created.goal.status, GoalStatus::Planning);
        assert_eq!(created.goal.saved, 0.0);
        assert_eq!(created.goal.progress_percent, 0);

        let (status, list) = app.send_json::<GoalListResponse>("GET", "/api/goals", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.goals, vec![created.goal]);
    }

    #[tokio::test]
    async fn test_create_goal_validation() {
        let app = TestApp::new();

        let (status, body) = app
            .send_json::<ErrorResponse>(
                "POST",
                "/api/goals",
                Some(json!({"title": "Car", "amount": 0.0, "deadline": "2024-12-01"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Goal amount must be positive");

        let (status, _) = app
            .send_json::<ErrorResponse>(
                "POST",
                "/api/goals",
                Some(json!({"title": "Car", "amount": 10.0, "deadline": "soon"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_move_goal() {
        let app = TestApp::new();
        let goal = create(&app, "Trip").await.goal;
        let uri = format!("/api/goals/{}/status", goal.id);

        let (status, moved) = app
            .send_json::<MoveGoalResponse>("PUT", &uri, Some(json!({"status": "Done"})))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(moved.goal.status, GoalStatus::Done);
        assert_eq!(moved.goal.amount, goal.amount);

        let (status, _) = app.send("PUT", &uri, Some(json!({"status": "Done"}))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = app
            .send("PUT", "/api/goals/missing/status", Some(json!({"status": "Planning"})))
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_delete_goal() {
        let app = TestApp::new();
        let goal = create(&app, "Bike").await.goal;

        let (status, _) = app.send("DELETE", "/api/goals/unknown", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, list) = app.send_json::<GoalListResponse>("GET", "/api/goals", None).await;
        assert_eq!(list.goals.len(), 1);

        let (status, _) = app.send("DELETE", &format!("/api/goals/{}", goal.id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, list) = app.send_json::<GoalListResponse>("GET", "/api/goals", None).await;
        assert!(list.goals.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_goal_bodies_are_bad_requests() {
        let app = TestApp::new();

        let (status, body) = app
            .send_json::<ErrorResponse>(
                "POST",
                "/api/goals",
                Some(json!({"amount": 10.0, "deadline": "2024-12-01"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.contains("title"), "{}", body.error);

        let goal = create(&app, "Camera").await.goal;
        let (status, body) = app
            .send_json::<ErrorResponse>(
                "PUT",
                &format!("/api/goals/{}/status", goal.id),
                Some(json!({"status": "Archived"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.error.is_empty());

        let (_, list) = app.send_json::<GoalListResponse>("GET", "/api/goals", None).await;
        assert_eq!(list.goals, vec![goal]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_are_all_persisted() {
        let app = TestApp::new();

        let mut handles = Vec::new();
        for n in 0..16 {
            let router = app.router.clone();
            handles.push(tokio::spawn(async move {
                let request = Request::builder()
                    .method("POST")
                    .uri("/api/goals")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({"title": format!("Goal {}", n), "amount": 5.0, "deadline": "2024-12-01"}).to_string(),
                    ))
                    .unwrap();
                router.oneshot(request).await.unwrap().status()
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
        }

        let (_, list) = app.send_json::<GoalListResponse>("GET", "/api/goals", None).await;
        assert_eq!(list.goals.len(), 16);
        let reloaded = crate::storage::GoalStorage::load_goals(&app.env.storage());
        assert_eq!(reloaded.len(), 16);
    }
}
