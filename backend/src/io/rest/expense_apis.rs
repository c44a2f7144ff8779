//! # REST API for the Expense Planner
//!
//! Endpoints for listing expenses by month, creating, editing and deleting
//! them, and the monthly summary with the per-category breakdown.
//!
//! The `month` query parameter is `YYYY-MM` or `all`; when omitted the
//! current month is used.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, put},
    Router,
};
use log::{info, warn};

use crate::domain::models::month::{MonthFilter, YearMonth};
use crate::io::rest::{error_response, run_blocking, ApiJson};
use crate::io::rest::mappers::expense_mapper::ExpenseMapper;
use crate::AppState;
use shared::{
    CreateExpenseRequest, CreateExpenseResponse, ExpenseListResponse, ExpenseQuery, UpdateExpenseRequest,
    UpdateExpenseResponse,
};

/// Create a router for expense related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_expenses).post(create_expense))
        .route("/summary", get(get_summary))
        .route("/:id", put(update_expense).delete(delete_expense))
}

/// Resolve the month query parameter, defaulting to the current month
fn resolve_filter(state: &AppState, query: &ExpenseQuery) -> Result<MonthFilter, Response> {
    match query.month.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
        None => Ok(MonthFilter::Month(YearMonth::from_date(state.planner_service.today()))),
        Some(raw) => raw.parse::<MonthFilter>().map_err(|e| {
            warn!("{}", e);
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }),
    }
}

/// Expenses in the selected month, in insertion order
pub async fn list_expenses(State(state): State<AppState>, Query(query): Query<ExpenseQuery>) -> Response {
    info!("GET /api/expenses - query: {:?}", query);

    let filter = match resolve_filter(&state, &query) {
        Ok(filter) => filter,
        Err(response) => return response,
    };
    let expenses = ExpenseMapper::to_dto_list(state.planner_service.expenses(filter));
    (StatusCode::OK, Json(ExpenseListResponse { expenses })).into_response()
}

/// Filtered list, total, category breakdown and selectable months
pub async fn get_summary(State(state): State<AppState>, Query(query): Query<ExpenseQuery>) -> Response {
    info!("GET /api/expenses/summary - query: {:?}", query);

    let filter = match resolve_filter(&state, &query) {
        Ok(filter) => filter,
        Err(response) => return response,
    };
    let response = ExpenseMapper::to_summary_response(state.planner_service.summary(filter));
    (StatusCode::OK, Json(response)).into_response()
}

/// Create an expense; a recurring one also gets its next-month sibling
pub async fn create_expense(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateExpenseRequest>,
) -> Response {
    info!("POST /api/expenses - request: {:?}", request);

    let command = match ExpenseMapper::to_create_command(request) {
        Ok(command) => command,
        Err(message) => {
            warn!("Rejected expense: {}", message);
            return error_response(StatusCode::BAD_REQUEST, message);
        }
    };

    let planner = state.planner_service.clone();
    let created = match run_blocking(move || planner.create_expense(command)).await {
        Ok(created) => created,
        Err(response) => return response,
    };
    match created {
        Ok(result) => {
            let success_message = if result.projected.is_some() {
                format!("Recurring expense '{}' added for this month and the next", result.expense.title)
            } else {
                format!("Expense '{}' added", result.expense.title)
            };
            let response = CreateExpenseResponse {
                expenses: ExpenseMapper::to_dto_list(result.into_vec()),
                success_message,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            warn!("Rejected expense: {}", e);
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
    }
}

/// Replace an expense's fields in place; unknown ids are a no-op
pub async fn update_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
    ApiJson(request): ApiJson<UpdateExpenseRequest>,
) -> Response {
    info!("PUT /api/expenses/{} - request: {:?}", expense_id, request);

    let command = match ExpenseMapper::to_update_command(expense_id, request) {
        Ok(command) => command,
        Err(message) => {
            warn!("Rejected expense update: {}", message);
            return error_response(StatusCode::BAD_REQUEST, message);
        }
    };

    let planner = state.planner_service.clone();
    let updated = match run_blocking(move || planner.update_expense(command)).await {
        Ok(updated) => updated,
        Err(response) => return response,
    };
    match updated {
        Ok(Some(expense)) => {
            let response = UpdateExpenseResponse {
                success_message: format!("Expense '{}' updated", expense.title),
                expense: ExpenseMapper::to_dto(expense),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            warn!("Rejected expense update: {}", e);
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
    }
}

/// Delete one expense; a projected sibling is left alone
pub async fn delete_expense(State(state): State<AppState>, Path(expense_id): Path<String>) -> Response {
    info!("DELETE /api/expenses/{}", expense_id);

    let planner = state.planner_service.clone();
    match run_blocking(move || planner.delete_expense(&expense_id)).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(response) => response,
    }
}
