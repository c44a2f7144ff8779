//! # Pocket Buddy Backend
//!
//! All non-UI logic for the personal finance planner: a savings goal board
//! and a monthly expense tracker with category summaries.
//!
//! ## Architecture
//!
//! ```text
//! UI (any HTTP client)
//!     ↓
//! IO Layer (REST API, DTO mappers)
//!     ↓
//! Domain Layer (planner session, reducers, aggregations, advice)
//!     ↓
//! Storage Layer (CSV snapshots in the data directory)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::domain::{AdviceService, GeminiAdviceProvider, PlannerService, SystemClock, UuidGenerator};
use crate::storage::{CsvConnection, CsvPlannerStorage};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub planner_service: PlannerService,
    pub advice_service: AdviceService,
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up storage in {}", config.data_directory.display());
    let connection = CsvConnection::new(&config.data_directory)?;
    let storage = Arc::new(CsvPlannerStorage::new(connection));

    info!("Setting up domain model");
    let planner_service = PlannerService::load(storage, Arc::new(UuidGenerator), Arc::new(SystemClock));

    if config.api_key.is_none() {
        info!("No advice API key set; the assistant will answer with a fallback message");
    }
    let provider = GeminiAdviceProvider::new(
        &config.advice.endpoint,
        &config.advice.model,
        config.api_key.clone(),
        config.advice.timeout(),
    );
    let advice_service = AdviceService::new(Arc::new(provider));

    Ok(AppState {
        planner_service,
        advice_service,
    })
}

/// Router with every API under `/api`, open to local UIs
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:8080"),
            HeaderValue::from_static("http://127.0.0.1:8080"),
            HeaderValue::from_static("http://localhost:5173"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .nest("/api", io::rest::router())
        .layer(cors)
        .with_state(state)
}
