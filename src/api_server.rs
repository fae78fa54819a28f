// Axum API Server Module
//
// Purpose: JSON front end over the lookup engine. Tables are loaded once at
// startup and shared read-only through `Arc`; handlers never mutate state.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::a1c::a1c_options;
use crate::config::DataConfig;
use crate::data::ReferenceData;
use crate::lookup::{find_bp_plan, find_diabetes_plan, BpQuery, DiabetesQuery};
use crate::report::{bp_sections, diabetes_sections, not_found_message, PlanSection};
use crate::tables::Condition;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<ReferenceData>,
    pub a1c_levels: Arc<Vec<Decimal>>,
}

impl AppState {
    pub fn new(config: &DataConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading reference tables...");
        let data = ReferenceData::load(config).context("Failed to load reference tables")?;
        Ok(Self::from_data(data))
    }

    /// Wrap already-loaded tables (used by tests with fixture data)
    pub fn from_data(data: ReferenceData) -> Self {
        let a1c_levels: Vec<Decimal> = a1c_options().collect();
        tracing::info!("Prepared {} A1C levels", a1c_levels.len());

        Self {
            data: Arc::new(data),
            a1c_levels: Arc::new(a1c_levels),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        .route("/api/conditions", get(list_conditions))

        // Blood pressure
        .route("/api/bp/options", get(bp_options))
        .route("/api/bp/plan", get(bp_plan))

        // Diabetes
        .route("/api/diabetes/options", get(diabetes_options))
        .route("/api/diabetes/plan", get(diabetes_plan))

        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn list_conditions() -> Json<[Condition; 2]> {
    Json(Condition::ALL)
}

async fn bp_options(State(state): State<AppState>) -> Json<serde_json::Value> {
    let bp = &state.data.bp;
    Json(serde_json::json!({
        "ages": bp.ages(),
        "genders": bp.genders(),
        "levels": bp.levels(),
    }))
}

async fn diabetes_options(State(state): State<AppState>) -> Json<serde_json::Value> {
    let diabetes = &state.data.diabetes;
    Json(serde_json::json!({
        "ages": diabetes.ages(),
        "genders": diabetes.genders(),
        "diabetes_types": diabetes.diabetes_types(),
        "a1c_levels": state.a1c_levels.as_slice(),
    }))
}

async fn bp_plan(
    State(state): State<AppState>,
    Query(query): Query<BpQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    tracing::debug!("BP lookup: {:?}", query);

    let plan = find_bp_plan(&state.data.bp, &query)
        .ok_or_else(|| AppError::NotFound(not_found_message(Condition::BloodPressure)))?;

    plan_response(Condition::BloodPressure, plan, bp_sections(plan))
}

async fn diabetes_plan(
    State(state): State<AppState>,
    Query(query): Query<DiabetesQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    tracing::debug!("Diabetes lookup: {:?}", query);

    let plan = find_diabetes_plan(&state.data.diabetes, &query)
        .ok_or_else(|| AppError::NotFound(not_found_message(Condition::Diabetes)))?;

    plan_response(Condition::Diabetes, plan, diabetes_sections(plan))
}

fn plan_response<P: Serialize>(
    condition: Condition,
    plan: &P,
    sections: Vec<PlanSection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let plan = serde_json::to_value(plan)
        .map_err(|e| AppError::Internal(format!("JSON serialization error: {}", e)))?;

    Ok(Json(serde_json::json!({
        "condition": condition,
        "plan": plan,
        "sections": sections,
    })))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
enum AppError {
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                tracing::error!("{}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
