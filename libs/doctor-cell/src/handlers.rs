use std::sync::Arc;

use axum::{
    extract::{Path, Query, RawQuery, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::FilterCriteria;
use crate::services::catalog::DirectoryCatalog;

/// Shared by every doctor-cell handler.
#[derive(Debug, Clone)]
pub struct DirectoryAppState {
    pub config: Arc<AppConfig>,
    pub catalog: DirectoryCatalog,
}

impl DirectoryAppState {
    pub fn new(config: AppConfig) -> Self {
        let catalog = DirectoryCatalog::new(config.suggestion_limit);
        Self {
            config: Arc::new(config),
            catalog,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    pub search: Option<String>,
    pub limit: Option<usize>,
}

// ==============================================================================
// PUBLIC HANDLERS
// ==============================================================================

/// Visible list, suggestions and canonical query for the given criteria.
/// The raw query is decoded by `FilterCriteria::from_query_str`.
#[axum::debug_handler]
pub async fn search_doctors(
    State(state): State<Arc<DirectoryAppState>>,
    RawQuery(query): RawQuery,
) -> Json<Value> {
    let criteria = FilterCriteria::from_query_str(query.as_deref().unwrap_or_default());
    let session = state.catalog.session(criteria);
    debug!("Serving directory view for query '{}'", session.query_string());

    Json(json!(session.to_view(state.catalog.loaded_at())))
}

#[axum::debug_handler]
pub async fn get_specialties(
    State(state): State<Arc<DirectoryAppState>>,
) -> Json<Value> {
    Json(json!({
        "specialties": state.catalog.specialties(),
        "loading": !state.catalog.is_loaded()
    }))
}

#[axum::debug_handler]
pub async fn get_suggestions(
    State(state): State<Arc<DirectoryAppState>>,
    Query(query): Query<SuggestionQuery>,
) -> Result<Json<Value>, AppError> {
    let criteria = FilterCriteria {
        search_text: query.search.unwrap_or_default(),
        ..FilterCriteria::default()
    };

    let session = match query.limit {
        Some(0) => return Err(AppError::BadRequest("limit must be at least 1".to_string())),
        Some(limit) => state.catalog.session_with_limit(criteria, limit),
        None => state.catalog.session(criteria),
    };

    Ok(Json(json!({
        "suggestions": session.suggestions(),
        "loading": session.is_loading()
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<DirectoryAppState>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let session = state.catalog.session(FilterCriteria::default());

    if session.is_loading() {
        return Err(AppError::Unavailable("Doctor directory is still loading".to_string()));
    }

    let doctor = session
        .find_doctor(&doctor_id)
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(json!(doctor)))
}
