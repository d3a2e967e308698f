//! Exercise catalog handlers

use crate::api::{ApiError, Owner};
use crate::AppState;
use axum::extract::State;
use axum::{Extension, Json};
use chrono::Utc;
use gymlog_common::catalog::CatalogAdd;
use gymlog_common::events::GymlogEvent;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Serialize)]
pub struct ExerciseListResponse {
    pub exercises: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddExerciseRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct AddExerciseResponse {
    /// `added` or `already_exists` (duplicate is a warning, not an error)
    pub status: CatalogAdd,
    pub exercises: Vec<String>,
}

/// GET /api/exercises - ordered catalog, seeded with defaults on first use
pub async fn list_exercises(
    State(state): State<AppState>,
    Extension(Owner(owner)): Extension<Owner>,
) -> Result<Json<ExerciseListResponse>, ApiError> {
    let exercises = state.store.catalog(&owner).await?;
    Ok(Json(ExerciseListResponse { exercises }))
}

/// POST /api/exercises - add a catalog entry
///
/// Blank names are rejected (400); an existing name leaves the catalog
/// unchanged and reports `already_exists`.
pub async fn add_exercise(
    State(state): State<AppState>,
    Extension(Owner(owner)): Extension<Owner>,
    Json(req): Json<AddExerciseRequest>,
) -> Result<Json<AddExerciseResponse>, ApiError> {
    let status = state.store.catalog_add(&owner, &req.name).await?;

    if status == CatalogAdd::Added {
        state.events.emit_lossy(GymlogEvent::CatalogChanged {
            name: req.name.trim().to_string(),
            owner: owner.clone(),
            timestamp: Utc::now(),
        });
        info!("Added exercise '{}' to catalog for '{}'", req.name.trim(), owner);
    }

    let exercises = state.store.catalog(&owner).await?;
    Ok(Json(AddExerciseResponse { status, exercises }))
}
