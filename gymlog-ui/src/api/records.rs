//! Record handlers: listing, form submission, deletion
//!
//! The submit path is the persist-then-publish pipeline: validate, append
//! via the record store, publish to the external channel (outcome reported,
//! never blocking), emit the local event.

use crate::api::{ApiError, Owner};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use gymlog_common::events::GymlogEvent;
use gymlog_common::publish::PublishOutcome;
use gymlog_common::records::{self, SetRecord};
use serde::{Deserialize, Serialize};
use tracing::info;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Exact-match exercise filter (optional)
    pub exercise: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecordListResponse {
    pub total: usize,
    pub records: Vec<SetRecord>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitSetRequest {
    pub exercise: String,
    pub date: String,
    pub reps: i64,
    pub weight: f64,
    pub set_number: i64,
}

#[derive(Debug, Serialize)]
pub struct SubmitSetResponse {
    pub status: String,
    pub record: SetRecord,
    /// Channel publish outcome; `failed` never rolls the record back
    pub published: PublishOutcome,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/records - list records, optionally filtered by exercise
pub async fn list_records(
    State(state): State<AppState>,
    Extension(Owner(owner)): Extension<Owner>,
    Query(query): Query<ListQuery>,
) -> Result<Json<RecordListResponse>, ApiError> {
    let mut loaded = state.store.load(&owner).await?;
    if let Some(exercise) = &query.exercise {
        loaded = records::filter_by_exercise(&loaded, exercise);
    }

    Ok(Json(RecordListResponse {
        total: loaded.len(),
        records: loaded,
    }))
}

/// POST /api/records - log one exercise set from the form
///
/// Validation failure appends nothing. Publish happens strictly after the
/// append succeeded.
pub async fn submit_set(
    State(state): State<AppState>,
    Extension(Owner(owner)): Extension<Owner>,
    Json(req): Json<SubmitSetRequest>,
) -> Result<Json<SubmitSetResponse>, ApiError> {
    let record = records::build_record(
        &req.exercise,
        &req.date,
        req.reps,
        req.weight,
        req.set_number,
    )?;

    state.store.append(&owner, std::slice::from_ref(&record)).await?;

    let published = state.publisher.publish_set(&record, &owner).await;

    state.events.emit_lossy(GymlogEvent::SetLogged {
        record: record.clone(),
        owner: owner.clone(),
        timestamp: Utc::now(),
    });

    info!(
        "Logged set: {} x{} @ {} (set {}) for '{}'",
        record.exercise, record.reps, record.weight, record.set_number, owner
    );

    Ok(Json(SubmitSetResponse {
        status: "ok".to_string(),
        record,
        published,
    }))
}

/// DELETE /api/records/:index - delete one record by position
///
/// 404 when the index is out of bounds; nothing else shifts except the
/// positions after the removed record.
pub async fn delete_record(
    State(state): State<AppState>,
    Extension(Owner(owner)): Extension<Owner>,
    Path(index): Path<usize>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_at(&owner, index).await?;

    state.events.emit_lossy(GymlogEvent::RecordDeleted {
        index,
        owner: owner.clone(),
        timestamp: Utc::now(),
    });

    info!("Deleted record at index {} for '{}'", index, owner);
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/records - truncate the whole log
///
/// Idempotent: truncating an empty log succeeds.
pub async fn clear_records(
    State(state): State<AppState>,
    Extension(Owner(owner)): Extension<Owner>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_all(&owner).await?;

    state.events.emit_lossy(GymlogEvent::LogCleared {
        owner: owner.clone(),
        timestamp: Utc::now(),
    });

    info!("Cleared exercise log for '{}'", owner);
    Ok(StatusCode::NO_CONTENT)
}
