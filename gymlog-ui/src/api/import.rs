//! Bulk CSV import handler

use crate::api::{ApiError, Owner};
use crate::AppState;
use axum::extract::State;
use axum::{Extension, Json};
use chrono::Utc;
use gymlog_common::csv;
use gymlog_common::events::GymlogEvent;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub status: String,
    pub imported: usize,
}

/// POST /api/import - import a delimited-text payload
///
/// Every row is parsed and validated (same constraints as the form) before
/// anything is appended, so a malformed file is rejected whole with the
/// offending line number and leaves no partial state.
pub async fn import_csv(
    State(state): State<AppState>,
    Extension(Owner(owner)): Extension<Owner>,
    body: String,
) -> Result<Json<ImportResponse>, ApiError> {
    let records = csv::parse_portable_text(&body)?;

    state.store.append(&owner, &records).await?;

    state.events.emit_lossy(GymlogEvent::SetsImported {
        count: records.len(),
        owner: owner.clone(),
        timestamp: Utc::now(),
    });

    info!("Imported {} record(s) for '{}'", records.len(), owner);

    Ok(Json(ImportResponse {
        status: "ok".to_string(),
        imported: records.len(),
    }))
}
