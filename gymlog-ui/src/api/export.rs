//! CSV export handler

use crate::api::{ApiError, Owner};
use crate::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use gymlog_common::csv;

/// GET /api/export - download the full log as `exercise_log.csv`
///
/// UTF-8 delimited text with the fixed header row; an empty log downloads
/// as header only.
pub async fn export_csv(
    State(state): State<AppState>,
    Extension(Owner(owner)): Extension<Owner>,
) -> Result<Response, ApiError> {
    let records = state.store.load(&owner).await?;
    let body = csv::to_portable_text(&records);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", csv::EXPORT_FILENAME),
            ),
        ],
        body,
    )
        .into_response())
}
