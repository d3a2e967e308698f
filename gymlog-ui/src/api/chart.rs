//! Chart data handler
//!
//! Projects the filtered log into the `{date, reps, weight}` series the
//! browser-side chart renderer consumes; the server draws nothing.

use crate::api::{ApiError, Owner};
use crate::AppState;
use axum::extract::{Query, State};
use axum::{Extension, Json};
use gymlog_common::records::{self, ChartPoint};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    pub exercise: String,
}

#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub exercise: String,
    /// Sorted by date ascending
    pub points: Vec<ChartPoint>,
}

/// GET /api/chart?exercise= - chart projection for one exercise
pub async fn chart_data(
    State(state): State<AppState>,
    Extension(Owner(owner)): Extension<Owner>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ChartResponse>, ApiError> {
    let loaded = state.store.load(&owner).await?;
    let filtered = records::filter_by_exercise(&loaded, &query.exercise);
    let points = records::chart_points(&filtered);

    Ok(Json(ChartResponse {
        exercise: query.exercise,
        points,
    }))
}
