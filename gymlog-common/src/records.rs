//! Exercise set records and validation
//!
//! One validation path (`build_record`) serves both the interactive form and
//! bulk CSV import, so imported rows meet the same constraints as typed ones.

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used everywhere records are parsed or rendered (ISO-8601)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One logged exercise set
///
/// Identity is positional: records carry no key, duplicates are permitted and
/// distinguishable only by all-field equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    pub exercise: String,
    pub date: NaiveDate,
    pub reps: u32,
    pub weight: f64,
    pub set_number: u32,
}

/// Point consumed by the external chart renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub reps: u32,
    pub weight: f64,
}

/// Validate raw field values and build a record
///
/// Constraints:
/// - exercise: non-empty after trimming
/// - date: ISO-8601 calendar date (`YYYY-MM-DD`)
/// - reps: >= 1
/// - weight: >= 0 and finite
/// - set_number: >= 1
///
/// Returns `Error::InvalidInput` naming the offending field; nothing is
/// persisted by this function.
pub fn build_record(
    exercise: &str,
    date: &str,
    reps: i64,
    weight: f64,
    set_number: i64,
) -> Result<SetRecord> {
    let exercise = exercise.trim();
    if exercise.is_empty() {
        return Err(Error::InvalidInput("exercise must not be empty".to_string()));
    }

    let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|_| Error::InvalidInput(format!("date '{}' is not a valid YYYY-MM-DD date", date.trim())))?;

    if reps < 1 {
        return Err(Error::InvalidInput(format!("reps must be at least 1 (got {})", reps)));
    }
    let reps = u32::try_from(reps)
        .map_err(|_| Error::InvalidInput(format!("reps out of range (got {})", reps)))?;

    if !weight.is_finite() || weight < 0.0 {
        return Err(Error::InvalidInput(format!("weight must be a non-negative number (got {})", weight)));
    }

    if set_number < 1 {
        return Err(Error::InvalidInput(format!("set number must be at least 1 (got {})", set_number)));
    }
    let set_number = u32::try_from(set_number)
        .map_err(|_| Error::InvalidInput(format!("set number out of range (got {})", set_number)))?;

    Ok(SetRecord {
        exercise: exercise.to_string(),
        date,
        reps,
        weight,
        set_number,
    })
}

/// Exact-match filter on exercise name
pub fn filter_by_exercise(records: &[SetRecord], exercise: &str) -> Vec<SetRecord> {
    records
        .iter()
        .filter(|r| r.exercise == exercise)
        .cloned()
        .collect()
}

/// Project records into chart points, sorted by date ascending
pub fn chart_points(records: &[SetRecord]) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = records
        .iter()
        .map(|r| ChartPoint {
            date: r.date,
            reps: r.reps,
            weight: r.weight,
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}
