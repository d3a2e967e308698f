//! HTTP API handlers for gymlog-ui

pub mod auth;
pub mod buildinfo;
pub mod catalog;
pub mod chart;
pub mod export;
pub mod health;
pub mod import;
pub mod records;
pub mod sse;
pub mod ui;

pub use auth::{auth_middleware, Owner};
pub use buildinfo::get_build_info;
pub use catalog::{add_exercise, list_exercises};
pub use chart::chart_data;
pub use export::export_csv;
pub use health::health_routes;
pub use import::import_csv;
pub use records::{clear_records, delete_record, list_records, submit_set};
pub use sse::event_stream;
pub use ui::{serve_app_js, serve_index};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// API errors shared by the JSON handlers
///
/// Validation and parse failures are the caller's fault (400), a missing
/// record index is 404, storage failures are fatal to the interaction (500).
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Parse(String),
    NotFound(String),
    Storage(String),
}

impl From<gymlog_common::Error> for ApiError {
    fn from(e: gymlog_common::Error) -> Self {
        use gymlog_common::Error;
        match &e {
            Error::InvalidInput(_) => ApiError::Validation(e.to_string()),
            Error::CsvParse { .. } => ApiError::Parse(e.to_string()),
            Error::NotFound(_) => ApiError::NotFound(e.to_string()),
            _ => ApiError::Storage(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Parse(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Storage(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
