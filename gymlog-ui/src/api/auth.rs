//! Authentication middleware for gymlog-ui
//!
//! Verifies HTTP Basic credentials against the operator-provisioned
//! credentials file and attaches the username as the record owner for the
//! request. Without a credentials file the service runs single-user and
//! every request is owned by `local`.
//!
//! **Note:** Applied to protected routes only; the dashboard page, health
//! and build info endpoints do NOT use this middleware.

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::json;
use tracing::warn;

/// Owner the requests resolve to when authentication is disabled
pub const SINGLE_USER_OWNER: &str = "local";

/// Resolved record owner for the current request
#[derive(Debug, Clone)]
pub struct Owner(pub String);

/// Authentication middleware
///
/// Returns 401 Unauthorized when credentials are required and missing or
/// wrong; malformed Authorization headers are 400.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let credentials = match &state.credentials {
        Some(credentials) => credentials.clone(),
        None => {
            // Auth disabled - single-user mode
            request
                .extensions_mut()
                .insert(Owner(SINGLE_USER_OWNER.to_string()));
            return Ok(next.run(request).await);
        }
    };

    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let encoded = header_value
        .strip_prefix("Basic ")
        .ok_or(AuthError::MissingCredentials)?;
    let decoded = BASE64
        .decode(encoded.trim())
        .map_err(|_| AuthError::MalformedHeader)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthError::MalformedHeader)?;
    let (username, password) = decoded.split_once(':').ok_or(AuthError::MalformedHeader)?;

    match credentials.verify(username, password) {
        Some(entry) => {
            request.extensions_mut().insert(Owner(entry.username.clone()));
            Ok(next.run(request).await)
        }
        None => {
            warn!("Rejected credentials for user '{}'", username);
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Authentication error types for HTTP responses
#[derive(Debug)]
pub enum AuthError {
    MissingCredentials,
    MalformedHeader,
    InvalidCredentials,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing credentials".to_string())
            }
            AuthError::MalformedHeader => {
                (StatusCode::BAD_REQUEST, "Malformed Authorization header".to_string())
            }
            AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static("Basic realm=\"gymlog\""),
            );
        }
        response
    }
}
