//! gymlog-ui library - workout dashboard HTTP service
//!
//! Stateless request-per-interaction service: every handler receives the
//! shared [`AppState`] (store, event bus, publisher, credentials) through
//! axum state — there is no ambient global.

use axum::Router;
use gymlog_common::auth::CredentialsFile;
use gymlog_common::events::EventBus;
use gymlog_common::publish::ChannelPublisher;
use gymlog_common::store::RecordStore;
use std::sync::Arc;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Record + catalog storage backend
    pub store: Arc<RecordStore>,
    /// In-process event bus mirrored over SSE
    pub events: EventBus,
    /// Outbound channel publisher
    pub publisher: Arc<ChannelPublisher>,
    /// Account database; `None` runs single-user with auth disabled
    pub credentials: Option<Arc<CredentialsFile>>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        store: RecordStore,
        events: EventBus,
        publisher: ChannelPublisher,
        credentials: Option<Arc<CredentialsFile>>,
    ) -> Self {
        Self {
            store: Arc::new(store),
            events,
            publisher: Arc::new(publisher),
            credentials,
        }
    }
}

/// Build application router
///
/// Record, catalog, import/export, chart and event routes sit behind the
/// auth middleware; the dashboard page, health and build info are public.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{delete, get, post};

    // Protected routes (owner resolved by auth middleware)
    let protected = Router::new()
        .route(
            "/api/records",
            get(api::list_records)
                .post(api::submit_set)
                .delete(api::clear_records),
        )
        .route("/api/records/:index", delete(api::delete_record))
        .route("/api/exercises", get(api::list_exercises).post(api::add_exercise))
        .route("/api/import", post(api::import_csv))
        .route("/api/export", get(api::export_csv))
        .route("/api/chart", get(api::chart_data))
        .route("/api/events", get(api::event_stream))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth_middleware,
        ));

    // Public routes (no authentication)
    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
