//! Server-Sent Events endpoint
//!
//! Mirrors the in-process event bus to connected dashboard clients. Each
//! event is the JSON-serialized `GymlogEvent`; a heartbeat keeps idle
//! connections alive.

use crate::AppState;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// GET /api/events - SSE stream of log mutations
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!(
        "New SSE client connected ({} already active)",
        state.events.subscriber_count()
    );

    let mut rx = state.events.subscribe();

    let stream = async_stream::stream! {
        // Send initial connected status
        yield Ok(Event::default()
            .event("ConnectionStatus")
            .data("connected"));

        loop {
            match rx.recv().await {
                Ok(event) => {
                    match serde_json::to_string(&event) {
                        Ok(json) => yield Ok(Event::default().event("gymlog").data(json)),
                        Err(e) => warn!("SSE: failed to serialize event: {}", e),
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Slow client: drop the backlog, keep the connection
                    warn!("SSE subscriber lagged, {} event(s) skipped", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    )
}
