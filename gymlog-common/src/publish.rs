//! Outbound channel publisher
//!
//! Mirrors each newly persisted record to an external message channel as one
//! JSON object (one key per record field plus the owner, no envelope).
//! Best-effort, at-most-once: publish runs strictly after persistence, a
//! failure never rolls the record back, and there is no retry or backoff.
//! The outcome is returned to the caller instead of being swallowed, so the
//! interaction can report it.

use crate::records::{SetRecord, DATE_FORMAT};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("gymlog/", env!("CARGO_PKG_VERSION"));
const PUBLISH_TIMEOUT_SECS: u64 = 5;

/// Default channel identifier records are mirrored to
pub const DEFAULT_CHANNEL: &str = "GYM";

/// Result of a publish attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishOutcome {
    /// The broker accepted the payload
    Sent,
    /// No channel is configured; publishing is off
    Disabled,
    /// The send failed; the record stays persisted
    Failed,
}

/// Fire-and-forget publisher for a single named channel
pub struct ChannelPublisher {
    client: Option<reqwest::Client>,
    endpoint: Option<String>,
    channel: String,
}

impl ChannelPublisher {
    /// Build a publisher for `broker_url`, posting to `{broker_url}/{channel}`
    ///
    /// Client construction failure is fatal: a configured channel that cannot
    /// be set up ends the session at startup rather than degrading silently.
    pub fn new(broker_url: &str, channel: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(PUBLISH_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Config(format!("failed to build channel client: {}", e)))?;

        Ok(Self {
            client: Some(client),
            endpoint: Some(broker_url.trim_end_matches('/').to_string()),
            channel: channel.to_string(),
        })
    }

    /// A publisher with no channel configured; every publish is `Disabled`
    pub fn disabled() -> Self {
        Self {
            client: None,
            endpoint: None,
            channel: DEFAULT_CHANNEL.to_string(),
        }
    }

    /// Channel identifier this publisher targets
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Publish one record; never errors, never blocks correctness
    pub async fn publish_set(&self, record: &SetRecord, owner: &str) -> PublishOutcome {
        let (client, endpoint) = match (&self.client, &self.endpoint) {
            (Some(client), Some(endpoint)) => (client, endpoint),
            _ => return PublishOutcome::Disabled,
        };

        let payload = json!({
            "exercise": record.exercise,
            "date": record.date.format(DATE_FORMAT).to_string(),
            "reps": record.reps,
            "weight": record.weight,
            "set_number": record.set_number,
            "owner": owner,
        });

        let url = format!("{}/{}", endpoint, self.channel);
        match client.post(&url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Published set to channel {}", self.channel);
                PublishOutcome::Sent
            }
            Ok(response) => {
                warn!(
                    "Channel {} rejected publish: HTTP {}",
                    self.channel,
                    response.status()
                );
                PublishOutcome::Failed
            }
            Err(e) => {
                warn!("Failed to publish to channel {}: {}", self.channel, e);
                PublishOutcome::Failed
            }
        }
    }
}
