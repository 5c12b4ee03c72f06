//! Queue messages and delivery snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Delivery state of a message while it remains in its queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageStatus {
    /// Enqueued, never delivered.
    Pending,
    /// Delivered at least once; still logically present until deleted.
    InFlight,
}

/// A message held by a queue.
///
/// The receipt handle identifies the most recent delivery: every receive
/// issues a fresh one, invalidating the previous handle for the same
/// message.
#[derive(Debug, Clone)]
pub(crate) struct SqsMessage {
    pub(crate) message_id: String,
    pub(crate) body: String,
    pub(crate) sent_at: DateTime<Utc>,
    pub(crate) status: MessageStatus,
    pub(crate) receipt_handle: Option<String>,
}

impl SqsMessage {
    pub(crate) fn new(body: &str) -> Self {
        Self {
            message_id: uuid::Uuid::new_v4().to_string(),
            body: body.to_owned(),
            sent_at: Utc::now(),
            status: MessageStatus::Pending,
            receipt_handle: None,
        }
    }
}

/// A delivered message as seen by the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedMessage {
    /// Server-assigned message ID, stable across redeliveries.
    pub message_id: String,
    /// Handle for this delivery; required to delete the message.
    pub receipt_handle: String,
    /// The message body, unchanged from what was sent.
    pub body: String,
    /// When the message was enqueued.
    pub sent_at: DateTime<Utc>,
}
