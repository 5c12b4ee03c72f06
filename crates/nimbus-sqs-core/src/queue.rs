//! Queues and their message lifecycle.

use chrono::{DateTime, Utc};
use nimbus_core::{AccountId, AwsRegion, endpoint_token};
use parking_lot::Mutex;
use tracing::debug;

use crate::message::{MessageStatus, ReceivedMessage, SqsMessage};

/// A named, ordered holder of messages.
///
/// Insertion order is delivery order. The URL is generated at creation
/// time and carries a random token, so two engine instances never share
/// a queue address.
pub struct SqsQueue {
    /// Queue name.
    pub name: String,
    /// Derived queue URL, stable for the queue's lifetime.
    pub url: String,
    /// When the queue was created.
    pub created_at: DateTime<Utc>,

    messages: Mutex<Vec<SqsMessage>>,
}

impl std::fmt::Debug for SqsQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqsQueue")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("message_count", &self.len())
            .finish_non_exhaustive()
    }
}

impl SqsQueue {
    /// Create a new, empty queue with a freshly derived URL.
    #[must_use]
    pub fn new(name: impl Into<String>, region: &AwsRegion, account: &AccountId) -> Self {
        let name = name.into();
        let url = format!(
            "https://sqs.{region}.nimbus.local/{account}/{name}/{}",
            endpoint_token()
        );
        Self {
            name,
            url,
            created_at: Utc::now(),
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Append a new pending message to the tail. Returns the message ID.
    pub fn send(&self, body: &str) -> String {
        let message = SqsMessage::new(body);
        let message_id = message.message_id.clone();
        self.messages.lock().push(message);
        debug!(queue = %self.name, message_id = %message_id, "message enqueued");
        message_id
    }

    /// Deliver the oldest pending message, or — when every message has
    /// already been delivered — redeliver the oldest in-flight one.
    ///
    /// The message stays in the queue; each delivery issues a fresh
    /// receipt handle and invalidates the message's previous handle.
    /// Returns `None` when the queue holds no messages.
    pub fn receive(&self) -> Option<ReceivedMessage> {
        let mut messages = self.messages.lock();

        let index = messages
            .iter()
            .position(|m| m.status == MessageStatus::Pending)
            .or_else(|| {
                messages
                    .iter()
                    .position(|m| m.status == MessageStatus::InFlight)
            })?;

        let message = &mut messages[index];
        let receipt_handle = uuid::Uuid::new_v4().to_string();
        message.status = MessageStatus::InFlight;
        message.receipt_handle = Some(receipt_handle.clone());

        debug!(
            queue = %self.name,
            message_id = %message.message_id,
            "message delivered"
        );

        Some(ReceivedMessage {
            message_id: message.message_id.clone(),
            receipt_handle,
            body: message.body.clone(),
            sent_at: message.sent_at,
        })
    }

    /// Remove the message currently associated with the receipt handle.
    ///
    /// A stale or unknown handle is a no-op: redundant deletes are
    /// harmless under at-least-once delivery. Returns whether a message
    /// was removed.
    pub fn delete(&self, receipt_handle: &str) -> bool {
        let mut messages = self.messages.lock();
        match messages
            .iter()
            .position(|m| m.receipt_handle.as_deref() == Some(receipt_handle))
        {
            Some(index) => {
                let removed = messages.remove(index);
                debug!(
                    queue = %self.name,
                    message_id = %removed.message_id,
                    "message deleted"
                );
                true
            }
            None => {
                debug!(queue = %self.name, "ignoring stale receipt handle");
                false
            }
        }
    }

    /// Number of messages still held (pending and in flight).
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    /// Whether the queue holds no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
