//! Bucket event subscriptions and synchronous dispatch.
//!
//! Subscribers register interest in an event kind on a specific bucket and
//! are invoked synchronously, in registration order, on the writer's
//! thread. A subscriber may call into other services (queues, topics); it
//! must not write back into the same bucket in a way that recurses without
//! bound — that is the caller's responsibility to avoid.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The kinds of bucket events that can be subscribed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BucketEventKind {
    /// An object was written (created or replaced).
    ObjectCreated,
}

impl BucketEventKind {
    /// The event name used in notification records.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ObjectCreated => "ObjectCreated:Put",
        }
    }
}

impl fmt::Display for BucketEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload delivered to bucket-event subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketEvent {
    /// The bucket the object was written to.
    pub bucket: String,
    /// The key that was written.
    pub key: String,
    /// Content length of the written object.
    pub size: u64,
    /// Content fingerprint of the written object.
    pub etag: String,
}

/// A bucket-event subscriber callback.
///
/// Failures are logged per subscriber and never abort dispatch to the
/// remaining subscribers, nor do they propagate to the writer.
pub type EventSubscriber = Arc<dyn Fn(&BucketEvent) -> anyhow::Result<()> + Send + Sync>;

/// Registry of bucket-event subscribers, keyed by bucket and event kind.
#[derive(Default)]
pub struct BucketEventBus {
    subscribers: DashMap<(String, BucketEventKind), Vec<EventSubscriber>>,
}

impl fmt::Debug for BucketEventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketEventBus")
            .field("subscription_keys", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl BucketEventBus {
    /// Create an empty event bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber for an event kind on a bucket.
    pub fn subscribe(&self, bucket: &str, kind: BucketEventKind, subscriber: EventSubscriber) {
        debug!(bucket, event = %kind, "bucket event subscriber registered");
        self.subscribers
            .entry((bucket.to_owned(), kind))
            .or_default()
            .push(subscriber);
    }

    /// Number of subscribers for an event kind on a bucket.
    #[must_use]
    pub fn subscriber_count(&self, bucket: &str, kind: BucketEventKind) -> usize {
        self.subscribers
            .get(&(bucket.to_owned(), kind))
            .map_or(0, |subs| subs.len())
    }

    /// Dispatch an event to every subscriber registered for its bucket and
    /// kind, in registration order.
    ///
    /// The subscriber list is snapshotted before invocation so callbacks
    /// may re-enter the bus (e.g. register further subscribers) without
    /// deadlocking.
    pub fn dispatch(&self, kind: BucketEventKind, event: &BucketEvent) {
        let snapshot: Vec<EventSubscriber> = self
            .subscribers
            .get(&(event.bucket.clone(), kind))
            .map(|subs| subs.clone())
            .unwrap_or_default();

        for (i, subscriber) in snapshot.iter().enumerate() {
            if let Err(e) = subscriber(event) {
                warn!(
                    bucket = %event.bucket,
                    key = %event.key,
                    subscriber = i,
                    "bucket event subscriber failed: {e:#}"
                );
            }
        }
    }

    /// Drop all subscriptions.
    pub fn reset(&self) {
        self.subscribers.clear();
    }
}
