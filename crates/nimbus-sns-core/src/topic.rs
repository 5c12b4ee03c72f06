//! Topics and subscriber fan-out.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use nimbus_core::{AccountId, AwsRegion, endpoint_token};
use parking_lot::RwLock;
use tracing::{debug, warn};

/// A topic subscriber callback, invoked with the raw published body.
///
/// Errors are logged per subscriber; they never abort fan-out to the
/// remaining subscribers and never propagate to the publisher.
pub type TopicSubscriber = Arc<dyn Fn(&str) -> anyhow::Result<()> + Send + Sync>;

/// A named fan-out target with an ordered set of subscriber callbacks.
pub struct SnsTopic {
    /// Topic name.
    pub name: String,
    /// Derived topic ARN, stable for the topic's lifetime.
    pub arn: String,
    /// When the topic was created.
    pub created_at: DateTime<Utc>,

    subscribers: RwLock<Vec<TopicSubscriber>>,
}

impl std::fmt::Debug for SnsTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnsTopic")
            .field("name", &self.name)
            .field("arn", &self.arn)
            .field("subscriber_count", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

impl SnsTopic {
    /// Create a new topic with a freshly derived ARN.
    #[must_use]
    pub fn new(name: impl Into<String>, region: &AwsRegion, account: &AccountId) -> Self {
        let name = name.into();
        let arn = format!("arn:aws:sns:{region}:{account}:{name}/{}", endpoint_token());
        Self {
            name,
            arn,
            created_at: Utc::now(),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Register a subscriber. Subscribers are invoked in registration
    /// order; there is no unsubscribe.
    pub fn subscribe(&self, subscriber: TopicSubscriber) {
        self.subscribers.write().push(subscriber);
        debug!(topic = %self.name, "topic subscriber registered");
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Deliver a message body to every subscriber, synchronously, in
    /// registration order. Returns the number of subscribers invoked.
    ///
    /// The subscriber list is snapshotted before invocation so callbacks
    /// may re-enter the service without deadlocking.
    pub fn deliver(&self, body: &str) -> usize {
        let snapshot: Vec<TopicSubscriber> = self.subscribers.read().clone();

        for (i, subscriber) in snapshot.iter().enumerate() {
            if let Err(e) = subscriber(body) {
                warn!(topic = %self.name, subscriber = i, "topic subscriber failed: {e:#}");
            }
        }

        snapshot.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
