//! Top-level queue service state.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use nimbus_core::{AccountId, AwsRegion, ComponentIdentifier, ComponentKind, NimbusConfig};
use tracing::{debug, info};

use crate::error::SqsServiceError;
use crate::message::ReceivedMessage;
use crate::queue::SqsQueue;

/// Top-level queue service state for one engine instance.
///
/// Queues are registered under their name and indexed by their derived
/// URL, so both resolve to the same instance.
pub struct SqsServiceState {
    region: AwsRegion,
    account_id: AccountId,
    queues: DashMap<String, Arc<SqsQueue>>,
    by_url: DashMap<String, String>,
}

impl std::fmt::Debug for SqsServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqsServiceState")
            .field("queue_count", &self.queues.len())
            .finish_non_exhaustive()
    }
}

impl SqsServiceState {
    /// Create a new, empty service state using the engine configuration's
    /// region and account for derived URLs.
    #[must_use]
    pub fn new(config: &NimbusConfig) -> Self {
        Self {
            region: config.default_region.clone(),
            account_id: config.account_id.clone(),
            queues: DashMap::new(),
            by_url: DashMap::new(),
        }
    }

    /// Create a new queue with a freshly derived URL.
    ///
    /// # Errors
    ///
    /// Returns [`SqsServiceError::QueueAlreadyExists`] if a queue with
    /// the same name exists.
    pub fn create_queue(&self, name: &str) -> Result<Arc<SqsQueue>, SqsServiceError> {
        match self.queues.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(SqsServiceError::QueueAlreadyExists {
                name: name.to_owned(),
            }),
            Entry::Vacant(entry) => {
                let queue = Arc::new(SqsQueue::new(name, &self.region, &self.account_id));
                self.by_url.insert(queue.url.clone(), name.to_owned());
                entry.insert(queue.clone());
                info!(queue = %name, url = %queue.url, "queue created");
                Ok(queue)
            }
        }
    }

    /// Resolve a queue by name or by derived URL.
    ///
    /// # Errors
    ///
    /// Returns [`SqsServiceError::NoSuchQueue`] if nothing is registered
    /// under the given name or URL.
    pub fn resolve(&self, queue: &str) -> Result<Arc<SqsQueue>, SqsServiceError> {
        let name = self
            .by_url
            .get(queue)
            .map_or_else(|| queue.to_owned(), |entry| entry.value().clone());

        self.queues
            .get(&name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| SqsServiceError::NoSuchQueue {
                queue: queue.to_owned(),
            })
    }

    /// The derived URL for a queue name.
    ///
    /// # Errors
    ///
    /// Returns [`SqsServiceError::NoSuchQueue`] if the queue does not
    /// exist.
    pub fn queue_url(&self, name: &str) -> Result<String, SqsServiceError> {
        Ok(self.resolve(name)?.url.clone())
    }

    /// Append a message to a queue. Returns the message ID.
    ///
    /// # Errors
    ///
    /// Returns [`SqsServiceError::NoSuchQueue`] if the queue does not
    /// exist.
    pub fn send_message(&self, queue: &str, body: &str) -> Result<String, SqsServiceError> {
        Ok(self.resolve(queue)?.send(body))
    }

    /// Deliver the next message from a queue, or `Ok(None)` if the queue
    /// holds no messages. Never blocks and never removes the message.
    ///
    /// # Errors
    ///
    /// Returns [`SqsServiceError::NoSuchQueue`] if the queue does not
    /// exist.
    pub fn receive_message(
        &self,
        queue: &str,
    ) -> Result<Option<ReceivedMessage>, SqsServiceError> {
        Ok(self.resolve(queue)?.receive())
    }

    /// Delete the message currently associated with a receipt handle.
    ///
    /// A stale or unknown handle is a logged no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SqsServiceError::NoSuchQueue`] if the queue does not
    /// exist.
    pub fn delete_message(&self, queue: &str, receipt_handle: &str) -> Result<(), SqsServiceError> {
        self.resolve(queue)?.delete(receipt_handle);
        Ok(())
    }

    /// Identifiers for every queue in the service.
    #[must_use]
    pub fn identifiers(&self) -> Vec<ComponentIdentifier> {
        let mut ids: Vec<ComponentIdentifier> = self
            .queues
            .iter()
            .map(|entry| ComponentIdentifier {
                kind: ComponentKind::Queue,
                name: entry.key().clone(),
                endpoint: entry.value().url.clone(),
            })
            .collect();
        ids.sort_by(|a, b| a.name.cmp(&b.name));
        ids
    }

    /// Reset all state, removing every queue.
    pub fn reset(&self) {
        debug!("resetting queue service state");
        self.queues.clear();
        self.by_url.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
