//! Top-level notification service state.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use nimbus_core::{AccountId, AwsRegion, ComponentIdentifier, ComponentKind, NimbusConfig};
use tracing::{debug, info};

use crate::error::SnsServiceError;
use crate::topic::{SnsTopic, TopicSubscriber};

/// Top-level notification service state for one engine instance.
///
/// Topics are registered under their name and indexed by their derived
/// ARN, so both resolve to the same instance.
pub struct SnsServiceState {
    region: AwsRegion,
    account_id: AccountId,
    topics: DashMap<String, Arc<SnsTopic>>,
    by_arn: DashMap<String, String>,
}

impl std::fmt::Debug for SnsServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnsServiceState")
            .field("topic_count", &self.topics.len())
            .finish_non_exhaustive()
    }
}

impl SnsServiceState {
    /// Create a new, empty service state using the engine configuration's
    /// region and account for derived ARNs.
    #[must_use]
    pub fn new(config: &NimbusConfig) -> Self {
        Self {
            region: config.default_region.clone(),
            account_id: config.account_id.clone(),
            topics: DashMap::new(),
            by_arn: DashMap::new(),
        }
    }

    /// Create a new topic with a freshly derived ARN.
    ///
    /// # Errors
    ///
    /// Returns [`SnsServiceError::TopicAlreadyExists`] if a topic with
    /// the same name exists.
    pub fn create_topic(&self, name: &str) -> Result<Arc<SnsTopic>, SnsServiceError> {
        match self.topics.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(SnsServiceError::TopicAlreadyExists {
                name: name.to_owned(),
            }),
            Entry::Vacant(entry) => {
                let topic = Arc::new(SnsTopic::new(name, &self.region, &self.account_id));
                self.by_arn.insert(topic.arn.clone(), name.to_owned());
                entry.insert(topic.clone());
                info!(topic = %name, arn = %topic.arn, "topic created");
                Ok(topic)
            }
        }
    }

    /// Resolve a topic by name or by derived ARN.
    ///
    /// # Errors
    ///
    /// Returns [`SnsServiceError::NoSuchTopic`] if nothing is registered
    /// under the given name or ARN.
    pub fn resolve(&self, topic: &str) -> Result<Arc<SnsTopic>, SnsServiceError> {
        let name = self
            .by_arn
            .get(topic)
            .map_or_else(|| topic.to_owned(), |entry| entry.value().clone());

        self.topics
            .get(&name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| SnsServiceError::NoSuchTopic {
                topic: topic.to_owned(),
            })
    }

    /// Register a subscriber on a topic.
    ///
    /// # Errors
    ///
    /// Returns [`SnsServiceError::NoSuchTopic`] if the topic does not
    /// exist.
    pub fn subscribe(
        &self,
        topic: &str,
        subscriber: TopicSubscriber,
    ) -> Result<(), SnsServiceError> {
        self.resolve(topic)?.subscribe(subscriber);
        Ok(())
    }

    /// Publish a message body to a topic, fanning it out to every
    /// subscriber synchronously in registration order. Returns the number
    /// of subscribers invoked.
    ///
    /// # Errors
    ///
    /// Returns [`SnsServiceError::NoSuchTopic`] if the topic does not
    /// exist. Subscriber failures are logged, never returned.
    pub fn publish(&self, topic: &str, body: &str) -> Result<usize, SnsServiceError> {
        let resolved = self.resolve(topic)?;
        debug!(topic = %resolved.name, "publishing message");
        Ok(resolved.deliver(body))
    }

    /// Identifiers for every topic in the service.
    #[must_use]
    pub fn identifiers(&self) -> Vec<ComponentIdentifier> {
        let mut ids: Vec<ComponentIdentifier> = self
            .topics
            .iter()
            .map(|entry| ComponentIdentifier {
                kind: ComponentKind::Topic,
                name: entry.key().clone(),
                endpoint: entry.value().arn.clone(),
            })
            .collect();
        ids.sort_by(|a, b| a.name.cmp(&b.name));
        ids
    }

    /// Reset all state, removing every topic and its subscribers.
    pub fn reset(&self) {
        debug!("resetting notification service state");
        self.topics.clear();
        self.by_arn.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    fn state() -> SnsServiceState {
        SnsServiceState::new(&NimbusConfig::default())
    }

    #[test]
    fn test_should_resolve_topic_by_name_and_arn() {
        let sns = state();
        let topic = sns
            .create_topic("alerts")
            .unwrap_or_else(|e| panic!("create failed: {e}"));

        let by_name = sns
            .resolve("alerts")
            .unwrap_or_else(|e| panic!("resolve by name failed: {e}"));
        let by_arn = sns
            .resolve(&topic.arn)
            .unwrap_or_else(|e| panic!("resolve by arn failed: {e}"));
        assert!(Arc::ptr_eq(&by_name, &by_arn));
    }

    #[test]
    fn test_should_reject_duplicate_topic() {
        let sns = state();
        sns.create_topic("dup")
            .unwrap_or_else(|e| panic!("first create failed: {e}"));

        let result = sns.create_topic("dup");
        assert!(
            matches!(result, Err(SnsServiceError::TopicAlreadyExists { .. })),
            "expected TopicAlreadyExists, got {result:?}"
        );
    }

    #[test]
    fn test_should_error_on_unknown_topic() {
        let sns = state();
        assert!(matches!(
            sns.publish("ghost", "hi"),
            Err(SnsServiceError::NoSuchTopic { .. })
        ));
    }

    #[test]
    fn test_should_publish_through_arn() {
        let sns = state();
        let arn = sns
            .create_topic("alerts")
            .unwrap_or_else(|e| panic!("create failed: {e}"))
            .arn
            .clone();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        sns.subscribe(
            "alerts",
            Arc::new(move |body: &str| {
                sink.lock().push(body.to_owned());
                Ok(())
            }),
        )
        .unwrap_or_else(|e| panic!("subscribe failed: {e}"));

        let delivered = sns
            .publish(&arn, "hello")
            .unwrap_or_else(|e| panic!("publish failed: {e}"));
        assert_eq!(delivered, 1);
        assert_eq!(*seen.lock(), vec!["hello"]);
    }

    #[test]
    fn test_should_list_topic_identifiers() {
        let sns = state();
        sns.create_topic("alerts")
            .unwrap_or_else(|e| panic!("create failed: {e}"));

        let ids = sns.identifiers();
        assert_eq!(ids.len(), 1);
        assert_eq!(ids[0].kind, ComponentKind::Topic);
        assert!(ids[0].endpoint.starts_with("arn:aws:sns:"));
    }
}
