//! The engine facade.
//!
//! [`NimbusEngine`] owns one instance of each service state and exposes
//! the union of operations calling test code needs. There is no ambient
//! registry: two engines are fully independent, and everything a test
//! creates dies with the engine value.

use std::io::Read;
use std::sync::Arc;

use bytes::Bytes;
use nimbus_core::{ComponentIdentifier, NimbusConfig};
use nimbus_lambda_core::{LambdaHandler, LambdaRegistry};
use nimbus_s3_core::{
    BucketEvent, BucketEventKind, EventSubscriber, S3EventNotification, S3Object, S3ServiceState,
};
use nimbus_sns_core::{SnsServiceState, TopicSubscriber};
use nimbus_sqs_core::{ReceivedMessage, SqsServiceState};
use tracing::debug;

use crate::builder;
use crate::error::StackError;
use crate::template::StackTemplate;

/// The coordinating facade over all four service components.
pub struct NimbusEngine {
    config: NimbusConfig,
    s3: Arc<S3ServiceState>,
    sqs: Arc<SqsServiceState>,
    sns: Arc<SnsServiceState>,
    lambda: Arc<LambdaRegistry>,
}

impl std::fmt::Debug for NimbusEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NimbusEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for NimbusEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl NimbusEngine {
    /// Create an engine with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(NimbusConfig::default())
    }

    /// Create an engine with the given configuration.
    #[must_use]
    pub fn with_config(config: NimbusConfig) -> Self {
        Self {
            s3: Arc::new(S3ServiceState::new()),
            sqs: Arc::new(SqsServiceState::new(&config)),
            sns: Arc::new(SnsServiceState::new(&config)),
            lambda: Arc::new(LambdaRegistry::new(&config)),
            config,
        }
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &NimbusConfig {
        &self.config
    }

    /// The object-store component.
    #[must_use]
    pub fn s3(&self) -> &S3ServiceState {
        &self.s3
    }

    /// The queue component.
    #[must_use]
    pub fn sqs(&self) -> &SqsServiceState {
        &self.sqs
    }

    /// The notification component.
    #[must_use]
    pub fn sns(&self) -> &SnsServiceState {
        &self.sns
    }

    /// The function registry.
    #[must_use]
    pub fn lambda(&self) -> &LambdaRegistry {
        &self.lambda
    }

    pub(crate) fn sqs_shared(&self) -> Arc<SqsServiceState> {
        Arc::clone(&self.sqs)
    }

    /// Interpret a parsed stack template: create every declared
    /// component, then wire cross-resource subscriptions.
    pub fn build_stack(&self, template: &StackTemplate) -> Result<(), StackError> {
        builder::build(self, template)
    }

    // -- object store ------------------------------------------------------

    /// Create a bucket.
    pub fn create_bucket(&self, name: &str) -> Result<(), StackError> {
        Ok(self.s3.create_bucket(name)?)
    }

    /// Write an object from in-memory content (bytes or text).
    pub fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content: impl Into<Bytes>,
    ) -> Result<S3Object, StackError> {
        Ok(self.s3.put_object(bucket, key, content.into())?)
    }

    /// Write an object by draining a reader.
    pub fn put_object_from_reader(
        &self,
        bucket: &str,
        key: &str,
        reader: &mut dyn Read,
    ) -> Result<S3Object, StackError> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;
        Ok(self.s3.put_object(bucket, key, Bytes::from(content))?)
    }

    /// Read an object, or `Ok(None)` if the key is absent.
    pub fn get_object(&self, bucket: &str, key: &str) -> Result<Option<S3Object>, StackError> {
        Ok(self.s3.get_object(bucket, key)?)
    }

    /// Subscribe a callback to a bucket's events.
    pub fn subscribe_bucket_events(
        &self,
        bucket: &str,
        kind: BucketEventKind,
        subscriber: EventSubscriber,
    ) -> Result<(), StackError> {
        Ok(self.s3.subscribe(bucket, kind, subscriber)?)
    }

    /// Bridge a bucket's events onto a queue.
    ///
    /// Every matching event is serialized as an S3-style notification
    /// record and sent to the queue. The queue must exist when the
    /// bridge is registered; its resolution is pinned to the queue's URL
    /// so later renames cannot redirect it.
    pub fn subscribe_queue_to_bucket_events(
        &self,
        queue: &str,
        bucket: &str,
        kind: BucketEventKind,
    ) -> Result<(), StackError> {
        let url = self.sqs.queue_url(queue)?;
        let sqs = Arc::clone(&self.sqs);

        self.s3.subscribe(
            bucket,
            kind,
            Arc::new(move |event: &BucketEvent| {
                let notification = S3EventNotification::from_event(kind, event);
                let body = serde_json::to_string(&notification)?;
                debug!(queue = %url, key = %event.key, "bucket event bridged to queue");
                sqs.send_message(&url, &body)?;
                Ok(())
            }),
        )?;
        Ok(())
    }

    // -- queues ------------------------------------------------------------

    /// Create a queue; returns its derived URL.
    pub fn create_queue(&self, name: &str) -> Result<String, StackError> {
        Ok(self.sqs.create_queue(name)?.url.clone())
    }

    /// The derived URL for a queue name.
    pub fn queue_url(&self, name: &str) -> Result<String, StackError> {
        Ok(self.sqs.queue_url(name)?)
    }

    /// Send a message to a queue (by name or URL); returns the message
    /// ID.
    pub fn send_message(&self, queue: &str, body: &str) -> Result<String, StackError> {
        Ok(self.sqs.send_message(queue, body)?)
    }

    /// Deliver the next message from a queue, or `Ok(None)` if it holds
    /// none.
    pub fn receive_message(&self, queue: &str) -> Result<Option<ReceivedMessage>, StackError> {
        Ok(self.sqs.receive_message(queue)?)
    }

    /// Delete a delivered message by receipt handle. Stale handles are a
    /// no-op.
    pub fn delete_message(&self, queue: &str, receipt_handle: &str) -> Result<(), StackError> {
        Ok(self.sqs.delete_message(queue, receipt_handle)?)
    }

    // -- topics ------------------------------------------------------------

    /// Create a topic; returns its derived ARN.
    pub fn create_topic(&self, name: &str) -> Result<String, StackError> {
        Ok(self.sns.create_topic(name)?.arn.clone())
    }

    /// Subscribe a callback to a topic (by name or ARN).
    pub fn subscribe_topic(
        &self,
        topic: &str,
        subscriber: TopicSubscriber,
    ) -> Result<(), StackError> {
        Ok(self.sns.subscribe(topic, subscriber)?)
    }

    /// Publish a message body to a topic (by name or ARN); returns the
    /// number of subscribers invoked.
    pub fn publish(&self, topic: &str, body: &str) -> Result<usize, StackError> {
        Ok(self.sns.publish(topic, body)?)
    }

    // -- functions ---------------------------------------------------------

    /// Register a function handler under a name.
    pub fn register_function(&self, name: &str, handler: LambdaHandler) -> Result<(), StackError> {
        Ok(self.lambda.register(name, handler)?)
    }

    /// Invoke a registered function synchronously with an opaque payload.
    pub fn invoke_function(
        &self,
        name: &str,
        payload: impl Into<Bytes>,
    ) -> Result<Bytes, StackError> {
        Ok(self.lambda.invoke(name, payload.into())?)
    }

    // -- inventory ---------------------------------------------------------

    /// Identifiers for every component the engine owns, across all four
    /// services.
    #[must_use]
    pub fn component_identifiers(&self) -> Vec<ComponentIdentifier> {
        let mut ids = Vec::new();
        ids.extend(self.sqs.identifiers());
        ids.extend(self.sns.identifiers());
        ids.extend(self.s3.identifiers());
        ids.extend(self.lambda.identifiers());
        ids
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
