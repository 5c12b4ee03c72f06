//! End-to-end tests for the Nimbus engine.
//!
//! These drive the engine through its facade the way embedding test code
//! would: build a topology from a template, then exercise the resulting
//! components.

use std::sync::Once;

use nimbus_stack::NimbusEngine;
use nimbus_stack::template::{BucketSpec, QueueSpec, SubscriptionSpec, TopicSpec};
use nimbus_stack::{ResourceSpec, StackTemplate};

static INIT: Once = Once::new();

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Create an engine with tracing initialized.
#[must_use]
pub fn engine() -> NimbusEngine {
    init_tracing();
    NimbusEngine::new()
}

/// Generate a unique component name for a test.
#[must_use]
pub fn test_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// The template used by the end-to-end tests: a queue, a topic
/// subscribing to it by attribute reference, and a bucket. The topic's
/// logical name sorts before the queue's so a single-pass builder would
/// hit the reference before the queue exists.
#[must_use]
pub fn sample_template() -> StackTemplate {
    StackTemplate::default()
        .with_resource(
            "Alerts",
            ResourceSpec::Topic(TopicSpec {
                topic_name: "alerts".to_owned(),
                subscriptions: vec![SubscriptionSpec::queue_attribute("WorkQueue")],
            }),
        )
        .with_resource(
            "Inbox",
            ResourceSpec::Bucket(BucketSpec {
                bucket_name: "inbox".to_owned(),
            }),
        )
        .with_resource(
            "WorkQueue",
            ResourceSpec::Queue(QueueSpec {
                queue_name: "work".to_owned(),
            }),
        )
}

mod test_events;
mod test_functions;
mod test_stack;
