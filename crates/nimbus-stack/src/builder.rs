//! Two-phase topology builder.
//!
//! Phase 1 creates every named component; phase 2 resolves subscriptions
//! against the completed set. Splitting the passes makes resolution
//! independent of template iteration order: a topic may subscribe to a
//! queue declared after it.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::engine::NimbusEngine;
use crate::error::StackError;
use crate::template::{
    ResourceSpec, StackTemplate, SubscriptionProtocol, SubscriptionSpec, TopicSpec,
};

/// Handle to a component created in phase 1, keyed by logical resource
/// name for phase-2 reference resolution.
enum BuiltResource {
    Queue { url: String },
    Topic,
    Bucket,
}

/// Interpret a template against an engine: create all components, then
/// wire all cross-resource subscriptions.
pub(crate) fn build(engine: &NimbusEngine, template: &StackTemplate) -> Result<(), StackError> {
    let mut built: HashMap<&str, BuiltResource> = HashMap::new();

    // Phase 1: create every named component.
    for (logical, spec) in &template.resources {
        match spec {
            ResourceSpec::Queue(queue) => {
                let created = engine.sqs().create_queue(&queue.queue_name)?;
                built.insert(
                    logical.as_str(),
                    BuiltResource::Queue {
                        url: created.url.clone(),
                    },
                );
            }
            ResourceSpec::Topic(topic) => {
                engine.sns().create_topic(&topic.topic_name)?;
                built.insert(logical.as_str(), BuiltResource::Topic);
            }
            ResourceSpec::Bucket(bucket) => {
                engine.s3().create_bucket(&bucket.bucket_name)?;
                built.insert(logical.as_str(), BuiltResource::Bucket);
            }
            ResourceSpec::Function(function) => {
                debug!(
                    resource = %logical,
                    function = %function.function_name,
                    "skipping function resource; handlers are registered through the engine"
                );
            }
            ResourceSpec::Alarm
            | ResourceSpec::Role
            | ResourceSpec::Policy
            | ResourceSpec::ManagedPolicy
            | ResourceSpec::QueuePolicy
            | ResourceSpec::FunctionPermission
            | ResourceSpec::FunctionVersion
            | ResourceSpec::EventRule => {
                debug!(resource = %logical, "ignoring resource kind");
            }
            ResourceSpec::Unknown => {
                return Err(StackError::UnsupportedResource {
                    name: logical.clone(),
                });
            }
        }
    }

    // Phase 2: wire subscriptions now that every referenced component
    // exists.
    for spec in template.resources.values() {
        if let ResourceSpec::Topic(topic) = spec {
            for subscription in &topic.subscriptions {
                wire_subscription(engine, &built, topic, subscription)?;
            }
        }
    }

    info!(
        resources = template.resources.len(),
        "stack topology built"
    );
    Ok(())
}

fn wire_subscription(
    engine: &NimbusEngine,
    built: &HashMap<&str, BuiltResource>,
    topic: &TopicSpec,
    subscription: &SubscriptionSpec,
) -> Result<(), StackError> {
    if subscription.protocol != SubscriptionProtocol::Sqs {
        return Err(StackError::UnsupportedProtocol {
            topic: topic.topic_name.clone(),
            protocol: subscription.protocol.as_str().to_owned(),
        });
    }

    if let Some(endpoint) = &subscription.endpoint {
        return Err(StackError::LiteralEndpointUnsupported {
            endpoint: endpoint.clone(),
        });
    }

    let Some(target) = &subscription.attribute_ref else {
        return Err(StackError::MissingSubscriptionTarget {
            topic: topic.topic_name.clone(),
        });
    };

    match built.get(target.resource.as_str()) {
        Some(BuiltResource::Queue { url }) => {
            debug!(
                topic = %topic.topic_name,
                resource = %target.resource,
                attribute = %target.attribute,
                "wiring topic subscription to queue"
            );
            let sqs = engine.sqs_shared();
            let url = url.clone();
            engine.sns().subscribe(
                &topic.topic_name,
                Arc::new(move |body: &str| {
                    sqs.send_message(&url, body)?;
                    Ok(())
                }),
            )?;
            Ok(())
        }
        Some(_) => Err(StackError::InvalidReference {
            topic: topic.topic_name.clone(),
            resource: target.resource.clone(),
        }),
        None => Err(StackError::UnknownResource {
            topic: topic.topic_name.clone(),
            resource: target.resource.clone(),
        }),
    }
}
