//! Parsed stack-template types.
//!
//! These are the typed form of a declarative stack document. Parsing the
//! document itself is an external concern; the types derive
//! `serde::Deserialize` so any external parser targeting JSON/YAML-like
//! structures can produce them directly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A parsed stack template: logical resource name to resource
/// description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackTemplate {
    /// The declared resources, keyed by logical name.
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceSpec>,
}

impl StackTemplate {
    /// Add a resource under a logical name (builder style, for tests and
    /// programmatic construction).
    #[must_use]
    pub fn with_resource(mut self, name: impl Into<String>, spec: ResourceSpec) -> Self {
        self.resources.insert(name.into(), spec);
        self
    }
}

/// A declared resource, tagged by kind.
///
/// The variant set is closed: every kind the original stack documents
/// may contain is listed, and the builder matches exhaustively.
/// Kinds with no emulated behavior (alarms, roles, policies, function
/// versions and permissions, event rules) are declared so templates
/// containing them build cleanly; anything else lands in [`Unknown`]
/// and is rejected.
///
/// [`Unknown`]: ResourceSpec::Unknown
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "properties", rename_all = "kebab-case")]
pub enum ResourceSpec {
    /// A message queue.
    Queue(QueueSpec),
    /// A notification topic, possibly with subscriptions.
    Topic(TopicSpec),
    /// An object-store bucket.
    Bucket(BucketSpec),
    /// A function. Handlers are registered programmatically through the
    /// engine, so the builder skips these.
    Function(FunctionSpec),
    /// Monitoring alarm — declared but not emulated.
    Alarm,
    /// IAM role — declared but not emulated.
    Role,
    /// IAM policy — declared but not emulated.
    Policy,
    /// IAM managed policy — declared but not emulated.
    ManagedPolicy,
    /// Queue access policy — declared but not emulated.
    QueuePolicy,
    /// Function invoke permission — declared but not emulated.
    FunctionPermission,
    /// Function version pin — declared but not emulated.
    FunctionVersion,
    /// Event rule — declared but not emulated.
    EventRule,
    /// Any kind outside the list above. Building a template containing
    /// one fails with an unsupported-resource error.
    #[serde(other)]
    Unknown,
}

/// Properties of a queue resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueSpec {
    /// The queue name to create.
    pub queue_name: String,
}

/// Properties of a topic resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSpec {
    /// The topic name to create.
    pub topic_name: String,
    /// Subscriptions to wire once every resource exists.
    #[serde(default)]
    pub subscriptions: Vec<SubscriptionSpec>,
}

/// Properties of a bucket resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketSpec {
    /// The bucket name to create.
    pub bucket_name: String,
}

/// Properties of a function resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSpec {
    /// The declared function name.
    pub function_name: String,
}

/// A topic subscription declaration.
///
/// The target is either a literal external endpoint (unsupported in an
/// in-process engine) or a symbolic reference to another resource's
/// derived endpoint attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSpec {
    /// The delivery protocol.
    pub protocol: SubscriptionProtocol,
    /// A literal endpoint address, if the document carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// A symbolic reference to another resource's derived attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_ref: Option<AttributeRef>,
}

impl SubscriptionSpec {
    /// An SQS subscription targeting another resource's derived endpoint
    /// (the common case in tests).
    #[must_use]
    pub fn queue_attribute(resource: impl Into<String>) -> Self {
        Self {
            protocol: SubscriptionProtocol::Sqs,
            endpoint: None,
            attribute_ref: Some(AttributeRef {
                resource: resource.into(),
                attribute: "Arn".to_owned(),
            }),
        }
    }

    /// A subscription carrying a literal endpoint address.
    #[must_use]
    pub fn literal_endpoint(protocol: SubscriptionProtocol, endpoint: impl Into<String>) -> Self {
        Self {
            protocol,
            endpoint: Some(endpoint.into()),
            attribute_ref: None,
        }
    }
}

/// Delivery protocols a subscription may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubscriptionProtocol {
    /// Deliver to a queue.
    Sqs,
    /// Deliver by invoking a function. Not wired by the builder.
    Lambda,
    /// Deliver over HTTPS. Not wired by the builder.
    Https,
}

impl SubscriptionProtocol {
    /// The protocol's wire name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sqs => "sqs",
            Self::Lambda => "lambda",
            Self::Https => "https",
        }
    }
}

/// A symbolic reference: "the derived attribute of resource X".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeRef {
    /// The logical name of the referenced resource.
    pub resource: String,
    /// The attribute to read (e.g. `Arn`). The referenced component's
    /// derived endpoint address is used regardless of spelling.
    pub attribute: String,
}
