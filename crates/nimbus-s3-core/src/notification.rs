//! S3-style event notification records.
//!
//! When a bucket event is bridged onto a queue, the message body is a JSON
//! document shaped like the records an object store pushes to its
//! notification targets, so consuming code can parse it the same way it
//! would parse the real thing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::{BucketEvent, BucketEventKind};

/// A notification document holding one or more event records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3EventNotification {
    /// The event records.
    #[serde(rename = "Records")]
    pub records: Vec<S3EventRecord>,
}

/// A single event record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3EventRecord {
    /// The service that emitted the event.
    pub event_source: String,
    /// The event name (e.g. `ObjectCreated:Put`).
    pub event_name: String,
    /// When the event was emitted.
    pub event_time: DateTime<Utc>,
    /// Bucket and object details.
    pub s3: S3Entity,
}

/// The `s3` element of an event record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Entity {
    /// The bucket the event concerns.
    pub bucket: S3BucketEntity,
    /// The object the event concerns.
    pub object: S3ObjectEntity,
}

/// Bucket details within an event record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3BucketEntity {
    /// Bucket name.
    pub name: String,
    /// Bucket ARN.
    pub arn: String,
}

/// Object details within an event record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3ObjectEntity {
    /// Object key.
    pub key: String,
    /// Content length in bytes.
    pub size: u64,
    /// Content fingerprint.
    pub e_tag: String,
}

impl S3EventNotification {
    /// Build a single-record notification from a bucket event.
    #[must_use]
    pub fn from_event(kind: BucketEventKind, event: &BucketEvent) -> Self {
        Self {
            records: vec![S3EventRecord {
                event_source: "aws:s3".to_owned(),
                event_name: kind.as_str().to_owned(),
                event_time: Utc::now(),
                s3: S3Entity {
                    bucket: S3BucketEntity {
                        name: event.bucket.clone(),
                        arn: format!("arn:aws:s3:::{}", event.bucket),
                    },
                    object: S3ObjectEntity {
                        key: event.key.clone(),
                        size: event.size,
                        e_tag: event.etag.clone(),
                    },
                },
            }],
        }
    }
}
