//! Buckets.

use std::collections::BTreeMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;

use super::object::S3Object;

/// A named container of keyed objects.
///
/// Thread-safe: the object map sits behind a `parking_lot::RwLock`, so a
/// shared reference suffices for both reads and writes. Keys are kept in a
/// `BTreeMap` so listings come out sorted.
pub struct S3Bucket {
    /// Bucket name.
    pub name: String,
    /// The bucket's ARN.
    pub arn: String,
    /// When the bucket was created.
    pub creation_date: DateTime<Utc>,

    objects: RwLock<BTreeMap<String, S3Object>>,
}

impl std::fmt::Debug for S3Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Bucket")
            .field("name", &self.name)
            .field("object_count", &self.object_count())
            .finish_non_exhaustive()
    }
}

impl S3Bucket {
    /// Create a new, empty bucket.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let arn = format!("arn:aws:s3:::{name}");
        Self {
            name,
            arn,
            creation_date: Utc::now(),
            objects: RwLock::new(BTreeMap::new()),
        }
    }

    /// Store content under a key, creating the object or replacing its
    /// content wholesale. Returns a snapshot of the stored object.
    pub fn put_object(&self, key: &str, content: Bytes) -> S3Object {
        let object = S3Object::new(key, content);
        let snapshot = object.clone();
        let replaced = self.objects.write().insert(key.to_owned(), object);
        debug!(
            bucket = %self.name,
            key,
            size = snapshot.size,
            replaced = replaced.is_some(),
            "object written"
        );
        snapshot
    }

    /// Get a snapshot of the object under a key, if present.
    #[must_use]
    pub fn object(&self, key: &str) -> Option<S3Object> {
        self.objects.read().get(key).cloned()
    }

    /// Whether an object exists under the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.objects.read().contains_key(key)
    }

    /// All keys in the bucket, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.objects.read().keys().cloned().collect()
    }

    /// Number of objects in the bucket.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.read().len()
    }

    /// Whether the bucket holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}
