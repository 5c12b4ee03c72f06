//! Top-level object-store service state.
//!
//! [`S3ServiceState`] manages the collection of buckets and the bucket
//! event bus. All operations are thread-safe via `DashMap`; no external
//! locking is required.

use bytes::Bytes;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use nimbus_core::{ComponentIdentifier, ComponentKind};
use tracing::{debug, info};

use crate::error::S3ServiceError;
use crate::events::{BucketEvent, BucketEventBus, BucketEventKind, EventSubscriber};

use super::bucket::S3Bucket;
use super::object::S3Object;

/// Top-level object-store state holding all buckets and event
/// subscriptions for one engine instance.
#[derive(Default)]
pub struct S3ServiceState {
    buckets: DashMap<String, S3Bucket>,
    events: BucketEventBus,
}

impl std::fmt::Debug for S3ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3ServiceState")
            .field("bucket_count", &self.buckets.len())
            .finish_non_exhaustive()
    }
}

impl S3ServiceState {
    /// Create a new, empty service state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new bucket.
    ///
    /// # Errors
    ///
    /// Returns [`S3ServiceError::BucketAlreadyExists`] if a bucket with
    /// the same name exists.
    pub fn create_bucket(&self, name: &str) -> Result<(), S3ServiceError> {
        match self.buckets.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(S3ServiceError::BucketAlreadyExists {
                bucket: name.to_owned(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(S3Bucket::new(name));
                info!(bucket = %name, "bucket created");
                Ok(())
            }
        }
    }

    /// Store content under a key, creating or wholesale-replacing the
    /// object, then dispatch an `ObjectCreated` event to the bucket's
    /// subscribers before returning.
    ///
    /// # Errors
    ///
    /// Returns [`S3ServiceError::NoSuchBucket`] if the bucket does not
    /// exist; in that case no state changes and no event is raised.
    pub fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content: Bytes,
    ) -> Result<S3Object, S3ServiceError> {
        let stored = {
            let bucket_ref =
                self.buckets
                    .get(bucket)
                    .ok_or_else(|| S3ServiceError::NoSuchBucket {
                        bucket: bucket.to_owned(),
                    })?;
            bucket_ref.put_object(key, content)
        };

        // The bucket reference is dropped before dispatch so subscribers
        // can call back into the store.
        let event = BucketEvent {
            bucket: bucket.to_owned(),
            key: stored.key.clone(),
            size: stored.size,
            etag: stored.etag.clone(),
        };
        self.events.dispatch(BucketEventKind::ObjectCreated, &event);

        Ok(stored)
    }

    /// Get a snapshot of an object, or `None` if the key is absent.
    ///
    /// Safe to call speculatively for polling: a missing key is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`S3ServiceError::NoSuchBucket`] if the bucket itself does
    /// not exist — that is a topology mistake, not an absent object.
    pub fn get_object(&self, bucket: &str, key: &str) -> Result<Option<S3Object>, S3ServiceError> {
        let bucket_ref = self
            .buckets
            .get(bucket)
            .ok_or_else(|| S3ServiceError::NoSuchBucket {
                bucket: bucket.to_owned(),
            })?;
        Ok(bucket_ref.object(key))
    }

    /// Register a subscriber for an event kind on a bucket.
    ///
    /// Subscribers are invoked synchronously in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`S3ServiceError::NoSuchBucket`] if the bucket does not
    /// exist.
    pub fn subscribe(
        &self,
        bucket: &str,
        kind: BucketEventKind,
        subscriber: EventSubscriber,
    ) -> Result<(), S3ServiceError> {
        if !self.buckets.contains_key(bucket) {
            return Err(S3ServiceError::NoSuchBucket {
                bucket: bucket.to_owned(),
            });
        }
        self.events.subscribe(bucket, kind, subscriber);
        Ok(())
    }

    /// Whether a bucket exists.
    #[must_use]
    pub fn bucket_exists(&self, name: &str) -> bool {
        self.buckets.contains_key(name)
    }

    /// Bucket names, sorted.
    #[must_use]
    pub fn bucket_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.buckets.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Identifiers for every bucket in the store.
    #[must_use]
    pub fn identifiers(&self) -> Vec<ComponentIdentifier> {
        let mut ids: Vec<ComponentIdentifier> = self
            .buckets
            .iter()
            .map(|entry| ComponentIdentifier {
                kind: ComponentKind::Bucket,
                name: entry.key().clone(),
                endpoint: entry.value().arn.clone(),
            })
            .collect();
        ids.sort_by(|a, b| a.name.cmp(&b.name));
        ids
    }

    /// Reset all state, removing buckets and subscriptions.
    pub fn reset(&self) {
        debug!("resetting object-store state");
        self.buckets.clear();
        self.events.reset();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
