//! Stored objects.

use std::hash::{Hash, Hasher};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};

/// An object stored in a bucket, identified by its key.
///
/// Content is an immutable snapshot: a write to an existing key replaces
/// the whole object, never part of it. The ETag is the quoted hex MD5 of
/// the content, recomputed on every write and exposed in event payloads.
#[derive(Debug, Clone)]
pub struct S3Object {
    /// The object's key, unique within its bucket.
    pub key: String,
    /// The object's content.
    pub content: Bytes,
    /// Content length in bytes.
    pub size: u64,
    /// Quoted hex MD5 fingerprint of the content.
    pub etag: String,
    /// When the content was last written.
    pub last_modified: DateTime<Utc>,
}

impl S3Object {
    /// Create an object snapshot for the given key and content.
    #[must_use]
    pub fn new(key: impl Into<String>, content: Bytes) -> Self {
        let etag = format!("\"{}\"", hex::encode(Md5::digest(&content)));
        let size = content.len() as u64;
        Self {
            key: key.into(),
            content,
            size,
            etag,
            last_modified: Utc::now(),
        }
    }

    /// The content as a UTF-8 string, if it is valid UTF-8.
    #[must_use]
    pub fn content_utf8(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }
}

// Two objects with the same key in the same bucket are the same logical
// object regardless of content generation.
impl PartialEq for S3Object {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for S3Object {}

impl Hash for S3Object {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
