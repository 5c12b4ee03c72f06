//! Object-store error types.

/// Object-store service error type.
#[derive(Debug, thiserror::Error)]
pub enum S3ServiceError {
    /// The specified bucket does not exist.
    #[error("the specified bucket does not exist: {bucket}")]
    NoSuchBucket {
        /// The bucket name that was not found.
        bucket: String,
    },

    /// A bucket with the same name already exists.
    ///
    /// Re-creating an existing bucket is always rejected; silently
    /// overwriting would orphan the previous content and any registered
    /// event subscribers.
    #[error("a bucket with this name already exists: {bucket}")]
    BucketAlreadyExists {
        /// The bucket name that already exists.
        bucket: String,
    },
}
