//! Queue service error types.

/// Queue service error type.
#[derive(Debug, thiserror::Error)]
pub enum SqsServiceError {
    /// No queue is registered under the given name or URL.
    #[error("no such queue: {queue}")]
    NoSuchQueue {
        /// The name or URL that did not resolve.
        queue: String,
    },

    /// A queue with the same name already exists.
    #[error("a queue with this name already exists: {name}")]
    QueueAlreadyExists {
        /// The queue name that already exists.
        name: String,
    },
}
