//! Notification service error types.

/// Notification service error type.
#[derive(Debug, thiserror::Error)]
pub enum SnsServiceError {
    /// No topic is registered under the given name or ARN.
    #[error("no such topic: {topic}")]
    NoSuchTopic {
        /// The name or ARN that did not resolve.
        topic: String,
    },

    /// A topic with the same name already exists.
    #[error("a topic with this name already exists: {name}")]
    TopicAlreadyExists {
        /// The topic name that already exists.
        name: String,
    },
}
