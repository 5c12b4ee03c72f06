//! Errors for stack building and the engine facade.

use nimbus_lambda_core::LambdaServiceError;
use nimbus_s3_core::S3ServiceError;
use nimbus_sns_core::SnsServiceError;
use nimbus_sqs_core::SqsServiceError;

/// Error type for stack building and every engine facade operation.
#[derive(Debug, thiserror::Error)]
pub enum StackError {
    /// An object-store operation failed.
    #[error(transparent)]
    S3(#[from] S3ServiceError),

    /// A queue operation failed.
    #[error(transparent)]
    Sqs(#[from] SqsServiceError),

    /// A notification operation failed.
    #[error(transparent)]
    Sns(#[from] SnsServiceError),

    /// A function-registry operation failed.
    #[error(transparent)]
    Lambda(#[from] LambdaServiceError),

    /// Reading object content from a reader failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A resource kind outside the known set was declared.
    #[error("unsupported resource kind declared for {name}")]
    UnsupportedResource {
        /// The logical name of the offending resource.
        name: String,
    },

    /// A subscription referenced a resource the template never declared.
    #[error("subscription on topic {topic} references unknown resource {resource}")]
    UnknownResource {
        /// The subscribing topic's name.
        topic: String,
        /// The logical name that did not resolve.
        resource: String,
    },

    /// A subscription referenced a resource of the wrong kind.
    #[error("subscription on topic {topic} references {resource}, which is not a queue")]
    InvalidReference {
        /// The subscribing topic's name.
        topic: String,
        /// The logical name of the mismatched resource.
        resource: String,
    },

    /// A subscription carried a literal endpoint address. Cross-process
    /// addressing is unsupported in an in-process engine.
    #[error("literal endpoint subscriptions are not supported: {endpoint}")]
    LiteralEndpointUnsupported {
        /// The literal endpoint that was declared.
        endpoint: String,
    },

    /// A subscription declared a protocol the builder cannot wire.
    #[error("unsupported subscription protocol {protocol} on topic {topic}")]
    UnsupportedProtocol {
        /// The subscribing topic's name.
        topic: String,
        /// The declared protocol.
        protocol: String,
    },

    /// A subscription declared neither a literal endpoint nor an
    /// attribute reference.
    #[error("subscription on topic {topic} declares no target")]
    MissingSubscriptionTarget {
        /// The subscribing topic's name.
        topic: String,
    },
}
