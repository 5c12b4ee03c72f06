//! In-memory message queue service for Nimbus.
//!
//! Queues hold messages in insertion order. Delivery is peek-style: a
//! receive marks the message in flight and issues a fresh receipt handle
//! but never removes it; only an explicit delete with the message's
//! current handle does. There is no lease expiry — a message stays in
//! flight until deleted, and redelivery (with a new handle) happens only
//! once every pending message has been delivered at least once.

pub mod error;
pub mod message;
pub mod queue;
pub mod service;

pub use error::SqsServiceError;
pub use message::ReceivedMessage;
pub use queue::SqsQueue;
pub use service::SqsServiceState;
