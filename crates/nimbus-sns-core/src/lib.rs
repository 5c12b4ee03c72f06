//! In-memory pub/sub notification service for Nimbus.
//!
//! Topics fan published messages out to every subscriber callback,
//! synchronously, in registration order. A failing subscriber is logged
//! and skipped; it never blocks delivery to the rest or surfaces to the
//! publisher.

pub mod error;
pub mod service;
pub mod topic;

pub use error::SnsServiceError;
pub use service::SnsServiceState;
pub use topic::{SnsTopic, TopicSubscriber};
