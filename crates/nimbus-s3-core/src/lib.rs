//! In-memory object store for Nimbus.
//!
//! Provides buckets of keyed, whole-content-replaceable objects plus a
//! synchronous bucket-event bus. Every successful object write raises an
//! `ObjectCreated` event to the subscribers registered for that bucket,
//! which is how cross-service wiring (e.g. bucket → queue notification
//! records) is built on top of this crate.
//!
//! # Architecture
//!
//! ```text
//! S3ServiceState (buckets, event bus)
//!        |
//!        v
//!    S3Bucket (RwLock'd key -> object map)
//!        |
//!        v
//!    S3Object (Bytes content, MD5 ETag)
//! ```

pub mod error;
pub mod events;
pub mod notification;
pub mod state;

pub use error::S3ServiceError;
pub use events::{BucketEvent, BucketEventKind, EventSubscriber};
pub use notification::S3EventNotification;
pub use state::object::S3Object;
pub use state::service::S3ServiceState;
