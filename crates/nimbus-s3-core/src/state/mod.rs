//! Object-store state: buckets, objects, and the service-level registry.

pub mod bucket;
pub mod object;
pub mod service;

pub use bucket::S3Bucket;
pub use object::S3Object;
pub use service::S3ServiceState;
