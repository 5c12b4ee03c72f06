//! Synchronous function-invocation registry for Nimbus.
//!
//! Handlers are plain closures registered by name and invoked
//! synchronously with an opaque payload plus an execution context
//! carrying the function's own name. The engine never interprets the
//! payload bytes.

pub mod context;
pub mod error;
pub mod registry;

pub use context::LambdaContext;
pub use error::LambdaServiceError;
pub use registry::{LambdaHandler, LambdaRegistry};
