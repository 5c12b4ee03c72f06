//! Stack-template topology builder and engine facade for Nimbus.
//!
//! This crate ties the service components together. A [`StackTemplate`]
//! (the parsed form of a declarative stack document) is interpreted by a
//! two-phase builder — create every named component first, then resolve
//! cross-resource subscriptions against the completed set — and the
//! resulting topology is driven through [`NimbusEngine`], the single
//! coordinating object test code talks to.
//!
//! # Example
//!
//! ```
//! use nimbus_stack::{NimbusEngine, ResourceSpec, StackTemplate};
//! use nimbus_stack::template::{QueueSpec, SubscriptionSpec, TopicSpec};
//!
//! let template = StackTemplate::default()
//!     .with_resource(
//!         "WorkQueue",
//!         ResourceSpec::Queue(QueueSpec {
//!             queue_name: "work".to_owned(),
//!         }),
//!     )
//!     .with_resource(
//!         "Alerts",
//!         ResourceSpec::Topic(TopicSpec {
//!             topic_name: "alerts".to_owned(),
//!             subscriptions: vec![SubscriptionSpec::queue_attribute("WorkQueue")],
//!         }),
//!     );
//!
//! let engine = NimbusEngine::new();
//! engine.build_stack(&template).unwrap();
//! engine.publish("alerts", "hello").unwrap();
//!
//! let message = engine.receive_message("work").unwrap().unwrap();
//! assert_eq!(message.body, "hello");
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod template;

pub use engine::NimbusEngine;
pub use error::StackError;
pub use template::{ResourceSpec, StackTemplate};
