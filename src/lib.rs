//! # Lambda Envelope - one typed payload from any delivery envelope
//!
//! A serverless handler can be triggered by a queue, a pub/sub topic or an
//! event bus, and each wraps the caller's message differently:
//! ```text
//!   {"Records":[{"eventSource":"aws:sqs","body":"<json>"}]}          → Queue
//!   {"Records":[{"EventSource":"aws:sns","Sns":{"Message":"<json>"}}]} → PubSub
//!   {"source":"aws.events","detail":"<json>"}                         → EventBus
//!   anything else                                                     → Unknown
//! ```
//! [`decode`] sniffs the shape, pulls out the inner body and deserializes it
//! into the caller's type. Unknown shapes are logged and decode to an empty
//! [`DecodedMessage`]; only genuinely malformed input is an error.
//!
//! ```
//! use lambda_envelope::{decode, QueueEvent};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Order {
//!     id: u32,
//! }
//!
//! let raw = serde_json::to_vec(&QueueEvent::wrap(r#"{"id": 7}"#)).unwrap();
//! let order = decode::<Order>(&raw).unwrap().into_inner().unwrap();
//! assert_eq!(order.id, 7);
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod envelope;
pub mod types;

// Internal utilities
pub mod observability;

pub use envelope::{
    classify, decode, DecodedMessage, Decoder, EnvelopeKind, EventBusEvent, PubSubEvent,
    QueueEvent,
};
pub use types::{Config, DecoderConfig, Error, Result};
