//! Core types shared by the decoder.
//!
//! - **Errors**: decoder error types with thiserror derives
//! - **Config**: decoder and observability configuration

mod config;
mod errors;

pub use config::{Config, DecoderConfig, ObservabilityConfig, DEFAULT_EVENT_BUS_SOURCE};
pub use errors::{Error, Result};
