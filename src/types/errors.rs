//! Decoder error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation. Messages
//! name the stage that failed (outer envelope vs inner body) so callers can
//! tell a broken delivery apart from a payload that doesn't fit their type.

use thiserror::Error;

use crate::envelope::EnvelopeKind;

/// Decoder result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for envelope decoding.
#[derive(Error, Debug)]
pub enum Error {
    /// Outer bytes are not a JSON object.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The envelope of a recognized kind does not match its schema.
    #[error("failed to unmarshal {kind} event: {reason}")]
    EnvelopeShape { kind: EnvelopeKind, reason: String },

    /// The inner body is not valid JSON or does not fit the target type.
    #[error("failed to unmarshal {kind} event body: {reason}")]
    BodyDecode { kind: EnvelopeKind, reason: String },

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),
}

// Convenience constructors
impl Error {
    pub fn malformed_input(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    pub fn envelope_shape(kind: EnvelopeKind, reason: impl Into<String>) -> Self {
        Self::EnvelopeShape {
            kind,
            reason: reason.into(),
        }
    }

    pub fn body_decode(kind: EnvelopeKind, reason: impl Into<String>) -> Self {
        Self::BodyDecode {
            kind,
            reason: reason.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Envelope kind the failure is attributed to, if any.
    pub fn kind(&self) -> Option<EnvelopeKind> {
        match self {
            Error::EnvelopeShape { kind, .. } | Error::BodyDecode { kind, .. } => Some(*kind),
            Error::MalformedInput(_) | Error::Config(_) => None,
        }
    }
}
