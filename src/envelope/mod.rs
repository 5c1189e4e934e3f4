//! Envelope decoding - sniff the delivery shape, extract the body, deserialize it.
//!
//! Decoding is two-phase: the raw bytes are parsed once into a generic JSON
//! value for classification, then the matching typed schema is read from that
//! value to pull out the inner body string.
//!
//! Queue and pub/sub envelopes are read leniently: a schema mismatch is
//! tolerated as long as `Records` has an entry, and the body always comes from
//! `Records[0]`. Event-bus envelopes are strict.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;
use serde_json::Value;

use crate::types::{DecoderConfig, Error, Result};

pub mod classify;
pub mod enums;
pub mod records;

pub use enums::*;
pub use records::{
    EnvelopeRecord, EventBusEvent, PubSubEvent, PubSubMessage, PubSubRecord, QueueEvent,
    QueueRecord, RecordEvent,
};

/// The message carried by one delivery.
///
/// `message` is `None` exactly when `kind` is [`EnvelopeKind::Unknown`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMessage<T> {
    pub kind: EnvelopeKind,
    pub message: Option<T>,
}

impl<T> DecodedMessage<T> {
    /// Result for a payload no known envelope matched.
    pub fn empty() -> Self {
        Self {
            kind: EnvelopeKind::Unknown,
            message: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_none()
    }

    pub fn into_inner(self) -> Option<T> {
        self.message
    }
}

/// Lets a handler take `DecodedMessage<T>` as its event type directly.
///
/// Only works against `serde_json` input, since the raw payload is captured
/// verbatim for the unknown-envelope diagnostic.
impl<'de, T: DeserializeOwned> Deserialize<'de> for DecodedMessage<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        decode(raw.get().as_bytes()).map_err(serde::de::Error::custom)
    }
}

/// Envelope decoder.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Determine which envelope shape `raw` has.
    ///
    /// Fails only if `raw` is not a JSON object.
    pub fn classify(&self, raw: &[u8]) -> Result<EnvelopeKind> {
        let envelope = classify::parse_envelope(raw)?;
        Ok(classify::classify_value(&envelope, &self.config))
    }

    /// Extract and deserialize the message body carried by `raw`.
    ///
    /// An unrecognized envelope is not an error: it is logged with the full
    /// payload and yields an empty result.
    pub fn decode<T: DeserializeOwned>(&self, raw: &[u8]) -> Result<DecodedMessage<T>> {
        let envelope = classify::parse_envelope(raw)?;
        let kind = classify::classify_value(&envelope, &self.config);

        let message = match kind {
            EnvelopeKind::Queue => decode_first_record::<QueueRecord, T>(&envelope)?,
            EnvelopeKind::PubSub => decode_first_record::<PubSubRecord, T>(&envelope)?,
            EnvelopeKind::EventBus => {
                let event = EventBusEvent::deserialize(&envelope)
                    .map_err(|e| Error::envelope_shape(kind, e.to_string()))?;
                event
                    .detail_as::<T>()
                    .map_err(|e| Error::body_decode(kind, e.to_string()))?
            }
            EnvelopeKind::Unknown => {
                if self.config.log_unknown {
                    tracing::info!(
                        payload = %String::from_utf8_lossy(raw),
                        "unknown event type"
                    );
                }
                return Ok(DecodedMessage::empty());
            }
        };

        tracing::debug!(kind = %kind, "decoded event body");
        Ok(DecodedMessage {
            kind,
            message: Some(message),
        })
    }
}

fn decode_first_record<R: EnvelopeRecord, T: DeserializeOwned>(envelope: &Value) -> Result<T> {
    let record = records::first_record::<R>(envelope)?;
    let body = R::raw_body(record)
        .ok_or_else(|| Error::body_decode(R::KIND, "missing or non-string message body"))?;
    serde_json::from_str(body).map_err(|e| Error::body_decode(R::KIND, e.to_string()))
}

/// Classify `raw` with the default configuration.
pub fn classify(raw: &[u8]) -> Result<EnvelopeKind> {
    Decoder::default().classify(raw)
}

/// Decode `raw` with the default configuration.
pub fn decode<T: DeserializeOwned>(raw: &[u8]) -> Result<DecodedMessage<T>> {
    Decoder::default().decode(raw)
}
