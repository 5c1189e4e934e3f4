//! Typed envelope schemas for the three delivery mechanisms.
//!
//! The typed schemas use the canonical delivery casing. Body extraction from
//! `Records[0]` reads the raw JSON instead, so it also accepts the
//! capitalized spellings (`Body`, `SNS`) and records carrying both.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::EnvelopeKind;
use crate::types::{Error, Result, DEFAULT_EVENT_BUS_SOURCE};

/// A record type carried in a `Records` array.
pub trait EnvelopeRecord: DeserializeOwned {
    /// Envelope kind this record belongs to.
    const KIND: EnvelopeKind;

    /// The JSON-encoded message body.
    fn body(&self) -> &str;

    /// The message body of an untyped record, if present and a string.
    fn raw_body(record: &Value) -> Option<&str>;
}

/// `{"Records": [...]}`, shared by queue and pub/sub deliveries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordEvent<R> {
    #[serde(rename = "Records")]
    pub records: Vec<R>,
}

// =============================================================================
// Queue
// =============================================================================

/// Queue delivery: `{"Records": [{"body": "...", "eventSource": "aws:sqs"}]}`.
pub type QueueEvent = RecordEvent<QueueRecord>;

impl RecordEvent<QueueRecord> {
    /// Wrap a JSON-encoded body in a single-record queue envelope.
    pub fn wrap(body: impl Into<String>) -> Self {
        Self {
            records: vec![QueueRecord {
                body: body.into(),
                event_source: Some(EnvelopeKind::QUEUE_EVENT_SOURCE.to_string()),
                ..QueueRecord::default()
            }],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueueRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_handle: Option<String>,

    pub body: String,

    #[serde(rename = "md5OfBody", skip_serializing_if = "Option::is_none")]
    pub md5_of_body: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<HashMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_attributes: Option<HashMap<String, Value>>,

    #[serde(rename = "eventSourceARN", skip_serializing_if = "Option::is_none")]
    pub event_source_arn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_source: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_region: Option<String>,
}

impl EnvelopeRecord for QueueRecord {
    const KIND: EnvelopeKind = EnvelopeKind::Queue;

    fn body(&self) -> &str {
        &self.body
    }

    fn raw_body(record: &Value) -> Option<&str> {
        field(record, &["body", "Body"]).and_then(Value::as_str)
    }
}

// =============================================================================
// Pub/Sub
// =============================================================================

/// Pub/sub delivery: `{"Records": [{"EventSource": "aws:sns", "Sns": {"Message": "..."}}]}`.
pub type PubSubEvent = RecordEvent<PubSubRecord>;

impl RecordEvent<PubSubRecord> {
    /// Wrap a JSON-encoded body in a single-record pub/sub envelope.
    pub fn wrap(body: impl Into<String>) -> Self {
        Self {
            records: vec![PubSubRecord {
                event_version: None,
                event_subscription_arn: None,
                event_source: Some(EnvelopeKind::PUB_SUB_EVENT_SOURCE.to_string()),
                sns: PubSubMessage {
                    message: body.into(),
                    ..PubSubMessage::default()
                },
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PubSubRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_subscription_arn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_source: Option<String>,

    #[serde(rename = "Sns")]
    pub sns: PubSubMessage,
}

impl EnvelopeRecord for PubSubRecord {
    const KIND: EnvelopeKind = EnvelopeKind::PubSub;

    fn body(&self) -> &str {
        &self.sns.message
    }

    fn raw_body(record: &Value) -> Option<&str> {
        field(record, &["Sns", "SNS"])
            .and_then(|sns| field(sns, &["Message", "message"]))
            .and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PubSubMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_arn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_attributes: Option<HashMap<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_cert_url: Option<String>,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsubscribe_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

// =============================================================================
// Event bus
// =============================================================================

/// Event-bus delivery: `{"source": "aws.events", "detail": ...}`.
///
/// `detail` is either a JSON-encoded string or an inline JSON value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventBusEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "detail-type", skip_serializing_if = "Option::is_none")]
    pub detail_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,

    #[serde(alias = "Detail")]
    pub detail: Value,
}

impl EventBusEvent {
    /// Wrap a JSON-encoded body as the string `detail` of an event-bus envelope.
    pub fn wrap(body: impl Into<String>) -> Self {
        Self {
            version: None,
            id: None,
            detail_type: None,
            source: Some(DEFAULT_EVENT_BUS_SOURCE.to_string()),
            account: None,
            time: None,
            region: None,
            resources: None,
            detail: Value::String(body.into()),
        }
    }

    /// Deserialize `detail` into the target type.
    pub fn detail_as<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        match &self.detail {
            Value::String(encoded) => serde_json::from_str(encoded),
            inline => T::deserialize(inline),
        }
    }
}

// =============================================================================
// Lenient envelope reading
// =============================================================================

/// Return `Records[0]` of a queue or pub/sub envelope.
///
/// The whole envelope is checked against its typed schema, but a mismatch is
/// only fatal when `Records` holds no entry at all.
pub fn first_record<R: EnvelopeRecord>(envelope: &Value) -> Result<&Value> {
    let first = envelope
        .get("Records")
        .and_then(Value::as_array)
        .and_then(|records| records.first());

    match (RecordEvent::<R>::deserialize(envelope), first) {
        (Ok(_), Some(record)) => Ok(record),
        (Err(err), Some(record)) => {
            tracing::debug!(kind = %R::KIND, error = %err, "tolerating envelope schema mismatch");
            Ok(record)
        }
        (Err(err), None) => Err(Error::envelope_shape(R::KIND, err.to_string())),
        (Ok(_), None) => Err(Error::envelope_shape(R::KIND, "empty `Records`")),
    }
}

fn field<'a>(value: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| value.get(name))
}
