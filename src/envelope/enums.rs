//! Envelope enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which delivery mechanism wrapped the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvelopeKind {
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "sqs")]
    Queue,
    #[serde(rename = "sns")]
    PubSub,
    #[serde(rename = "eventbridge")]
    EventBus,
}

impl EnvelopeKind {
    /// `Records[].EventSource` marker for queue deliveries.
    pub const QUEUE_EVENT_SOURCE: &'static str = "aws:sqs";
    /// `Records[].EventSource` marker for pub/sub deliveries.
    pub const PUB_SUB_EVENT_SOURCE: &'static str = "aws:sns";

    /// Map a record's event source marker to its kind.
    pub fn from_event_source(source: &str) -> Self {
        match source {
            Self::QUEUE_EVENT_SOURCE => EnvelopeKind::Queue,
            Self::PUB_SUB_EVENT_SOURCE => EnvelopeKind::PubSub,
            _ => EnvelopeKind::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnvelopeKind::Unknown => "unknown",
            EnvelopeKind::Queue => "sqs",
            EnvelopeKind::PubSub => "sns",
            EnvelopeKind::EventBus => "eventbridge",
        }
    }
}

impl fmt::Display for EnvelopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
