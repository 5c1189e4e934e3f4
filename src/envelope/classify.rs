//! Envelope shape discriminator.
//!
//! Rules, first match wins:
//!   top-level `source` in the configured event-bus sources → EventBus
//!   `Records[0].EventSource` (or `eventSource`) == "aws:sqs" → Queue
//!   `Records[0].EventSource` (or `eventSource`) == "aws:sns" → PubSub
//!   (anything else, including empty or missing `Records`)  → Unknown

use serde_json::Value;

use super::EnvelopeKind;
use crate::types::{DecoderConfig, Error, Result};

/// Parse raw bytes into a JSON object. Anything else is malformed input.
pub fn parse_envelope(raw: &[u8]) -> Result<Value> {
    let value: Value =
        serde_json::from_slice(raw).map_err(|e| Error::malformed_input(e.to_string()))?;
    if !value.is_object() {
        return Err(Error::malformed_input(format!(
            "expected a JSON object, found {}",
            json_type_name(&value)
        )));
    }
    Ok(value)
}

/// Pick the envelope kind of an already-parsed object.
pub fn classify_value(envelope: &Value, config: &DecoderConfig) -> EnvelopeKind {
    if let Some(source) = envelope.get("source").and_then(Value::as_str) {
        if config.is_event_bus_source(source) {
            return EnvelopeKind::EventBus;
        }
    }

    let Some(record) = envelope
        .get("Records")
        .and_then(Value::as_array)
        .and_then(|records| records.first())
        .and_then(Value::as_object)
    else {
        return EnvelopeKind::Unknown;
    };

    // The capitalized name wins when both are present.
    let event_source = record
        .get("EventSource")
        .or_else(|| record.get("eventSource"))
        .and_then(Value::as_str);

    match event_source {
        Some(source) => EnvelopeKind::from_event_source(source),
        None => EnvelopeKind::Unknown,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify(value: Value) -> EnvelopeKind {
        classify_value(&value, &DecoderConfig::default())
    }

    #[test]
    fn test_event_bus_source() {
        assert_eq!(
            classify(json!({"source": "aws.events", "detail": {}})),
            EnvelopeKind::EventBus
        );
    }

    #[test]
    fn test_source_wins_over_records() {
        let envelope = json!({
            "source": "aws.events",
            "Records": [{"eventSource": "aws:sqs", "body": "{}"}],
        });
        assert_eq!(classify(envelope), EnvelopeKind::EventBus);
    }

    #[test]
    fn test_other_source_falls_through_to_records() {
        let envelope = json!({
            "source": "custom.app",
            "Records": [{"eventSource": "aws:sqs", "body": "{}"}],
        });
        assert_eq!(classify(envelope), EnvelopeKind::Queue);
        assert_eq!(
            classify(json!({"source": "custom.app", "detail": {}})),
            EnvelopeKind::Unknown
        );
    }

    #[test]
    fn test_configured_event_bus_source() {
        let config = DecoderConfig {
            event_bus_sources: vec!["custom.app".to_string()],
            ..DecoderConfig::default()
        };
        let envelope = json!({"source": "custom.app", "detail": {}});
        assert_eq!(classify_value(&envelope, &config), EnvelopeKind::EventBus);

        let standard = json!({"source": "aws.events", "detail": {}});
        assert_eq!(classify_value(&standard, &config), EnvelopeKind::Unknown);
    }

    #[test]
    fn test_event_source_field_variants() {
        assert_eq!(
            classify(json!({"Records": [{"EventSource": "aws:sns"}]})),
            EnvelopeKind::PubSub
        );
        assert_eq!(
            classify(json!({"Records": [{"eventSource": "aws:sqs"}]})),
            EnvelopeKind::Queue
        );
        assert_eq!(
            classify(json!({"Records": [{"EventSource": "aws:sns", "eventSource": "aws:sqs"}]})),
            EnvelopeKind::PubSub
        );
    }

    #[test]
    fn test_only_first_record_inspected() {
        let envelope = json!({"Records": [
            {"eventSource": "aws:s3"},
            {"eventSource": "aws:sqs"},
        ]});
        assert_eq!(classify(envelope), EnvelopeKind::Unknown);
    }

    #[test]
    fn test_degenerate_records_are_unknown() {
        assert_eq!(classify(json!({"Records": []})), EnvelopeKind::Unknown);
        assert_eq!(classify(json!({"Records": null})), EnvelopeKind::Unknown);
        assert_eq!(classify(json!({"Records": ["aws:sqs"]})), EnvelopeKind::Unknown);
        assert_eq!(classify(json!({"Records": [{}]})), EnvelopeKind::Unknown);
        assert_eq!(
            classify(json!({"Records": [{"EventSource": 7}]})),
            EnvelopeKind::Unknown
        );
        assert_eq!(classify(json!({})), EnvelopeKind::Unknown);
    }

    #[test]
    fn test_parse_envelope_rejects_invalid_json() {
        let err = parse_envelope(b"{").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_parse_envelope_rejects_non_object() {
        let err = parse_envelope(b"[1, 2]").unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed input: expected a JSON object, found an array"
        );
    }
}
