//! OTLP/JSON document model for exported spans.
//!
//! Mirrors the subset of the OTLP trace protocol's JSON mapping that offline
//! viewers need. Each export batch becomes one [`ExportRequest`] serialized on
//! a single line.

use opentelemetry::trace::{SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Instrumentation scope name written into every batch.
pub const SCOPE_NAME: &str = "Jiffy";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub resource_spans: Vec<ResourceSpans>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpans {
    pub resource: ResourceDoc,
    pub scope_spans: Vec<ScopeSpans>,
}

#[derive(Debug, Serialize)]
pub struct ResourceDoc {
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
pub struct ScopeSpans {
    pub scope: Scope,
    pub spans: Vec<SpanDoc>,
}

#[derive(Debug, Serialize)]
pub struct Scope {
    pub name: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanDoc {
    pub trace_id: String,
    pub span_id: String,
    pub parent_span_id: String,
    pub name: String,
    pub kind: u8,
    pub start_time_unix_nano: String,
    pub end_time_unix_nano: String,
    pub attributes: Vec<Attribute>,
    pub events: Vec<EventDoc>,
    pub status: StatusDoc,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDoc {
    pub time_unix_nano: String,
    pub name: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct StatusDoc {
    pub code: u8,
    pub message: String,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Attribute {
    pub key: String,
    pub value: AnyValue,
}

/// OTLP `AnyValue`. Integers travel as strings per the JSON mapping.
#[derive(Debug, PartialEq, Serialize)]
pub enum AnyValue {
    #[serde(rename = "boolValue")]
    Bool(bool),
    #[serde(rename = "intValue")]
    Int(String),
    #[serde(rename = "doubleValue")]
    Double(f64),
    #[serde(rename = "stringValue")]
    Str(String),
}

impl From<&Value> for AnyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::Bool(*b),
            Value::I64(i) => Self::Int(i.to_string()),
            Value::F64(f) => Self::Double(*f),
            Value::String(s) => Self::Str(s.to_string()),
            // Arrays are flattened to their display form.
            Value::Array(_) => Self::Str(value.to_string()),
        }
    }
}

impl From<&KeyValue> for Attribute {
    fn from(kv: &KeyValue) -> Self {
        Self {
            key: kv.key.to_string(),
            value: AnyValue::from(&kv.value),
        }
    }
}

impl From<&Status> for StatusDoc {
    fn from(status: &Status) -> Self {
        let (code, message) = match status {
            Status::Unset => (0, String::new()),
            Status::Ok => (1, String::new()),
            Status::Error { description } => (2, description.to_string()),
        };
        Self { code, message }
    }
}

impl From<&SpanData> for SpanDoc {
    fn from(span: &SpanData) -> Self {
        let parent_span_id = if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        };

        Self {
            trace_id: format!("{:032x}", span.span_context.trace_id()),
            span_id: format!("{:016x}", span.span_context.span_id()),
            parent_span_id,
            name: span.name.to_string(),
            kind: kind_code(&span.span_kind),
            start_time_unix_nano: unix_nanos(span.start_time),
            end_time_unix_nano: unix_nanos(span.end_time),
            attributes: span.attributes.iter().map(Attribute::from).collect(),
            events: span
                .events
                .iter()
                .map(|event| EventDoc {
                    time_unix_nano: unix_nanos(event.timestamp),
                    name: event.name.to_string(),
                    attributes: event.attributes.iter().map(Attribute::from).collect(),
                })
                .collect(),
            status: StatusDoc::from(&span.status),
        }
    }
}

impl ExportRequest {
    /// Builds the document for one export batch.
    pub fn new(resource: &Resource, batch: &[SpanData]) -> Self {
        let attributes = resource
            .iter()
            .map(|(key, value)| Attribute {
                key: key.to_string(),
                value: AnyValue::from(value),
            })
            .collect();

        Self {
            resource_spans: vec![ResourceSpans {
                resource: ResourceDoc { attributes },
                scope_spans: vec![ScopeSpans {
                    scope: Scope { name: SCOPE_NAME },
                    spans: batch.iter().map(SpanDoc::from).collect(),
                }],
            }],
        }
    }
}

const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attribute_values_follow_the_json_mapping() {
        let attrs: Vec<Attribute> = [
            KeyValue::new("seq", 7_i64),
            KeyValue::new("term", "cat"),
            KeyValue::new("success", true),
        ]
        .iter()
        .map(Attribute::from)
        .collect();

        assert_eq!(
            serde_json::to_value(&attrs).unwrap(),
            json!([
                {"key": "seq", "value": {"intValue": "7"}},
                {"key": "term", "value": {"stringValue": "cat"}},
                {"key": "success", "value": {"boolValue": true}},
            ])
        );
    }

    #[test]
    fn status_codes() {
        assert_eq!(StatusDoc::from(&Status::Unset).code, 0);
        assert_eq!(StatusDoc::from(&Status::Ok).code, 1);
        assert_eq!(
            StatusDoc::from(&Status::error("boom")),
            StatusDoc {
                code: 2,
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn empty_batch_still_carries_resource_and_scope() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "Jiffy")]);
        let doc = serde_json::to_value(ExportRequest::new(&resource, &[])).unwrap();

        assert_eq!(doc["resourceSpans"][0]["scopeSpans"][0]["scope"]["name"], "Jiffy");
        assert_eq!(doc["resourceSpans"][0]["scopeSpans"][0]["spans"], json!([]));
        let attrs = doc["resourceSpans"][0]["resource"]["attributes"].as_array().unwrap();
        assert!(attrs.contains(&json!({"key": "service.name", "value": {"stringValue": "Jiffy"}})));
    }
}
