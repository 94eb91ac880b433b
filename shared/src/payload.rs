//! Payload parsing and classification.
//!
//! Bodies posted to the observability endpoint are sniffed for their shape:
//! a `type` tag of `structured_log` marks a [`StructuredLog`], and the mere
//! presence of `resourceSpans` marks a [`SpanBundle`]. Anything else is
//! rejected.
//!
//! Classification looks at a parsed [`Value`], but the payload itself is
//! deserialized from the body text so opaque fields keep their original
//! spelling.

use crate::models::{SpanBundle, StructuredLog, STRUCTURED_LOG_TYPE};
use serde_json::{Map, Value};
use thiserror::Error;

/// A JSON object as received on the wire.
pub type JsonObject = Map<String, Value>;

/// Errors that can occur while turning a request body into a [`Payload`].
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The body was empty or only whitespace.
    #[error("request body is empty")]
    EmptyBody,

    /// The body is not UTF-8 text.
    #[error("request body is not UTF-8: {0}")]
    Utf8(#[source] std::str::Utf8Error),

    /// The body is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// The body is valid JSON but not an object.
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// The object matches none of the known shapes.
    #[error("unknown data type")]
    UnknownDataType,

    /// Tagged as a structured log but does not have the structured log shape.
    #[error("invalid structured log: {0}")]
    StructuredLog(#[source] serde_json::Error),

    /// Has `resourceSpans` but does not have the OTLP span shape.
    #[error("invalid OTLP spans: {0}")]
    SpanBundle(#[source] serde_json::Error),
}

/// The shapes the observability endpoint understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// A single structured log record.
    StructuredLog,
    /// An OTLP/JSON trace export.
    SpanBundle,
}

impl PayloadKind {
    /// Decides the shape of a raw object.
    ///
    /// The `type` tag is checked before `resourceSpans`, so an object carrying
    /// both is a structured log. Only the presence of `resourceSpans` is
    /// checked, not its type.
    ///
    /// # Example
    ///
    /// ```
    /// use shared::payload::PayloadKind;
    /// use serde_json::json;
    ///
    /// let object = json!({"resourceSpans": null});
    /// assert_eq!(
    ///     PayloadKind::classify(object.as_object().unwrap()),
    ///     Some(PayloadKind::SpanBundle)
    /// );
    /// ```
    #[must_use]
    pub fn classify(object: &JsonObject) -> Option<Self> {
        if object.get("type").and_then(Value::as_str) == Some(STRUCTURED_LOG_TYPE) {
            Some(Self::StructuredLog)
        } else if object.contains_key("resourceSpans") {
            Some(Self::SpanBundle)
        } else {
            None
        }
    }

    /// Returns a short human-readable name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StructuredLog => "structured log",
            Self::SpanBundle => "OTLP spans",
        }
    }
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified and parsed observability payload.
#[derive(Debug, Clone)]
pub enum Payload {
    /// A structured log record.
    StructuredLog(StructuredLog),
    /// An OTLP span bundle.
    SpanBundle(SpanBundle),
}

impl Payload {
    /// Classifies and parses a request body.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::UnknownDataType`] if the object has no known
    /// shape, or the kind-specific parse error if it was classified but does
    /// not deserialize.
    pub fn from_body(body: &JsonBody<'_>) -> Result<Self, PayloadError> {
        let object = body
            .value
            .as_object()
            .ok_or_else(|| PayloadError::NotAnObject(describe(&body.value)))?;
        let kind = PayloadKind::classify(object).ok_or(PayloadError::UnknownDataType)?;
        tracing::debug!(%kind, "Classified payload");

        match kind {
            PayloadKind::StructuredLog => serde_json::from_str(body.text)
                .map(Self::StructuredLog)
                .map_err(PayloadError::StructuredLog),
            PayloadKind::SpanBundle => serde_json::from_str(body.text)
                .map(Self::SpanBundle)
                .map_err(PayloadError::SpanBundle),
        }
    }

    /// Parses, classifies and deserializes a raw request body in one step.
    ///
    /// # Errors
    ///
    /// See [`parse_body`] and [`Payload::from_body`].
    pub fn from_slice(body: &[u8]) -> Result<Self, PayloadError> {
        Self::from_body(&parse_body(body)?)
    }

    /// Returns the kind of this payload.
    #[must_use]
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::StructuredLog(_) => PayloadKind::StructuredLog,
            Self::SpanBundle(_) => PayloadKind::SpanBundle,
        }
    }
}

/// A request body known to hold a single JSON object.
#[derive(Debug, Clone)]
pub struct JsonBody<'a> {
    text: &'a str,
    value: Value,
}

impl<'a> JsonBody<'a> {
    /// The body exactly as it was sent.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The parsed body, always a [`Value::Object`].
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Parses a request body that must hold a JSON object.
///
/// # Errors
///
/// Returns an error if the body is empty, is not UTF-8 JSON, or is JSON but
/// not an object.
pub fn parse_body(body: &[u8]) -> Result<JsonBody<'_>, PayloadError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(PayloadError::EmptyBody);
    }

    let text = std::str::from_utf8(body).map_err(PayloadError::Utf8)?;
    let value: Value = serde_json::from_str(text).map_err(PayloadError::Json)?;
    if value.is_object() {
        Ok(JsonBody { text, value })
    } else {
        Err(PayloadError::NotAnObject(describe(&value)))
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "an object",
        Value::Array(_) => "an array",
        Value::String(_) => "a string",
        Value::Number(_) => "a number",
        Value::Bool(_) => "a boolean",
        Value::Null => "null",
    }
}
