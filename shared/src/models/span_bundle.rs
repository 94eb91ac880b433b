//! OTLP/JSON span bundle data model.
//!
//! Mirrors the `ExportTraceServiceRequest` JSON shape closely enough to print
//! it. Nanosecond timestamps are kept as the strings the sender wrote since
//! they routinely exceed the range a double can represent exactly. Events and
//! links are kept as the raw JSON text they arrived as.
//!
//! Lists may be sent as `null`, which reads as an empty list.

use serde::{de, Deserialize, Deserializer};
use serde_json::value::RawValue;
use std::borrow::Cow;

/// A batch of spans grouped by resource and instrumentation scope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanBundle {
    /// Spans grouped by the resource that produced them.
    #[serde(deserialize_with = "null_as_empty")]
    pub resource_spans: Vec<ResourceSpans>,
}

impl SpanBundle {
    /// Returns the total number of spans across all resources and scopes.
    #[must_use]
    pub fn span_count(&self) -> usize {
        self.resource_spans
            .iter()
            .flat_map(|rs| &rs.scope_spans)
            .map(|ss| ss.spans.len())
            .sum()
    }
}

/// Spans produced by a single resource.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceSpans {
    /// The resource the spans belong to.
    pub resource: Resource,
    /// Spans grouped by instrumentation scope.
    #[serde(deserialize_with = "null_as_empty")]
    pub scope_spans: Vec<ScopeSpans>,
}

/// An entity producing telemetry (service, host, process).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resource {
    /// Resource attributes, in the order they were sent.
    #[serde(deserialize_with = "null_as_empty")]
    pub attributes: Vec<KeyValue>,
    /// Number of attributes the sender discarded.
    pub dropped_attributes_count: u32,
}

/// Spans emitted by one instrumentation scope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScopeSpans {
    /// The instrumentation scope.
    pub scope: InstrumentationScope,
    /// Spans in the order they were sent.
    #[serde(deserialize_with = "null_as_empty")]
    pub spans: Vec<Span>,
}

/// Name and version of the instrumentation library.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InstrumentationScope {
    /// Scope name, possibly empty.
    pub name: String,
    /// Scope version.
    pub version: Option<String>,
}

/// Placeholder printed for scopes without a name.
pub const UNNAMED_SCOPE: &str = "unnamed";

impl InstrumentationScope {
    /// Returns the scope name, or [`UNNAMED_SCOPE`] when it is empty.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            UNNAMED_SCOPE
        } else {
            &self.name
        }
    }

    /// Returns the version if one was sent and is non-empty.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref().filter(|v| !v.is_empty())
    }
}

/// A single traced operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Span {
    /// Hex trace identifier.
    pub trace_id: String,
    /// Hex span identifier.
    pub span_id: String,
    /// Parent span identifier, absent or empty for root spans.
    pub parent_span_id: Option<String>,
    /// Operation name.
    pub name: String,
    /// Numeric OTLP span kind.
    pub kind: i32,
    /// Start time in nanoseconds since the epoch, verbatim.
    #[serde(deserialize_with = "deserialize_nanos")]
    pub start_time_unix_nano: String,
    /// End time in nanoseconds since the epoch, verbatim.
    #[serde(deserialize_with = "deserialize_nanos")]
    pub end_time_unix_nano: String,
    /// Span attributes, in the order they were sent.
    #[serde(deserialize_with = "null_as_empty")]
    pub attributes: Vec<KeyValue>,
    /// Completion status.
    pub status: SpanStatus,
    /// Span events, verbatim.
    #[serde(deserialize_with = "null_as_empty")]
    pub events: Vec<Box<RawValue>>,
    /// Span links, verbatim.
    #[serde(deserialize_with = "null_as_empty")]
    pub links: Vec<Box<RawValue>>,
    /// Number of attributes the sender discarded.
    pub dropped_attributes_count: u32,
    /// Number of events the sender discarded.
    pub dropped_events_count: u32,
    /// Number of links the sender discarded.
    pub dropped_links_count: u32,
}

impl Span {
    /// Returns the parent span id if one was sent and is non-empty.
    #[must_use]
    pub fn parent_span_id(&self) -> Option<&str> {
        self.parent_span_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Span status code and message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpanStatus {
    /// Numeric OTLP status code.
    pub code: i32,
    /// Optional description.
    pub message: Option<String>,
}

impl SpanStatus {
    /// Returns the message if one was sent and is non-empty.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

/// An attribute key and its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyValue {
    /// Attribute key.
    pub key: String,
    /// Attribute value.
    pub value: AttributeValue,
}

/// OTLP `AnyValue` restricted to the scalar kinds this sink prints.
///
/// The wire form carries one field per kind. Resolution does not look at
/// which field is present; see [`AttributeValue::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeValue {
    /// `stringValue`.
    pub string_value: Option<String>,
    /// `intValue`, sent either as a number or as a decimal string.
    #[serde(deserialize_with = "deserialize_int")]
    pub int_value: Option<i64>,
    /// `boolValue`.
    pub bool_value: Option<bool>,
}

impl AttributeValue {
    /// Resolves the printable value, first match wins.
    ///
    /// A non-empty string wins, then a non-zero integer, then a `true`
    /// boolean. Everything else resolves to the empty string, so an empty
    /// string, a zero integer and a `false` boolean all print blank.
    ///
    /// ```
    /// use shared::models::AttributeValue;
    ///
    /// let value = AttributeValue {
    ///     string_value: Some(String::new()),
    ///     int_value: Some(0),
    ///     bool_value: Some(false),
    /// };
    /// assert_eq!(value.resolve(), "");
    /// ```
    #[must_use]
    pub fn resolve(&self) -> Cow<'_, str> {
        if let Some(s) = self.string_value.as_deref().filter(|s| !s.is_empty()) {
            return Cow::Borrowed(s);
        }
        if let Some(i) = self.int_value.filter(|i| *i != 0) {
            return Cow::Owned(i.to_string());
        }
        if self.bool_value == Some(true) {
            return Cow::Borrowed("true");
        }
        Cow::Borrowed("")
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntWire {
    Number(i64),
    Text(String),
}

fn deserialize_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IntWire>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IntWire::Number(i)) => Ok(Some(i)),
        Some(IntWire::Text(s)) => s.parse().map(Some).map_err(de::Error::custom),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NanosWire {
    Text(String),
    Number(u64),
}

fn deserialize_nanos<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NanosWire::deserialize(deserializer)? {
        NanosWire::Text(s) => s,
        NanosWire::Number(n) => n.to_string(),
    })
}
