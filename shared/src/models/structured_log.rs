//! Structured log data model.
//!
//! Defines the `StructuredLog` record posted by the logging client library.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// The `type` tag value that marks a body as a structured log.
pub const STRUCTURED_LOG_TYPE: &str = "structured_log";

/// Error details attached to a structured log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogErrorDetails {
    /// Error class name (e.g. `TypeError`).
    pub name: String,
    /// Error message.
    pub message: String,
    /// Optional stack trace, newline separated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// A leveled, timestamped, service-tagged log record.
///
/// The level is kept as the sender's string so that any casing the client
/// uses is printed unchanged.
///
/// # Example
///
/// ```
/// use shared::models::StructuredLog;
///
/// let log: StructuredLog = serde_json::from_str(r#"{
///     "type": "structured_log",
///     "timestamp": "2024-01-01T00:00:00Z",
///     "level": "INFO",
///     "message": "User logged in",
///     "service": "auth-service"
/// }"#).unwrap();
///
/// assert_eq!(log.level, "INFO");
/// assert!(log.error.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredLog {
    /// Discriminant tag, always `structured_log` for records reaching this type.
    #[serde(rename = "type")]
    pub kind: String,

    /// Timestamp as sent by the client.
    pub timestamp: String,

    /// Severity level as sent by the client.
    pub level: String,

    /// The log message content.
    pub message: String,

    /// Name of the service that generated the log.
    pub service: String,

    /// Free-form metadata as the raw JSON text it arrived as.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Box<RawValue>>,

    /// Error attached to the log, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<LogErrorDetails>,

    /// Trace ID for distributed tracing correlation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,

    /// Span ID for distributed tracing correlation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span_id: Option<String>,
}
