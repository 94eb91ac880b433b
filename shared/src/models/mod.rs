//! Data models for the debug sink.
//!
//! This module contains the payload shapes the observability endpoint understands.

pub mod span_bundle;
pub mod structured_log;

pub use span_bundle::{
    AttributeValue, InstrumentationScope, KeyValue, Resource, ResourceSpans, ScopeSpans, Span,
    SpanBundle, SpanStatus, UNNAMED_SCOPE,
};
pub use structured_log::{LogErrorDetails, StructuredLog, STRUCTURED_LOG_TYPE};
