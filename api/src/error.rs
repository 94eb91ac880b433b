//! Request error taxonomy.
//!
//! Every failure is answered with a short plain-text message and never with
//! the acknowledgement body.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::payload::PayloadError;
use std::error::Error as _;
use thiserror::Error;

/// Errors that can occur while handling an ingest request.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The request body could not be read.
    #[error("Error reading request body")]
    BodyRead(#[source] BytesRejection),

    /// The request body was empty.
    #[error("Empty request body")]
    EmptyBody,

    /// The request body is not a JSON object.
    #[error("Error parsing JSON")]
    JsonParse(#[source] PayloadError),

    /// The body matches no known observability shape.
    #[error("Unknown data type")]
    UnknownDataType,

    /// Tagged as a structured log but not shaped like one.
    #[error("Error parsing structured log")]
    StructuredLogParse(#[source] serde_json::Error),

    /// Carries `resourceSpans` but not shaped like an OTLP export.
    #[error("Error parsing OTLP spans")]
    OtlpParse(#[source] serde_json::Error),

    /// Writing the rendered output failed.
    #[error("Error processing {what}")]
    Processing {
        /// What was being written.
        what: &'static str,
        /// The sink failure.
        #[source]
        source: std::io::Error,
    },

    /// The endpoint does not accept this method.
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl IngestError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BodyRead(rejection) => rejection.status(),
            Self::EmptyBody
            | Self::JsonParse(_)
            | Self::UnknownDataType
            | Self::StructuredLogParse(_)
            | Self::OtlpParse(_) => StatusCode::BAD_REQUEST,
            Self::Processing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl From<PayloadError> for IngestError {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::EmptyBody => Self::EmptyBody,
            PayloadError::Utf8(_) | PayloadError::Json(_) | PayloadError::NotAnObject(_) => {
                Self::JsonParse(err)
            }
            PayloadError::UnknownDataType => Self::UnknownDataType,
            PayloadError::StructuredLog(e) => Self::StructuredLogParse(e),
            PayloadError::SpanBundle(e) => Self::OtlpParse(e),
        }
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let cause = self.source().map(ToString::to_string);

        if status.is_server_error() {
            tracing::error!(%status, error = %self, cause = ?cause, "Request failed");
        } else {
            tracing::warn!(%status, error = %self, cause = ?cause, "Request rejected");
        }

        (status, self.to_string()).into_response()
    }
}
