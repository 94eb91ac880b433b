//! Debug Sink Shared Library
//!
//! This crate contains the payload models, classification, and console
//! rendering used by the debug sink server and CLI.
//!
//! # Modules
//!
//! - [`models`] - Structured log and OTLP span bundle shapes
//! - [`payload`] - Body parsing and shape classification
//! - [`render`] - Human-readable console rendering
//! - [`sink`] - Console output capability
//!
//! # Example
//!
//! ```
//! use shared::payload::{Payload, PayloadKind};
//!
//! let payload = Payload::from_slice(
//!     br#"{"type":"structured_log","timestamp":"t","level":"info","message":"hi","service":"web"}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(payload.kind(), PayloadKind::StructuredLog);
//! assert_eq!(payload.render(), "[t] info web: hi\n");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod models;
pub mod payload;
pub mod render;
pub mod sink;

/// Re-export common dependencies for convenience.
pub use serde;
pub use serde_json;
