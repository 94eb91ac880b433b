//! Console rendering of payloads.
//!
//! Each renderer is a `Display` wrapper so a whole block can be formatted into
//! one string and handed to a [`ConsoleSink`](crate::sink::ConsoleSink) in a
//! single write.
//!
//! Opaque JSON (metadata, span events and links, echoed bodies) is re-indented
//! from the text the sender wrote, so key order and number spelling survive.

use crate::models::{KeyValue, SpanBundle, StructuredLog};
use crate::payload::Payload;
use std::fmt::{self, Display, Formatter, Write};

/// Renders a [`StructuredLog`] as a header line plus indented details.
///
/// ```
/// use shared::models::StructuredLog;
/// use shared::render::LogBlock;
///
/// let log: StructuredLog = serde_json::from_str(
///     r#"{"type":"structured_log","timestamp":"t","level":"info","message":"m","service":"s"}"#,
/// ).unwrap();
///
/// assert_eq!(LogBlock(&log).to_string(), "[t] info s: m\n");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LogBlock<'a>(pub &'a StructuredLog);

impl Display for LogBlock<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let log = self.0;
        writeln!(
            f,
            "[{}] {} {}: {}",
            log.timestamp, log.level, log.service, log.message
        )?;

        if let Some(trace_id) = &log.trace_id {
            writeln!(f, "  TraceID: {trace_id}")?;
        }
        if let Some(span_id) = &log.span_id {
            writeln!(f, "  SpanID: {span_id}")?;
        }
        if let Some(error) = &log.error {
            writeln!(f, "  Error: {}: {}", error.name, error.message)?;
            if let Some(stack) = &error.stack {
                for line in stack.lines() {
                    writeln!(f, "    {}", line.trim_start())?;
                }
            }
        }
        if let Some(metadata) = &log.metadata {
            writeln!(f, "  Metadata:")?;
            write_json_text(f, metadata.get(), "    ")?;
        }
        Ok(())
    }
}

/// Renders a [`SpanBundle`] resource by resource, scope by scope, span by span.
///
/// An empty bundle renders as the empty string.
#[derive(Debug, Clone, Copy)]
pub struct SpanBlock<'a>(pub &'a SpanBundle);

impl Display for SpanBlock<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for rs in &self.0.resource_spans {
            writeln!(f, "\n=== Resource ===")?;
            writeln!(f, "Resource Attributes:")?;
            write_attributes(f, &rs.resource.attributes, "  ")?;
            if rs.resource.dropped_attributes_count > 0 {
                writeln!(
                    f,
                    "Dropped Resource Attributes: {}",
                    rs.resource.dropped_attributes_count
                )?;
            }

            for ss in &rs.scope_spans {
                match ss.scope.version() {
                    Some(version) => writeln!(
                        f,
                        "\n=== Scope: {} (Version: {version}) ===",
                        ss.scope.display_name()
                    )?,
                    None => writeln!(f, "\n=== Scope: {} ===", ss.scope.display_name())?,
                }

                for span in &ss.spans {
                    writeln!(f, "\nSpan: {}", span.name)?;
                    writeln!(f, "  TraceID: {}", span.trace_id)?;
                    writeln!(f, "  SpanID: {}", span.span_id)?;
                    if let Some(parent) = span.parent_span_id() {
                        writeln!(f, "  ParentSpanID: {parent}")?;
                    }
                    writeln!(f, "  Kind: {}", span.kind)?;
                    writeln!(f, "  Start Time: {}", span.start_time_unix_nano)?;
                    writeln!(f, "  End Time: {}", span.end_time_unix_nano)?;
                    writeln!(f, "  Status Code: {}", span.status.code)?;
                    if let Some(message) = span.status.message() {
                        writeln!(f, "  Status Message: {message}")?;
                    }

                    if !span.attributes.is_empty() {
                        writeln!(f, "  Attributes:")?;
                        write_attributes(f, &span.attributes, "    ")?;
                    }

                    if span.dropped_attributes_count > 0 {
                        writeln!(f, "  Dropped Attributes: {}", span.dropped_attributes_count)?;
                    }
                    if span.dropped_events_count > 0 {
                        writeln!(f, "  Dropped Events: {}", span.dropped_events_count)?;
                    }
                    if span.dropped_links_count > 0 {
                        writeln!(f, "  Dropped Links: {}", span.dropped_links_count)?;
                    }

                    if !span.events.is_empty() {
                        writeln!(f, "  Events:")?;
                        for event in &span.events {
                            write_json_text(f, event.get(), "    ")?;
                        }
                    }
                    if !span.links.is_empty() {
                        writeln!(f, "  Links:")?;
                        for link in &span.links {
                            write_json_text(f, link.get(), "    ")?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Renders JSON text pretty-printed with two-space indentation.
///
/// The text must already be valid JSON. Only whitespace between tokens is
/// changed.
///
/// ```
/// use shared::render::JsonBlock;
///
/// let rendered = JsonBlock(r#"{"b":1,"a":[]}"#).to_string();
/// assert_eq!(rendered, "{\n  \"b\": 1,\n  \"a\": []\n}\n");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct JsonBlock<'a>(pub &'a str);

impl Display for JsonBlock<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_json_text(f, self.0, "")
    }
}

impl Payload {
    /// Renders the payload with the renderer matching its kind.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::StructuredLog(log) => LogBlock(log).to_string(),
            Self::SpanBundle(bundle) => SpanBlock(bundle).to_string(),
        }
    }
}

fn write_attributes(f: &mut Formatter<'_>, attributes: &[KeyValue], indent: &str) -> fmt::Result {
    for attr in attributes {
        writeln!(f, "{indent}{}: {}", attr.key, attr.value.resolve())?;
    }
    Ok(())
}

/// Writes valid JSON text with two-space indentation, each line starting with
/// `prefix`. Empty objects and arrays stay on one line.
fn write_json_text<W: Write>(out: &mut W, text: &str, prefix: &str) -> fmt::Result {
    let mut chars = text.trim().chars().peekable();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    out.write_str(prefix)?;
    while let Some(c) = chars.next() {
        if in_string {
            out.write_char(c)?;
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.write_char(c)?;
            }
            '{' | '[' => {
                out.write_char(c)?;
                while chars.next_if(char::is_ascii_whitespace).is_some() {}
                match chars.next_if(|next| matches!(next, '}' | ']')) {
                    Some(close) => out.write_char(close)?,
                    None => {
                        depth += 1;
                        write_line_break(out, prefix, depth)?;
                    }
                }
            }
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                write_line_break(out, prefix, depth)?;
                out.write_char(c)?;
            }
            ',' => {
                out.write_char(c)?;
                write_line_break(out, prefix, depth)?;
            }
            ':' => out.write_str(": ")?,
            c if c.is_ascii_whitespace() => {}
            c => out.write_char(c)?,
        }
    }
    out.write_char('\n')
}

fn write_line_break<W: Write>(out: &mut W, prefix: &str, depth: usize) -> fmt::Result {
    out.write_char('\n')?;
    out.write_str(prefix)?;
    for _ in 0..depth {
        out.write_str("  ")?;
    }
    Ok(())
}
