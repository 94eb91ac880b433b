//! Debug Sink CLI
//!
//! Classifies and renders observability payloads without running the server,
//! using the same parser and renderers as the HTTP endpoint.
//!
//! # Usage
//!
//! ```bash
//! debug-sink --help
//! debug-sink classify export.json
//! curl -s ... | debug-sink render
//! ```

#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared::payload::Payload;
use shared::sink::{ConsoleSink, StdoutSink};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Debug Sink CLI - render structured logs and OTLP spans offline
#[derive(Parser)]
#[command(name = "debug-sink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Diagnostic log filter, written to stderr
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a payload the way the server would
    Render {
        /// JSON file to read, stdin when omitted or `-`
        file: Option<PathBuf>,
    },
    /// Print which kind of payload a body is
    Classify {
        /// JSON file to read, stdin when omitted or `-`
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let file = match &cli.command {
        Commands::Render { file } | Commands::Classify { file } => file.as_deref(),
    };
    let body = read_input(file)?;

    run(&cli.command, &body, &StdoutSink)
}

/// Reads the whole input, from stdin when no path or `-` is given.
fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
    match file {
        Some(path) if path != Path::new("-") => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        _ => {
            let mut body = Vec::new();
            std::io::stdin()
                .read_to_end(&mut body)
                .context("failed to read stdin")?;
            Ok(body)
        }
    }
}

fn run(command: &Commands, body: &[u8], sink: &dyn ConsoleSink) -> Result<()> {
    let payload = Payload::from_slice(body).context("payload rejected")?;
    tracing::debug!(kind = %payload.kind(), bytes = body.len(), "Parsed payload");

    let block = match command {
        Commands::Render { .. } => payload.render(),
        Commands::Classify { .. } => format!("{}\n", payload.kind()),
    };

    if !block.is_empty() {
        sink.write_block(&block).context("failed to write output")?;
    }
    Ok(())
}
