//! OpenTelemetry tracing with file-based span export.
//!
//! Zellij plugins run sandboxed without a collector to talk to, so spans are
//! serialized as OTLP JSON and appended to a rotating file:
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! Traces land in `~/.local/share/zellij/reelsearch/reelsearch-otlp.json`, one
//! OTLP document per exported batch. Files rotate at 10MB and three backups are
//! kept.
//!
//! The span filter comes from the `trace_level` plugin option and defaults to
//! `"info"`.
//!
//! ```rust
//! use reelsearch::observability::init_tracing;
//! use reelsearch::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin initialized");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;

/// Service and instrumentation scope name attached to every exported span.
const SERVICE_NAME: &str = "reelsearch";
