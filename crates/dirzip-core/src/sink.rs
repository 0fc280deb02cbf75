//! Diagnostic sinks for tracing archive creation.
//!
//! A sink receives one formatted line per traversal step and per archive
//! operation. Sinks are purely observational: they cannot fail and never
//! influence how an archive is built.

use std::fmt;
use std::io::Write;
use std::sync::Mutex;

/// Consumer of diagnostic trace lines.
///
/// The trait requires `Send + Sync` so that an [`Archiver`](crate::Archiver)
/// holding a sink can be shared across threads.
///
/// Closures taking `&str` implement the trait directly.
///
/// # Examples
///
/// ```
/// use dirzip_core::DiagnosticSink;
///
/// struct StderrSink;
///
/// impl DiagnosticSink for StderrSink {
///     fn trace(&self, line: &str) {
///         eprintln!("dirzip: {line}");
///     }
/// }
///
/// let sink = StderrSink;
/// sink.trace("walking ./src");
/// ```
pub trait DiagnosticSink: Send + Sync {
    /// Records one trace line. The line carries no trailing newline.
    fn trace(&self, line: &str);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn trace(&self, line: &str) {
        self(line);
    }
}

/// Sink that discards every line.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn trace(&self, _line: &str) {}
}

/// Sink that forwards lines to `tracing` as `TRACE` events.
///
/// Events use the `dirzip` target so they can be enabled with a filter such as
/// `RUST_LOG=dirzip=trace`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn trace(&self, line: &str) {
        tracing::trace!(target: "dirzip", "{line}");
    }
}

/// Sink that writes prefixed lines to any `Write` implementation.
///
/// Write errors are ignored.
///
/// # Examples
///
/// ```
/// use dirzip_core::DiagnosticSink;
/// use dirzip_core::WriterSink;
///
/// let sink = WriterSink::with_prefix(Vec::new(), "zip: ");
/// sink.trace("walking ./src");
/// assert_eq!(sink.into_inner(), b"zip: walking ./src\n");
/// ```
pub struct WriterSink<W> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    /// Creates a sink writing unprefixed lines.
    pub fn new(writer: W) -> Self {
        Self::with_prefix(writer, "")
    }

    /// Creates a sink that prepends `prefix` to every line.
    pub fn with_prefix(writer: W, prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Returns the prefix prepended to each line.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Consumes the sink and returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<W: Write + Send> DiagnosticSink for WriterSink<W> {
    fn trace(&self, line: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}{line}", self.prefix);
            let _ = writer.flush();
        }
    }
}

impl<W> fmt::Debug for WriterSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
