//! Configuration for the archiver.

use crate::ZipError;
use crate::error::Result;
use crate::sink::DiagnosticSink;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration accepted by [`Archiver::with_config`](crate::Archiver::with_config).
///
/// Every field is optional. The defaults discard all diagnostics.
///
/// # Examples
///
/// ```
/// use dirzip_core::ArchiverConfig;
/// use dirzip_core::TracingSink;
///
/// let config = ArchiverConfig::default().with_logger(TracingSink);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Default)]
pub struct ArchiverConfig {
    /// Sink receiving one line per traversal step and archive operation.
    ///
    /// Default: `None` (diagnostics are discarded).
    pub logger: Option<Arc<dyn DiagnosticSink>>,

    /// File to append diagnostic lines to.
    ///
    /// The file is created if missing. Mutually exclusive with `logger`.
    ///
    /// Default: `None`.
    pub log_file: Option<PathBuf>,

    /// Prefix for every line written to `log_file`.
    ///
    /// Must not contain line breaks.
    ///
    /// Default: empty.
    pub log_prefix: String,
}

impl ArchiverConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the diagnostic sink.
    #[must_use]
    pub fn with_logger(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.logger = Some(Arc::new(sink));
        self
    }

    /// Sets the file diagnostics are appended to.
    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Sets the prefix for lines written to the log file.
    #[must_use]
    pub fn with_log_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_prefix = prefix.into();
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ZipError::InvalidOption`] if:
    /// - both `logger` and `log_file` are set
    /// - `log_prefix` contains a line break
    pub fn validate(&self) -> Result<()> {
        if self.logger.is_some() && self.log_file.is_some() {
            return Err(ZipError::InvalidOption {
                option: "log_file",
                reason: "cannot be combined with a logger".to_string(),
            });
        }

        if self.log_prefix.contains(['\n', '\r']) {
            return Err(ZipError::InvalidOption {
                option: "log_prefix",
                reason: "prefix must not contain line breaks".to_string(),
            });
        }

        Ok(())
    }
}

impl fmt::Debug for ArchiverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiverConfig")
            .field("logger", &self.logger.as_ref().map(|_| "<sink>"))
            .field("log_file", &self.log_file)
            .field("log_prefix", &self.log_prefix)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::NoopSink;

    #[test]
    fn test_default_config() {
        let config = ArchiverConfig::default();
        assert!(config.logger.is_none());
        assert!(config.log_file.is_none());
        assert!(config.log_prefix.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ArchiverConfig::new()
            .with_log_file("/tmp/dirzip.log")
            .with_log_prefix("job-42: ");

        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/dirzip.log")));
        assert_eq!(config.log_prefix, "job-42: ");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_logger_and_log_file() {
        let config = ArchiverConfig::new()
            .with_logger(NoopSink)
            .with_log_file("out.log");

        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOption);
        assert!(err.to_string().contains("log_file"));
    }

    #[test]
    fn test_validate_rejects_multiline_prefix() {
        for prefix in ["a\nb", "trailing\r"] {
            let config = ArchiverConfig::new().with_log_prefix(prefix);
            let err = config.validate().unwrap_err();
            assert!(matches!(
                err,
                ZipError::InvalidOption {
                    option: "log_prefix",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_debug_hides_sink() {
        let config = ArchiverConfig::new().with_logger(NoopSink);
        let debug = format!("{config:?}");
        assert!(debug.contains("<sink>"));
    }
}
