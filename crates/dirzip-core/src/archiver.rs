//! The archiver: walks a source path and writes every regular file into a
//! new ZIP archive.

use crate::ZipError;
use crate::config::ArchiverConfig;
use crate::error::Result;
use crate::report::ZipReport;
use crate::sink::DiagnosticSink;
use crate::sink::NoopSink;
use crate::sink::WriterSink;
use crate::walker::SkipReason;
use crate::walker::SourceEntry;
use crate::walker::SourceWalker;
use std::fmt;
use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const COPY_BUFFER_SIZE: usize = 64 * 1024;
const ZIP64_THRESHOLD: u64 = 0xFFFF_FFFF;

/// Packages a file or directory tree into a ZIP archive.
///
/// An `Archiver` is immutable once built and may be shared between threads.
/// It holds nothing but its diagnostic sink.
///
/// # Examples
///
/// ```no_run
/// use dirzip_core::Archiver;
/// use dirzip_core::TracingSink;
///
/// let archiver = Archiver::builder().logger(TracingSink).build()?;
/// let report = archiver.zip("project/", "project.zip")?;
/// println!("added {} files", report.files_added);
/// # Ok::<(), dirzip_core::ZipError>(())
/// ```
#[derive(Clone)]
pub struct Archiver {
    sink: Arc<dyn DiagnosticSink>,
}

impl Archiver {
    /// Creates an archiver that discards all diagnostics.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sink: Arc::new(NoopSink),
        }
    }

    /// Returns a builder for configuring an archiver.
    #[must_use]
    pub fn builder() -> ArchiverBuilder {
        ArchiverBuilder::new()
    }

    /// Creates an archiver from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ZipError::InvalidOption`] if the configuration is invalid or
    /// the log file cannot be opened.
    pub fn with_config(config: ArchiverConfig) -> Result<Self> {
        config.validate()?;

        let sink: Arc<dyn DiagnosticSink> = match (config.logger, config.log_file) {
            (Some(sink), _) => sink,
            (None, Some(path)) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .map_err(|e| ZipError::InvalidOption {
                        option: "log_file",
                        reason: format!("cannot open {}: {e}", path.display()),
                    })?;
                Arc::new(WriterSink::with_prefix(file, config.log_prefix))
            }
            (None, None) => Arc::new(NoopSink),
        };

        Ok(Self { sink })
    }

    /// Zips `source` into a new archive at `destination`.
    ///
    /// If `source` is a file, the archive holds that single file at its root
    /// under its base name. If `source` is a directory, every regular file
    /// beneath it is stored under its path relative to `source`, using `/`
    /// separators. Directories never become entries.
    ///
    /// Any existing file at `destination` is truncated. The destination is
    /// created before traversal starts.
    ///
    /// # Errors
    ///
    /// Every failure aborts the operation. Partial output is left on disk.
    ///
    /// - [`ZipError::CreateDestination`]: `destination` cannot be created
    /// - [`ZipError::Traversal`]: `source` is missing or a directory cannot
    ///   be read
    /// - [`ZipError::SourceFileUnreadable`]: a file cannot be opened
    /// - [`ZipError::EntryWrite`]: starting an entry or copying into it fails
    /// - [`ZipError::Finalize`]: the central directory cannot be written
    pub fn zip<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        source: P,
        destination: Q,
    ) -> Result<ZipReport> {
        let source = source.as_ref();
        let destination = destination.as_ref();
        let start = Instant::now();

        self.trace(format_args!("creating archive at {}", destination.display()));
        let file = File::create(destination).map_err(|e| ZipError::CreateDestination {
            path: destination.to_path_buf(),
            source: e,
        })?;

        // Dropping the writer on an error path finalizes whatever was written.
        let mut zip = ZipWriter::new(file);
        let mut report = self.write_entries(&mut zip, source, destination)?;

        zip.finish().map_err(|e| ZipError::Finalize {
            archive: destination.to_path_buf(),
            source: io::Error::other(e),
        })?;

        report.duration = start.elapsed();
        self.trace(format_args!(
            "finished archive {} ({} entries)",
            destination.display(),
            report.files_added
        ));

        Ok(report)
    }

    fn write_entries<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        source: &Path,
        destination: &Path,
    ) -> Result<ZipReport> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut report = ZipReport::default();
        let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
        let destination_path = fs::canonicalize(destination).ok();

        for entry in SourceWalker::new(source).walk() {
            let entry = entry?;
            self.trace(format_args!("walking {}", entry.path().display()));

            match entry {
                SourceEntry::Directory { .. } => {
                    report.directories_visited += 1;
                }
                SourceEntry::Skipped { path, reason } => {
                    self.trace(format_args!("skipping {}: {reason}", path.display()));
                    report.entries_skipped += 1;
                }
                SourceEntry::File { path, .. }
                    if is_destination(&path, destination_path.as_deref()) =>
                {
                    let reason = SkipReason::Destination;
                    self.trace(format_args!("skipping {}: {reason}", path.display()));
                    report.entries_skipped += 1;
                }
                SourceEntry::File { path, archive_path } => {
                    let (name, bytes) = add_file(
                        zip,
                        &path,
                        &archive_path,
                        destination,
                        options,
                        &mut buffer,
                    )?;
                    self.trace(format_args!("added {name} ({bytes} bytes)"));
                    report.files_added += 1;
                    report.bytes_written += bytes;
                }
            }
        }

        Ok(report)
    }

    fn trace(&self, args: fmt::Arguments<'_>) {
        match args.as_str() {
            Some(line) => self.sink.trace(line),
            None => self.sink.trace(&args.to_string()),
        }
    }
}

impl Default for Archiver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Archiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Archiver").finish_non_exhaustive()
    }
}

/// Builder for [`Archiver`] with fluent API.
///
/// Settings are applied in call order; `build` validates the result.
///
/// # Examples
///
/// ```no_run
/// use dirzip_core::Archiver;
///
/// let archiver = Archiver::builder()
///     .log_file("dirzip.log")
///     .log_prefix("nightly: ")
///     .build()?;
/// # Ok::<(), dirzip_core::ZipError>(())
/// ```
#[derive(Debug, Default)]
pub struct ArchiverBuilder {
    config: ArchiverConfig,
}

impl ArchiverBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a diagnostic sink.
    #[must_use]
    pub fn logger(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.config.logger = Some(Arc::new(sink));
        self
    }

    /// Appends diagnostics to the file at `path`.
    #[must_use]
    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_file = Some(path.into());
        self
    }

    /// Sets the prefix of lines written to the log file.
    #[must_use]
    pub fn log_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.log_prefix = prefix.into();
        self
    }

    /// Builds the archiver.
    ///
    /// # Errors
    ///
    /// Returns [`ZipError::InvalidOption`] if a setting is rejected.
    pub fn build(self) -> Result<Archiver> {
        Archiver::with_config(self.config)
    }
}

/// Opens `path` and streams it into a new entry. Returns the entry name and
/// the number of bytes copied.
fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    path: &Path,
    archive_path: &Path,
    destination: &Path,
    options: SimpleFileOptions,
    buffer: &mut [u8],
) -> Result<(String, u64)> {
    let unreadable = |source: io::Error| ZipError::SourceFileUnreadable {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(unreadable)?;
    let size = file.metadata().map_err(unreadable)?.len();

    let entry_error = |entry: &str, source: io::Error| ZipError::EntryWrite {
        entry: entry.to_string(),
        archive: destination.to_path_buf(),
        source,
    };

    let name = normalize_entry_name(archive_path)
        .map_err(|e| entry_error(&archive_path.to_string_lossy(), e))?;

    // Entries past the 32-bit size limit need Zip64 headers.
    let options = options.large_file(size >= ZIP64_THRESHOLD);
    zip.start_file(name.as_str(), options)
        .map_err(|e| entry_error(&name, io::Error::other(e)))?;

    let mut bytes_written = 0u64;
    loop {
        let bytes_read = match file.read(buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(entry_error(&name, e)),
        };
        zip.write_all(&buffer[..bytes_read])
            .map_err(|e| entry_error(&name, e))?;
        bytes_written += bytes_read as u64;
    }

    Ok((name, bytes_written))
}

/// Returns true if `path` is the archive currently being written.
fn is_destination(path: &Path, destination: Option<&Path>) -> bool {
    let Some(destination) = destination else {
        return false;
    };
    path.file_name() == destination.file_name()
        && fs::canonicalize(path).is_ok_and(|canonical| canonical == destination)
}

/// Converts an archive path to a ZIP entry name.
///
/// ZIP entry names are UTF-8 strings separated by forward slashes on every
/// platform.
fn normalize_entry_name(archive_path: &Path) -> io::Result<String> {
    let mut parts = Vec::new();
    for component in archive_path.components() {
        if let Component::Normal(part) = component {
            let part = part.to_str().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("path is not valid UTF-8: {}", archive_path.display()),
                )
            })?;
            parts.push(part);
        }
    }
    Ok(parts.join("/"))
}
