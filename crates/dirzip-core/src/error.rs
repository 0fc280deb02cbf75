//! Error types for archive creation.

use std::io;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ZipError`.
pub type Result<T> = std::result::Result<T, ZipError>;

/// Category of a [`ZipError`], independent of the context it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The destination archive could not be opened for writing.
    CreateDestinationFailed,
    /// Enumerating the source tree failed.
    TraversalFailed,
    /// A discovered regular file could not be opened for reading.
    SourceFileUnreadable,
    /// Creating or writing an archive entry failed.
    EntryWriteFailed,
    /// Writing the archive's central directory failed.
    FinalizeFailed,
    /// A construction option was rejected.
    InvalidOption,
}

/// Errors that can occur while building an archiver or zipping a source.
#[derive(Error, Debug)]
pub enum ZipError {
    /// Destination file could not be created or truncated.
    #[error("unable to create archive at {}: {source}", path.display())]
    CreateDestination {
        /// The destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Directory traversal failed partway.
    #[error("error while walking {}: {source}", path.display())]
    Traversal {
        /// The path being visited when traversal failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A regular file could not be opened for reading.
    #[error("unable to open source file {}: {source}", path.display())]
    SourceFileUnreadable {
        /// The source file path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// An entry could not be created in, or copied into, the archive.
    #[error("unable to write entry {entry} in {}: {source}", archive.display())]
    EntryWrite {
        /// Entry name inside the archive.
        entry: String,
        /// The destination archive path.
        archive: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },

    /// The archive could not be finalized.
    #[error("unable to finish archive {}: {source}", archive.display())]
    Finalize {
        /// The destination archive path.
        archive: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },

    /// An archiver option could not be applied.
    #[error("unable to apply option {option}: {reason}")]
    InvalidOption {
        /// Name of the rejected option.
        option: &'static str,
        /// Why the option was rejected.
        reason: String,
    },
}

impl ZipError {
    /// Returns the category of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirzip_core::ErrorKind;
    /// use dirzip_core::ZipError;
    ///
    /// let err = ZipError::InvalidOption {
    ///     option: "log_prefix",
    ///     reason: "contains a line break".into(),
    /// };
    /// assert_eq!(err.kind(), ErrorKind::InvalidOption);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::CreateDestination { .. } => ErrorKind::CreateDestinationFailed,
            Self::Traversal { .. } => ErrorKind::TraversalFailed,
            Self::SourceFileUnreadable { .. } => ErrorKind::SourceFileUnreadable,
            Self::EntryWrite { .. } => ErrorKind::EntryWriteFailed,
            Self::Finalize { .. } => ErrorKind::FinalizeFailed,
            Self::InvalidOption { .. } => ErrorKind::InvalidOption,
        }
    }

    /// Returns the filesystem path this error refers to, if any.
    ///
    /// For entry and finalize failures this is the destination archive.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::CreateDestination { path, .. }
            | Self::Traversal { path, .. }
            | Self::SourceFileUnreadable { path, .. } => Some(path),
            Self::EntryWrite { archive, .. } | Self::Finalize { archive, .. } => Some(archive),
            Self::InvalidOption { .. } => None,
        }
    }

    /// Returns the underlying I/O error, if this error wraps one.
    #[must_use]
    pub const fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::CreateDestination { source, .. }
            | Self::Traversal { source, .. }
            | Self::SourceFileUnreadable { source, .. }
            | Self::EntryWrite { source, .. }
            | Self::Finalize { source, .. } => Some(source),
            Self::InvalidOption { .. } => None,
        }
    }
}
