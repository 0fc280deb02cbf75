//! Error conversion utilities for CLI.
//!
//! Converts dirzip-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use dirzip_core::ZipError;
use std::path::Path;

/// Converts `ZipError` to user-friendly anyhow error with context
pub fn convert_zip_error(err: ZipError, archive: &Path) -> anyhow::Error {
    match err {
        ZipError::CreateDestination { path, source } => {
            anyhow!(
                "Cannot create archive '{}': {}\n\
                 HINT: Check that the parent directory exists and is writable.",
                path.display(),
                source
            )
        }
        ZipError::Traversal { path, source } => {
            anyhow!(
                "Cannot read source '{}': {}\n\
                 HINT: Check that the source exists and every directory is readable.\n\
                 NOTE: '{}' may contain a partial archive.",
                path.display(),
                source,
                archive.display()
            )
        }
        ZipError::SourceFileUnreadable { path, source } => {
            anyhow!(
                "Cannot open file '{}': {}\n\
                 HINT: Check file permissions, or whether a symlink points nowhere.\n\
                 NOTE: '{}' may contain a partial archive.",
                path.display(),
                source,
                archive.display()
            )
        }
        ZipError::EntryWrite {
            entry,
            archive,
            source,
        } => {
            anyhow!(
                "Failed to write entry '{}' to '{}': {}\n\
                 HINT: Check free disk space on the destination.",
                entry,
                archive.display(),
                source
            )
        }
        ZipError::InvalidOption { option, reason } => {
            anyhow!("Invalid option {option}: {reason}")
        }
        err @ ZipError::Finalize { .. } => anyhow::Error::from(err)
            .context(format!("Error creating archive '{}'", archive.display())),
    }
}

/// Adds context to a result from the archiver
pub fn add_archive_context<T>(
    result: Result<T, ZipError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_zip_error(e, archive))
}
