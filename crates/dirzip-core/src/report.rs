//! Archive creation reporting.

use std::time::Duration;

/// Report of a successful [`Archiver::zip`](crate::Archiver::zip) call.
///
/// # Examples
///
/// ```
/// use dirzip_core::ZipReport;
///
/// let mut report = ZipReport::new();
/// report.files_added = 2;
/// report.directories_visited = 1;
/// report.entries_skipped = 1;
/// assert_eq!(report.total_visited(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZipReport {
    /// Number of archive entries written.
    pub files_added: usize,

    /// Number of directories traversed, including the root.
    pub directories_visited: usize,

    /// Number of items left out of the archive (see [`SkipReason`](crate::SkipReason)).
    pub entries_skipped: usize,

    /// Total uncompressed bytes copied into the archive.
    pub bytes_written: u64,

    /// Wall-clock duration of the operation.
    pub duration: Duration,
}

impl ZipReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of traversal items seen.
    #[must_use]
    pub const fn total_visited(&self) -> usize {
        self.files_added + self.directories_visited + self.entries_skipped
    }
}
