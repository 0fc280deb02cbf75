//! Packages a file or directory tree into a single ZIP archive.
//!
//! `dirzip-core` walks a source path and streams every regular file it finds
//! into an entry of a newly created archive. A single file is stored at the
//! archive root under its base name; a directory's files are stored under
//! their paths relative to that directory.
//!
//! # Examples
//!
//! ```no_run
//! use dirzip_core::Archiver;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let archiver = Archiver::new();
//! let report = archiver.zip("assets/", "assets.zip")?;
//! println!("Added {} files", report.files_added);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archiver;
pub mod config;
pub mod error;
pub mod report;
pub mod sink;
pub mod walker;

// Re-export main API types
pub use archiver::Archiver;
pub use archiver::ArchiverBuilder;
pub use config::ArchiverConfig;
pub use error::ErrorKind;
pub use error::Result;
pub use error::ZipError;
pub use report::ZipReport;
pub use sink::DiagnosticSink;
pub use sink::NoopSink;
pub use sink::TracingSink;
pub use sink::WriterSink;
pub use walker::SkipReason;
pub use walker::SourceEntry;
pub use walker::SourceWalker;
