//! Source tree traversal and archive path computation.
//!
//! The walker performs a lazy depth-first traversal of a source path and
//! classifies every item it meets. Regular files carry the path they will
//! occupy inside the archive, relative to the traversal root.

use crate::ZipError;
use crate::error::Result;
use std::fmt;
use std::io;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Walks a source file or directory tree.
///
/// Symbolic links are not followed during descent:
/// - a link to a regular file is yielded as a file (its target's content is
///   archived under the link's own name)
/// - a link to a directory is yielded as [`SourceEntry::Skipped`]
/// - a dangling link is yielded as a file, so opening it fails later
///
/// Entries within a directory are visited in file name order.
///
/// # Examples
///
/// ```no_run
/// use dirzip_core::walker::SourceEntry;
/// use dirzip_core::walker::SourceWalker;
///
/// let walker = SourceWalker::new("./project");
///
/// for entry in walker.walk() {
///     if let SourceEntry::File { archive_path, .. } = entry? {
///         println!("would add: {}", archive_path.display());
///     }
/// }
/// # Ok::<(), dirzip_core::ZipError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SourceWalker {
    root: PathBuf,
}

impl SourceWalker {
    /// Creates a walker rooted at `root`, which may be a file or a directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Returns the traversal root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns a lazy depth-first iterator over the tree.
    ///
    /// Each call starts a fresh traversal. The root itself is the first item
    /// yielded.
    ///
    /// # Errors
    ///
    /// Items are `Err` with [`ZipError::Traversal`] when a directory cannot be
    /// read, the root does not exist, or an archive path cannot be computed.
    pub fn walk(&self) -> impl Iterator<Item = Result<SourceEntry>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .map(move |entry| match entry {
                Ok(entry) => self.classify(&entry),
                Err(err) => Err(self.traversal_error(err)),
            })
    }

    fn classify(&self, entry: &walkdir::DirEntry) -> Result<SourceEntry> {
        let path = entry.path().to_path_buf();
        let file_type = entry.file_type();

        if file_type.is_dir() {
            return Ok(SourceEntry::Directory { path });
        }

        if file_type.is_symlink() {
            // Dangling links fall through and fail when opened.
            if let Ok(target) = std::fs::metadata(&path) {
                if target.is_dir() {
                    return Ok(SourceEntry::Skipped {
                        path,
                        reason: SkipReason::LinkedDirectory,
                    });
                }
                if !target.is_file() {
                    return Ok(SourceEntry::Skipped {
                        path,
                        reason: SkipReason::NotRegularFile,
                    });
                }
            }
        } else if !file_type.is_file() {
            return Ok(SourceEntry::Skipped {
                path,
                reason: SkipReason::NotRegularFile,
            });
        }

        let archive_path = archive_path(&self.root, &path)?;
        Ok(SourceEntry::File { path, archive_path })
    }

    fn traversal_error(&self, err: walkdir::Error) -> ZipError {
        let path = err
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        ZipError::Traversal {
            path,
            source: io::Error::from(err),
        }
    }
}

/// One item produced by [`SourceWalker::walk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEntry {
    /// A directory. Never becomes an archive entry; traversal descends into it.
    Directory {
        /// Filesystem path.
        path: PathBuf,
    },

    /// A regular file that becomes exactly one archive entry.
    File {
        /// Filesystem path.
        path: PathBuf,
        /// Path inside the archive, relative to the traversal root.
        archive_path: PathBuf,
    },

    /// An item that is neither archived nor descended into.
    Skipped {
        /// Filesystem path.
        path: PathBuf,
        /// Why the item was skipped.
        reason: SkipReason,
    },
}

impl SourceEntry {
    /// Returns the filesystem path of this item.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory { path } | Self::File { path, .. } | Self::Skipped { path, .. } => path,
        }
    }
}

/// Reason an item was left out of the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Symbolic link pointing at a directory.
    LinkedDirectory,
    /// Socket, FIFO, device node, or a link to one.
    NotRegularFile,
    /// The archive being written, when it lies inside the source tree.
    Destination,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LinkedDirectory => f.write_str("symlink to directory"),
            Self::NotRegularFile => f.write_str("not a regular file"),
            Self::Destination => f.write_str("destination archive"),
        }
    }
}

/// Computes the archive path of `path` relative to the traversal `root`.
///
/// When `path` is the root itself (the source is a single file), the result
/// is the root's base name.
///
/// # Examples
///
/// ```
/// use dirzip_core::walker::archive_path;
/// use std::path::Path;
///
/// let nested = archive_path(Path::new("/data"), Path::new("/data/a/b.txt"))?;
/// assert_eq!(nested, Path::new("a/b.txt"));
///
/// let single = archive_path(Path::new("/data/notes.txt"), Path::new("/data/notes.txt"))?;
/// assert_eq!(single, Path::new("notes.txt"));
/// # Ok::<(), dirzip_core::ZipError>(())
/// ```
///
/// # Errors
///
/// Returns [`ZipError::Traversal`] if `path` is not under `root`, or if the
/// root has no base name (e.g. `/` or `..`).
pub fn archive_path(root: &Path, path: &Path) -> Result<PathBuf> {
    let relative = path.strip_prefix(root).map_err(|_| ZipError::Traversal {
        path: path.to_path_buf(),
        source: io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("path is not under root {}", root.display()),
        ),
    })?;

    let relative: PathBuf = relative
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();

    if !relative.as_os_str().is_empty() {
        return Ok(relative);
    }

    root.file_name()
        .map(PathBuf::from)
        .ok_or_else(|| ZipError::Traversal {
            path: root.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                "cannot determine base name of source",
            ),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Allow unwrap in tests for brevity
mod tests {
    use super::*;
    use crate::ErrorKind;
    use std::fs;
    use tempfile::TempDir;

    fn files(walker: &SourceWalker) -> Vec<PathBuf> {
        walker
            .walk()
            .filter_map(|entry| match entry.unwrap() {
                SourceEntry::File { archive_path, .. } => Some(archive_path),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_walker_single_file_uses_base_name() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("test_file.txt");
        fs::write(&file, "Test text").unwrap();

        let walker = SourceWalker::new(&file);
        let entries: Vec<_> = walker.walk().collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(
            entries,
            vec![SourceEntry::File {
                path: file,
                archive_path: PathBuf::from("test_file.txt"),
            }]
        );
    }

    #[test]
    fn test_walker_directory_yields_root_first() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("file1"), "This is file1").unwrap();

        let walker = SourceWalker::new(temp.path());
        let first = walker.walk().next().unwrap().unwrap();

        assert_eq!(
            first,
            SourceEntry::Directory {
                path: temp.path().to_path_buf()
            }
        );
    }

    #[test]
    fn test_walker_nested_paths_sorted() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("b/inner")).unwrap();
        fs::write(root.join("c.txt"), "c").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("b/inner/deep.txt"), "deep").unwrap();
        fs::write(root.join("b/z.txt"), "z").unwrap();

        let walker = SourceWalker::new(root);

        assert_eq!(
            files(&walker),
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b/inner/deep.txt"),
                PathBuf::from("b/z.txt"),
                PathBuf::from("c.txt"),
            ]
        );
    }

    #[test]
    fn test_walker_reports_directories() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("empty")).unwrap();

        let walker = SourceWalker::new(root);
        let dirs = walker
            .walk()
            .filter(|e| matches!(e, Ok(SourceEntry::Directory { .. })))
            .count();

        assert_eq!(dirs, 2);
        assert!(files(&walker).is_empty());
    }

    #[test]
    fn test_walker_is_restartable() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("one.txt"), "1").unwrap();

        let walker = SourceWalker::new(temp.path());
        assert_eq!(files(&walker), files(&walker));
    }

    #[test]
    fn test_walker_missing_root() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");

        let walker = SourceWalker::new(&missing);
        let results: Vec<_> = walker.walk().collect();

        assert_eq!(results.len(), 1);
        let err = results.into_iter().next().unwrap().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TraversalFailed);
        assert_eq!(err.path(), Some(missing.as_path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_walker_symlink_policy() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let root = temp.path().join("src");
        fs::create_dir_all(root.join("dir")).unwrap();
        fs::write(root.join("target.txt"), "content").unwrap();
        symlink(root.join("target.txt"), root.join("file_link")).unwrap();
        symlink(root.join("dir"), root.join("dir_link")).unwrap();

        let walker = SourceWalker::new(&root);
        let entries: Vec<_> = walker.walk().collect::<Result<Vec<_>>>().unwrap();

        assert!(entries.contains(&SourceEntry::File {
            path: root.join("file_link"),
            archive_path: PathBuf::from("file_link"),
        }));
        assert!(entries.contains(&SourceEntry::Skipped {
            path: root.join("dir_link"),
            reason: SkipReason::LinkedDirectory,
        }));
    }

    #[cfg(unix)]
    #[test]
    fn test_walker_dangling_symlink_is_file() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::os::unix::fs::symlink(root.join("gone"), root.join("dangling")).unwrap();

        let walker = SourceWalker::new(root);
        assert_eq!(files(&walker), vec![PathBuf::from("dangling")]);
    }

    #[test]
    fn test_archive_path_relative() {
        let path = archive_path(Path::new("/root/dir"), Path::new("/root/dir/a/b/c.txt")).unwrap();
        assert_eq!(path, Path::new("a/b/c.txt"));
    }

    #[test]
    fn test_archive_path_root_is_file() {
        let path = archive_path(Path::new("dir/file.bin"), Path::new("dir/file.bin")).unwrap();
        assert_eq!(path, Path::new("file.bin"));
    }

    #[test]
    fn test_archive_path_outside_root() {
        let err = archive_path(Path::new("/a"), Path::new("/b/file")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TraversalFailed);
    }

    #[test]
    fn test_archive_path_root_without_base_name() {
        let err = archive_path(Path::new("/"), Path::new("/")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TraversalFailed);
        assert!(err.to_string().contains("base name"));
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(
            SkipReason::LinkedDirectory.to_string(),
            "symlink to directory"
        );
        assert_eq!(SkipReason::NotRegularFile.to_string(), "not a regular file");
        assert_eq!(SkipReason::Destination.to_string(), "destination archive");
    }
}
