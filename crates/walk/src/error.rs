use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Error returned when traversal or collection fails.
///
/// Every variant carries the path that triggered it so diagnostics can name
/// the offending file without matching on the kind.
#[derive(Debug)]
pub struct WalkError {
    kind: WalkErrorKind,
    path: PathBuf,
    source: io::Error,
}

/// Stage of the traversal that failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WalkErrorKind {
    /// Metadata for a traversal root could not be read (typically missing).
    RootMetadata,
    /// A directory could not be opened for listing.
    ReadDir,
    /// Listing a directory failed part way through.
    ReadDirEntry,
    /// Metadata for an entry below the root could not be read.
    Metadata,
    /// A directory could not be canonicalized for cycle detection.
    Canonicalize,
}

impl WalkErrorKind {
    const fn describe(self) -> &'static str {
        match self {
            Self::RootMetadata => "failed to inspect traversal root",
            Self::ReadDir => "failed to read directory",
            Self::ReadDirEntry => "failed to read entry in",
            Self::Metadata => "failed to inspect metadata for",
            Self::Canonicalize => "failed to canonicalize",
        }
    }
}

impl WalkError {
    fn new(kind: WalkErrorKind, path: PathBuf, source: io::Error) -> Self {
        Self { kind, path, source }
    }

    pub(crate) fn root_metadata(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::RootMetadata, path, source)
    }

    pub(crate) fn read_dir(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::ReadDir, path, source)
    }

    pub(crate) fn read_dir_entry(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::ReadDirEntry, path, source)
    }

    pub(crate) fn metadata(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::Metadata, path, source)
    }

    pub(crate) fn canonicalize(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::Canonicalize, path, source)
    }

    /// Returns the stage that failed.
    #[must_use]
    pub const fn kind(&self) -> WalkErrorKind {
        self.kind
    }

    /// Returns the filesystem path associated with the error.
    ///
    /// # Examples
    ///
    /// ```
    /// use walk::WalkBuilder;
    ///
    /// let result = WalkBuilder::new("./definitely_missing_root").build();
    /// let error = match result {
    ///     Ok(_) => panic!("missing root yields error"),
    ///     Err(error) => error,
    /// };
    /// assert!(error.path().ends_with("definitely_missing_root"));
    /// ```
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the underlying operating system error.
    #[must_use]
    pub const fn io_error(&self) -> &io::Error {
        &self.source
    }

    /// Reports whether the failure was a missing path.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.source.kind() == io::ErrorKind::NotFound
    }
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}': {}",
            self.kind.describe(),
            self.path.display(),
            self.source
        )
    }
}

impl Error for WalkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}
