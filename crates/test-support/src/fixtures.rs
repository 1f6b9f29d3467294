//! Temporary file trees for filesystem tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory populated with named files.
///
/// The directory is removed when the value is dropped.
#[derive(Debug)]
pub struct FileTree {
    dir: TempDir,
}

impl FileTree {
    /// Creates an empty tree.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Root directory of the tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> io::Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Path below the root that is guaranteed not to exist.
    pub fn missing(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join("__missing__").join(relative)
    }
}
