//! crates/walk/src/collector.rs
//!
//! Flattens command-line roots into the list of regular files to hash.

use std::fs;
use std::path::{Path, PathBuf};

use logging::trace_walk;

use crate::builder::WalkBuilder;
use crate::error::WalkError;

/// Collects regular files below a set of roots.
///
/// - A root that is not a directory is passed through unchanged, so callers
///   can hash individual files (and see their read errors) directly.
/// - Non-recursive mode lists only the immediate regular-file children of a
///   directory root.
/// - Recursive mode walks the full subtree in sorted depth-first order.
/// - Unless symlinks are followed, symlinked directories (including a
///   symlinked root) are skipped entirely. Symlinks to regular files are
///   always kept.
///
/// Returned paths are the root joined with each entry's path relative to
/// it, so they keep the spelling the caller used.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FileCollector {
    recursive: bool,
    follow_symlinks: bool,
}

impl FileCollector {
    /// Creates a non-recursive collector that ignores directory symlinks.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            recursive: false,
            follow_symlinks: false,
        }
    }

    /// Descend into subdirectories.
    #[must_use]
    pub const fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Descend into symlinked directories instead of skipping them.
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Collects files below every root, in root order.
    ///
    /// Stops at the first failure; use [`collect_root`](Self::collect_root)
    /// to report failures per root and keep going.
    pub fn collect<I, P>(&self, roots: I) -> Result<Vec<PathBuf>, WalkError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut files = Vec::new();
        for root in roots {
            files.extend(self.collect_root(root.as_ref())?);
        }
        Ok(files)
    }

    /// Collects files below a single root.
    pub fn collect_root(&self, root: &Path) -> Result<Vec<PathBuf>, WalkError> {
        let link_metadata = fs::symlink_metadata(root)
            .map_err(|error| WalkError::root_metadata(root.to_path_buf(), error))?;
        let is_symlink = link_metadata.file_type().is_symlink();
        let is_dir = if is_symlink {
            fs::metadata(root).is_ok_and(|target| target.is_dir())
        } else {
            link_metadata.is_dir()
        };

        if !is_dir {
            return Ok(vec![root.to_path_buf()]);
        }
        if is_symlink && !self.follow_symlinks {
            trace_walk!("skipping symlinked directory {:?}", root);
            return Ok(Vec::new());
        }

        let walker = WalkBuilder::new(root)
            .include_root(false)
            .follow_symlinks(self.follow_symlinks)
            .max_depth(if self.recursive { None } else { Some(1) })
            .build()?;

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            if entry.is_regular_file() {
                files.push(root.join(entry.relative_path()));
            }
        }
        trace_walk!("collected {} files below {:?}", files.len(), root);
        Ok(files)
    }
}
