//! crates/engine/src/results.rs
//!
//! Result aggregation shared by every worker of a run.
//!
//! Workers write into a [`ResultMap`] concurrently, one write per
//! (source, algorithm) key. The map is only read after every producer has
//! been joined, at which point it is converted into the ordered outcome
//! types returned to callers.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Digests of one source, keyed by canonical algorithm name.
pub type Digests = BTreeMap<&'static str, Vec<u8>>;

/// Identifies the source a digest was computed over.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceId {
    /// A file on disk.
    Path(PathBuf),
    /// An in-memory buffer or an unnamed stream such as stdin.
    Stream(String),
}

impl SourceId {
    /// Identifier for an unnamed stream or buffer.
    pub fn stream(name: impl Into<String>) -> Self {
        Self::Stream(name.into())
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Stream(name) => f.write_str(name),
        }
    }
}

/// (source, algorithm) pair a single digest belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct SourceKey {
    source: SourceId,
    algorithm: &'static str,
}

impl SourceKey {
    pub(crate) const fn new(source: SourceId, algorithm: &'static str) -> Self {
        Self { source, algorithm }
    }
}

/// Concurrent, write-once digest map.
#[derive(Debug, Default)]
pub(crate) struct ResultMap {
    inner: DashMap<SourceKey, Vec<u8>>,
}

impl ResultMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stores `digest` under `key`. A second write for the same key is an
    /// invariant breach; the first value is kept and `false` returned.
    pub(crate) fn insert(&self, key: SourceKey, digest: Vec<u8>) -> bool {
        match self.inner.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(digest);
                true
            }
        }
    }

    pub(crate) fn contains(&self, key: &SourceKey) -> bool {
        self.inner.contains_key(key)
    }

    /// Digests of a single source, for the single-source paths.
    pub(crate) fn into_digests(self) -> Digests {
        self.inner
            .into_iter()
            .map(|(key, digest)| (key.algorithm, digest))
            .collect()
    }

    /// Groups file digests by path.
    pub(crate) fn into_file_map(self) -> BTreeMap<PathBuf, Digests> {
        let mut files: BTreeMap<PathBuf, Digests> = BTreeMap::new();
        for (key, digest) in self.inner {
            if let SourceId::Path(path) = key.source {
                files.entry(path).or_default().insert(key.algorithm, digest);
            }
        }
        files
    }
}

/// A file that could not be read to the end.
#[derive(Debug)]
pub struct FileFailure {
    path: PathBuf,
    error: io::Error,
}

impl FileFailure {
    pub(crate) const fn new(path: PathBuf, error: io::Error) -> Self {
        Self { path, error }
    }

    /// The file that failed.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The error that stopped reading it.
    pub const fn error(&self) -> &io::Error {
        &self.error
    }
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.error)
    }
}

/// Outcome of [`Engine::run_files`](crate::Engine::run_files).
///
/// Files that failed to read have no digests and appear in
/// [`failures`](Self::failures) instead. Iteration is ordered by path, then
/// algorithm name.
#[derive(Debug, Default)]
pub struct FileDigests {
    files: BTreeMap<PathBuf, Digests>,
    failures: Vec<FileFailure>,
}

impl FileDigests {
    pub(crate) fn new(files: BTreeMap<PathBuf, Digests>, mut failures: Vec<FileFailure>) -> Self {
        failures.sort_by(|a, b| a.path.cmp(&b.path));
        Self { files, failures }
    }

    /// Digest of `path` under canonical algorithm `algorithm`.
    pub fn get(&self, path: impl AsRef<Path>, algorithm: &str) -> Option<&[u8]> {
        self.files
            .get(path.as_ref())
            .and_then(|digests| digests.get(algorithm))
            .map(Vec::as_slice)
    }

    /// All digests of one file.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&Digests> {
        self.files.get(path.as_ref())
    }

    /// Number of (file, algorithm) digests.
    pub fn len(&self) -> usize {
        self.files.values().map(BTreeMap::len).sum()
    }

    /// Returns `true` when no digest was produced.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of files with digests.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Files that could not be read, ordered by path.
    pub fn failures(&self) -> &[FileFailure] {
        &self.failures
    }

    /// Returns `true` when every file was hashed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Iterates `(path, algorithm, digest)` in path then algorithm order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &'static str, &[u8])> + '_ {
        self.files.iter().flat_map(|(path, digests)| {
            digests
                .iter()
                .map(move |(algorithm, digest)| (path.as_path(), *algorithm, digest.as_slice()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_key(path: &str, algorithm: &'static str) -> SourceKey {
        SourceKey::new(SourceId::Path(PathBuf::from(path)), algorithm)
    }

    #[test]
    fn result_map_is_write_once() {
        let map = ResultMap::new();
        assert!(map.insert(path_key("a", "md5"), vec![1]));
        assert!(!map.insert(path_key("a", "md5"), vec![2]));
        assert!(map.contains(&path_key("a", "md5")));

        let files = map.into_file_map();
        assert_eq!(files[Path::new("a")]["md5"], vec![1]);
    }

    #[test]
    fn file_digests_iterate_in_path_then_algorithm_order() {
        let map = ResultMap::new();
        map.insert(path_key("b", "sha1"), vec![4]);
        map.insert(path_key("a", "sha1"), vec![2]);
        map.insert(path_key("b", "md5"), vec![3]);
        map.insert(path_key("a", "md5"), vec![1]);

        let digests = FileDigests::new(map.into_file_map(), Vec::new());
        let order: Vec<_> = digests
            .iter()
            .map(|(path, algorithm, digest)| (path.to_owned(), algorithm, digest[0]))
            .collect();
        assert_eq!(
            order,
            vec![
                (PathBuf::from("a"), "md5", 1),
                (PathBuf::from("a"), "sha1", 2),
                (PathBuf::from("b"), "md5", 3),
                (PathBuf::from("b"), "sha1", 4),
            ]
        );
        assert_eq!(digests.len(), 4);
        assert_eq!(digests.file_count(), 2);
        assert_eq!(digests.get("b", "md5"), Some(&[3u8][..]));
        assert!(digests.get("c", "md5").is_none());
        assert!(digests.is_complete());
    }

    #[test]
    fn failures_are_sorted_and_mark_incomplete() {
        let failures = vec![
            FileFailure::new(PathBuf::from("z"), io::Error::other("late")),
            FileFailure::new(PathBuf::from("m"), io::Error::other("early")),
        ];
        let digests = FileDigests::new(BTreeMap::new(), failures);
        assert!(!digests.is_complete());
        assert!(digests.is_empty());
        let paths: Vec<_> = digests.failures().iter().map(FileFailure::path).collect();
        assert_eq!(paths, vec![Path::new("m"), Path::new("z")]);
        assert_eq!(digests.failures()[0].to_string(), "m: early");
    }

    #[test]
    fn source_id_display() {
        assert_eq!(SourceId::Path(PathBuf::from("dir/file")).to_string(), "dir/file");
        assert_eq!(SourceId::stream("-").to_string(), "-");
    }
}
