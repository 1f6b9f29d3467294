use crate::entry::WalkEntry;
use crate::error::WalkError;
use logging::trace_walk;
use std::collections::HashSet;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

/// Depth-first iterator over filesystem entries.
///
/// After the first error the walker is exhausted; callers that want to keep
/// going past an unreadable directory must start a new walk.
pub struct Walker {
    root: PathBuf,
    follow_symlinks: bool,
    max_depth: Option<usize>,
    yielded_root: bool,
    root_metadata: Option<fs::Metadata>,
    stack: Vec<DirectoryState>,
    visited: HashSet<PathBuf>,
    finished: bool,
}

impl Walker {
    pub(crate) fn new(
        root: PathBuf,
        follow_symlinks: bool,
        include_root: bool,
        max_depth: Option<usize>,
    ) -> Result<Self, WalkError> {
        let root = absolutize(root)?;
        trace_walk!("walking {:?}", root);

        let metadata = fs::symlink_metadata(&root)
            .map_err(|error| WalkError::root_metadata(root.clone(), error))?;

        let descend = if metadata.file_type().is_dir() {
            true
        } else if metadata.file_type().is_symlink() && follow_symlinks {
            fs::metadata(&root)
                .map_err(|error| WalkError::metadata(root.clone(), error))?
                .is_dir()
        } else {
            false
        };

        let mut walker = Self {
            root,
            follow_symlinks,
            max_depth,
            yielded_root: !include_root,
            root_metadata: Some(metadata),
            stack: Vec::new(),
            visited: HashSet::new(),
            finished: false,
        };

        if descend && walker.may_descend(0) {
            walker.push_directory(walker.root.clone(), PathBuf::new(), 0)?;
        }

        Ok(walker)
    }

    fn may_descend(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth < max)
    }

    fn push_directory(
        &mut self,
        fs_path: PathBuf,
        relative_prefix: PathBuf,
        depth: usize,
    ) -> Result<(), WalkError> {
        let canonical = fs::canonicalize(&fs_path)
            .map_err(|error| WalkError::canonicalize(fs_path.clone(), error))?;
        if !self.visited.insert(canonical) {
            trace_walk!("skipping already visited directory {:?}", fs_path);
            return Ok(());
        }

        let state = DirectoryState::new(fs_path, relative_prefix, depth)?;
        self.stack.push(state);
        Ok(())
    }

    fn prepare_entry(
        &mut self,
        full_path: PathBuf,
        relative_path: PathBuf,
        depth: usize,
    ) -> Result<WalkEntry, WalkError> {
        let metadata = fs::symlink_metadata(&full_path)
            .map_err(|error| WalkError::metadata(full_path.clone(), error))?;

        if self.may_descend(depth) {
            let file_type = metadata.file_type();
            if file_type.is_dir() {
                self.push_directory(full_path.clone(), relative_path.clone(), depth)?;
            } else if file_type.is_symlink() && self.follow_symlinks {
                // broken links are yielded as plain symlink entries
                if fs::metadata(&full_path).is_ok_and(|target| target.is_dir()) {
                    let canonical = fs::canonicalize(&full_path)
                        .map_err(|error| WalkError::canonicalize(full_path.clone(), error))?;
                    self.push_directory(canonical, relative_path.clone(), depth)?;
                }
            }
        }

        Ok(WalkEntry {
            full_path,
            relative_path,
            metadata,
            depth,
            is_root: false,
        })
    }
}

impl Iterator for Walker {
    type Item = Result<WalkEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if !self.yielded_root {
            self.yielded_root = true;
            if let Some(metadata) = self.root_metadata.take() {
                return Some(Ok(WalkEntry {
                    full_path: self.root.clone(),
                    relative_path: PathBuf::new(),
                    metadata,
                    depth: 0,
                    is_root: true,
                }));
            }
        }

        loop {
            let state = self.stack.last_mut()?;
            let Some(name) = state.next_name() else {
                self.stack.pop();
                continue;
            };
            let full_path = state.fs_path.join(&name);
            let relative_path = state.relative_prefix.join(&name);
            let depth = state.depth + 1;

            return match self.prepare_entry(full_path, relative_path, depth) {
                Ok(entry) => Some(Ok(entry)),
                Err(error) => {
                    self.finished = true;
                    Some(Err(error))
                }
            };
        }
    }
}

#[derive(Clone, Debug)]
struct DirectoryState {
    fs_path: PathBuf,
    relative_prefix: PathBuf,
    entries: std::vec::IntoIter<OsString>,
    depth: usize,
}

impl DirectoryState {
    fn new(fs_path: PathBuf, relative_prefix: PathBuf, depth: usize) -> Result<Self, WalkError> {
        let read_dir =
            fs::read_dir(&fs_path).map_err(|error| WalkError::read_dir(fs_path.clone(), error))?;
        let mut entries = read_dir
            .map(|entry| entry.map(|entry| entry.file_name()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| WalkError::read_dir_entry(fs_path.clone(), error))?;
        entries.sort();

        trace_walk!("{} entries in {:?}", entries.len(), fs_path);

        Ok(Self {
            fs_path,
            relative_prefix,
            entries: entries.into_iter(),
            depth,
        })
    }

    fn next_name(&mut self) -> Option<OsString> {
        self.entries.next()
    }
}

fn absolutize(path: PathBuf) -> Result<PathBuf, WalkError> {
    if path.is_absolute() {
        Ok(path)
    } else {
        let cwd = env::current_dir()
            .map_err(|error| WalkError::canonicalize(PathBuf::from("."), error))?;
        Ok(cwd.join(path))
    }
}
