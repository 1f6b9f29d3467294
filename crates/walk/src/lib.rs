#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` turns the paths named on a command line into the flat list of
//! regular files the hashing engine consumes. Directory entries are sorted
//! lexicographically before they are yielded, so two runs over the same tree
//! produce the same list regardless of the filesystem's iteration order.
//!
//! # Design
//!
//! - [`WalkBuilder`] configures a traversal: whether the root entry is
//!   emitted, whether directory symlinks are followed and how deep the walk
//!   descends.
//! - [`Walker`] implements [`Iterator`] and yields [`WalkEntry`] values in
//!   depth-first order. A directory's contents are exhausted before the next
//!   sibling is visited.
//! - [`FileCollector`] applies the recursion and symlink policy on top of the
//!   walker and keeps only regular files.
//! - [`WalkError`] describes metadata and directory-read failures and always
//!   carries the offending path.
//!
//! # Invariants
//!
//! - Directories are entered at most once. When symlinks are followed,
//!   canonical paths are tracked so a link back to an ancestor cannot loop.
//! - Relative paths never contain `..` segments.
//! - Traversal never panics; filesystem failures surface as [`WalkError`].
//!
//! # Examples
//!
//! ```
//! use walk::FileCollector;
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path().join("src");
//! fs::create_dir_all(root.join("nested"))?;
//! fs::write(root.join("file.txt"), b"data")?;
//! fs::write(root.join("nested/more.txt"), b"data")?;
//!
//! let shallow = FileCollector::new().collect([&root])?;
//! assert_eq!(shallow, vec![root.join("file.txt")]);
//!
//! let deep = FileCollector::new().recursive(true).collect([&root])?;
//! assert_eq!(deep, vec![root.join("file.txt"), root.join("nested/more.txt")]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod builder;
mod collector;
mod entry;
mod error;
mod walker;


pub use builder::WalkBuilder;
pub use collector::FileCollector;
pub use entry::WalkEntry;
pub use error::{WalkError, WalkErrorKind};
pub use walker::Walker;
