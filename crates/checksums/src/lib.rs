#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod checksum;
mod error;
mod registry;
pub mod strong;
pub mod weak;

pub use checksum::Checksum;
pub use error::{SelectionError, UnknownAlgorithm};
pub use registry::{AlgorithmRegistry, Constructor};
