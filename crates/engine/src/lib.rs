#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod bytes;
mod chunk;
mod config;
mod engine;
mod error;
mod fanout;
mod files;
mod results;
mod schedule;
mod weights;

pub use config::{
    DEFAULT_BUFFER_BUDGET, DEFAULT_CHUNK_SIZE, DEFAULT_DEQUEUE_TIMEOUT, DEFAULT_QUEUE_CAPACITY,
    DEFAULT_READER_POOL_SIZE, EngineConfig,
};
pub use engine::{Engine, STREAM_SOURCE};
pub use error::{EngineError, EngineResult, ThreadRole};
pub use results::{Digests, FileDigests, FileFailure, SourceId};
pub use schedule::{Assignment, WorkerGroup, assign};
pub use weights::{AlgorithmDescriptor, DEFAULT_WEIGHT, WeightTable};
