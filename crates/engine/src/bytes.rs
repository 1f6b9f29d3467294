//! crates/engine/src/bytes.rs
//!
//! In-memory path: every algorithm hashes the whole buffer in one call.

use rayon::prelude::*;

use crate::engine::Resolved;
use crate::results::Digests;

/// Hashes `data` with each algorithm on the rayon pool.
pub(crate) fn run(data: &[u8], algorithms: &[Resolved]) -> Digests {
    algorithms
        .par_iter()
        .map(|algorithm| {
            let mut digest = (algorithm.constructor)();
            digest.update(data);
            (algorithm.name, digest.finalize())
        })
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}
