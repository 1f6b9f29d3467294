//! Shared helpers for hashfan tests.
//!
//! - [`CountingReader`] records how often a source is read so tests can
//!   prove each byte is read exactly once no matter how many algorithms
//!   consume it.
//! - [`FailingReader`] produces a prefix of data and then fails, to drive
//!   the read-error paths.
//! - [`fixtures`] builds temporary file trees.

#![deny(unsafe_code)]
#![deny(missing_docs)]

pub mod fixtures;
mod readers;

pub use readers::{CountingReader, FailingReader, ReadStats};

/// Deterministic, non-repeating-looking payload of `len` bytes.
///
/// Uses a small LCG so large payloads do not compress to a handful of
/// repeated blocks.
#[must_use]
pub fn patterned_bytes(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x9e37_79b9;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        })
        .collect()
}
