//! crates/checksums/src/strong/xxhash.rs
//!
//! XXH64 and XXH3-64 streaming hashers backed by `xxhash-rust`.
//!
//! Both run with seed zero and emit their 64-bit value big-endian, which is
//! the byte order `xxhsum` prints.

use xxhash_rust::xxh3::Xxh3 as Xxh3State;
use xxhash_rust::xxh64::Xxh64 as Xxh64State;

use crate::Checksum;

const SEED: u64 = 0;

/// Streaming XXH64 hasher.
///
/// ```
/// use checksums::Checksum;
/// use checksums::strong::Xxh64;
///
/// let mut hasher = Xxh64::new();
/// hasher.update(b"chunk 1");
/// hasher.update(b"chunk 2");
/// assert_eq!(hasher.finalize().len(), 8);
/// ```
pub struct Xxh64 {
    inner: Xxh64State,
}

impl Xxh64 {
    /// Creates a hasher seeded with zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Xxh64State::new(SEED),
        }
    }
}

impl Default for Xxh64 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Xxh64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Xxh64").finish_non_exhaustive()
    }
}

impl Checksum for Xxh64 {
    fn name(&self) -> &'static str {
        "xxh64"
    }

    fn digest_len(&self) -> usize {
        8
    }

    fn reset(&mut self) {
        self.inner.reset(SEED);
    }

    fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    fn finalize(&mut self) -> Vec<u8> {
        let value = self.inner.digest();
        self.inner.reset(SEED);
        value.to_be_bytes().to_vec()
    }
}

/// Streaming XXH3 hasher with a 64-bit output.
pub struct Xxh3 {
    inner: Xxh3State,
}

impl Xxh3 {
    /// Creates a hasher with the default secret and seed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Xxh3State::new(),
        }
    }
}

impl Default for Xxh3 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Xxh3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Xxh3").finish_non_exhaustive()
    }
}

impl Checksum for Xxh3 {
    fn name(&self) -> &'static str {
        "xxh3"
    }

    fn digest_len(&self) -> usize {
        8
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    fn finalize(&mut self) -> Vec<u8> {
        let value = self.inner.digest();
        self.inner.reset();
        value.to_be_bytes().to_vec()
    }
}
