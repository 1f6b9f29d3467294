//! crates/checksums/src/strong/digest.rs
//!
//! Adapter from the RustCrypto [`Digest`] interface to [`Checksum`].

use std::fmt;

use digest::{Digest, FixedOutputReset};

use crate::Checksum;

/// Wraps any RustCrypto hasher that supports resetting finalization.
///
/// The canonical name is supplied by the caller (normally the registry) so
/// the same hasher type can be registered under the name users expect.
#[derive(Clone)]
pub struct DigestChecksum<D> {
    name: &'static str,
    inner: D,
}

impl<D: Digest> DigestChecksum<D> {
    /// Creates an accumulator in its initial state.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: D::new(),
        }
    }
}

impl<D> fmt::Debug for DigestChecksum<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestChecksum")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<D> Checksum for DigestChecksum<D>
where
    D: Digest + FixedOutputReset + Send,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn digest_len(&self) -> usize {
        <D as Digest>::output_size()
    }

    fn reset(&mut self) {
        Digest::reset(&mut self.inner);
    }

    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.inner, data);
    }

    fn finalize(&mut self) -> Vec<u8> {
        Digest::finalize_reset(&mut self.inner).to_vec()
    }
}
