//! crates/checksums/src/checksum.rs
//!
//! Object-safe capability shared by every checksum and digest.

/// A resettable accumulator for one checksum or digest algorithm.
///
/// Implementations are driven by exactly one thread at a time, so the trait
/// only requires [`Send`]. Callers feed bytes through [`update`](Self::update)
/// in stream order and collect the result with [`finalize`](Self::finalize),
/// which also returns the accumulator to its initial state so the same
/// instance can be reused for the next stream.
///
/// # Examples
///
/// ```
/// use checksums::Checksum;
/// use checksums::weak::Adler32;
///
/// let mut adler: Box<dyn Checksum> = Box::new(Adler32::new());
/// adler.update(b"Wiki");
/// adler.update(b"pedia");
/// assert_eq!(adler.finalize(), vec![0x11, 0xe6, 0x03, 0x98]);
///
/// // finalize resets the state
/// assert_eq!(adler.finalize(), vec![0x00, 0x00, 0x00, 0x01]);
/// ```
pub trait Checksum: Send {
    /// Canonical, lower-case algorithm name (for example `sha256`).
    fn name(&self) -> &'static str;

    /// Width of the finalized output in bytes.
    fn digest_len(&self) -> usize;

    /// Discards any accumulated state.
    fn reset(&mut self);

    /// Feeds the next bytes of the stream into the accumulator.
    fn update(&mut self, data: &[u8]);

    /// Returns the digest of every byte fed since the last reset and resets
    /// the accumulator.
    fn finalize(&mut self) -> Vec<u8>;
}

impl<C: Checksum + ?Sized> Checksum for Box<C> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn digest_len(&self) -> usize {
        (**self).digest_len()
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn update(&mut self, data: &[u8]) {
        (**self).update(data);
    }

    fn finalize(&mut self) -> Vec<u8> {
        (**self).finalize()
    }
}
