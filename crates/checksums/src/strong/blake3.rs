use crate::Checksum;

/// Streaming BLAKE3 hasher with the default 256-bit output.
#[derive(Clone, Debug, Default)]
pub struct Blake3 {
    inner: blake3::Hasher,
}

impl Blake3 {
    /// Creates a hasher in its initial (unkeyed) state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
        }
    }
}

impl Checksum for Blake3 {
    fn name(&self) -> &'static str {
        "blake3"
    }

    fn digest_len(&self) -> usize {
        blake3::OUT_LEN
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    fn finalize(&mut self) -> Vec<u8> {
        let hash = self.inner.finalize();
        self.inner.reset();
        hash.as_bytes().to_vec()
    }
}
