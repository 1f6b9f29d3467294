//! crates/checksums/src/weak.rs
//!
//! Cheap integrity checksums: Adler-32, CRC-32 and the 8-bit sum/xor
//! checksums.
//!
//! Each finalizes to its integer value in big-endian byte order.

use crate::Checksum;

/// Largest number of bytes that can be summed before `s2` may overflow `u32`
/// (zlib's `NMAX`).
const ADLER_NMAX: usize = 5552;
const ADLER_MOD: u32 = 65_521;

/// Adler-32 as defined by RFC 1950.
///
/// Both halves are reduced modulo 65521 and `s1` starts at one, so the
/// digest of empty input is `00000001`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Adler32 {
    s1: u32,
    s2: u32,
}

impl Adler32 {
    /// Creates the checksum in its initial state.
    #[must_use]
    pub const fn new() -> Self {
        Self { s1: 1, s2: 0 }
    }

    /// Returns the current 32-bit value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        (self.s2 << 16) | self.s1
    }
}

impl Default for Adler32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Checksum for Adler32 {
    fn name(&self) -> &'static str {
        "adler32"
    }

    fn digest_len(&self) -> usize {
        4
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn update(&mut self, data: &[u8]) {
        let mut s1 = self.s1;
        let mut s2 = self.s2;

        for block in data.chunks(ADLER_NMAX) {
            let mut iter = block.chunks_exact(4);
            for quad in &mut iter {
                s1 += u32::from(quad[0]);
                s2 += s1;
                s1 += u32::from(quad[1]);
                s2 += s1;
                s1 += u32::from(quad[2]);
                s2 += s1;
                s1 += u32::from(quad[3]);
                s2 += s1;
            }
            for &byte in iter.remainder() {
                s1 += u32::from(byte);
                s2 += s1;
            }
            s1 %= ADLER_MOD;
            s2 %= ADLER_MOD;
        }

        self.s1 = s1;
        self.s2 = s2;
    }

    fn finalize(&mut self) -> Vec<u8> {
        let value = self.value();
        self.reset();
        value.to_be_bytes().to_vec()
    }
}

/// CRC-32 (IEEE 802.3 polynomial), the value printed by `cksum -a crc32b`
/// and zip tools.
#[derive(Clone, Debug, Default)]
pub struct Crc32 {
    inner: crc32fast::Hasher,
}

impl Crc32 {
    /// Creates the checksum in its initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Checksum for Crc32 {
    fn name(&self) -> &'static str {
        "crc32"
    }

    fn digest_len(&self) -> usize {
        4
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    fn finalize(&mut self) -> Vec<u8> {
        let value = std::mem::take(&mut self.inner).finalize();
        value.to_be_bytes().to_vec()
    }
}

/// Exclusive-or of every input byte.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Xor8 {
    value: u8,
}

impl Xor8 {
    /// Creates the checksum in its initial state.
    #[must_use]
    pub const fn new() -> Self {
        Self { value: 0 }
    }
}

impl Checksum for Xor8 {
    fn name(&self) -> &'static str {
        "xor8"
    }

    fn digest_len(&self) -> usize {
        1
    }

    fn reset(&mut self) {
        self.value = 0;
    }

    fn update(&mut self, data: &[u8]) {
        self.value = data.iter().fold(self.value, |acc, &byte| acc ^ byte);
    }

    fn finalize(&mut self) -> Vec<u8> {
        vec![std::mem::take(&mut self.value)]
    }
}

/// Sum of every input byte modulo 256.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Sum8 {
    value: u8,
}

impl Sum8 {
    /// Creates the checksum in its initial state.
    #[must_use]
    pub const fn new() -> Self {
        Self { value: 0 }
    }
}

impl Checksum for Sum8 {
    fn name(&self) -> &'static str {
        "sum8"
    }

    fn digest_len(&self) -> usize {
        1
    }

    fn reset(&mut self) {
        self.value = 0;
    }

    fn update(&mut self, data: &[u8]) {
        self.value = data
            .iter()
            .fold(self.value, |acc, &byte| acc.wrapping_add(byte));
    }

    fn finalize(&mut self) -> Vec<u8> {
        vec![std::mem::take(&mut self.value)]
    }
}
