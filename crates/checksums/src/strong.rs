//! crates/checksums/src/strong.rs
//!
//! Cryptographic and high-quality non-cryptographic digests.
//!
//! The RustCrypto hashes all share the [`digest::Digest`] interface, so a
//! single generic adapter ([`DigestChecksum`]) exposes them through
//! [`Checksum`](crate::Checksum). BLAKE3 and the XXHash family have their own
//! streaming APIs and get dedicated wrappers.

mod blake3;
mod digest;
mod xxhash;

pub use self::blake3::Blake3;
pub use self::digest::DigestChecksum;
pub use self::xxhash::{Xxh3, Xxh64};

/// MD4 (RFC 1320).
pub type Md4 = DigestChecksum<md4::Md4>;
/// MD5 (RFC 1321).
pub type Md5 = DigestChecksum<md5::Md5>;
/// SHA-1 (FIPS 180-4).
pub type Sha1 = DigestChecksum<sha1::Sha1>;
/// SHA-224 (FIPS 180-4).
pub type Sha224 = DigestChecksum<sha2::Sha224>;
/// SHA-256 (FIPS 180-4).
pub type Sha256 = DigestChecksum<sha2::Sha256>;
/// SHA-384 (FIPS 180-4).
pub type Sha384 = DigestChecksum<sha2::Sha384>;
/// SHA-512 (FIPS 180-4).
pub type Sha512 = DigestChecksum<sha2::Sha512>;
/// SHA3-224 (FIPS 202).
pub type Sha3_224 = DigestChecksum<sha3::Sha3_224>;
/// SHA3-256 (FIPS 202).
pub type Sha3_256 = DigestChecksum<sha3::Sha3_256>;
/// SHA3-384 (FIPS 202).
pub type Sha3_384 = DigestChecksum<sha3::Sha3_384>;
/// SHA3-512 (FIPS 202).
pub type Sha3_512 = DigestChecksum<sha3::Sha3_512>;
/// BLAKE2b with a 512-bit output.
pub type Blake2b = DigestChecksum<blake2::Blake2b512>;
/// BLAKE2s with a 256-bit output.
pub type Blake2s = DigestChecksum<blake2::Blake2s256>;
