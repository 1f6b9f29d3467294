//! Published test vectors for every built-in algorithm, driven through the
//! registry the same way the engine drives them.

use checksums::AlgorithmRegistry;

fn digest_hex(registry: &AlgorithmRegistry, name: &str, input: &[u8]) -> String {
    let mut checksum = registry.instantiate(name).expect("builtin algorithm");
    checksum.update(input);
    hex::encode(checksum.finalize())
}

#[test]
fn abc_vectors() {
    let registry = AlgorithmRegistry::builtin();
    let cases = [
        ("adler32", "024d0127"),
        ("crc32", "352441c2"),
        ("xor8", "60"),
        ("sum8", "26"),
        ("md4", "a448017aaf21d8525fc10ae87aa6729d"),
        ("md5", "900150983cd24fb0d6963f7d28e17f72"),
        ("sha1", "a9993e364706816aba3e25717850c26c9cd0d89d"),
        (
            "sha224",
            "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7",
        ),
        (
            "sha256",
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        ),
        (
            "sha384",
            "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7",
        ),
        (
            "sha512",
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
        ),
        (
            "sha3-256",
            "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532",
        ),
        (
            "blake2b",
            "ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d17d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923",
        ),
        (
            "blake2s",
            "508c5e8c327c14e2e1a72ba34eeb452f37458b209ed63a294d999b4c86675982",
        ),
        (
            "blake3",
            "6437b3ac38465133ffb63b75273a8db548c558465d79db03fd359c6cd5bd9d85",
        ),
        ("xxh64", "44bc2cf5ad770999"),
    ];

    for (name, expected) in cases {
        assert_eq!(digest_hex(&registry, name, b"abc"), expected, "{name}");
    }
}

#[test]
fn every_algorithm_reports_its_digest_length() {
    let registry = AlgorithmRegistry::builtin();
    for name in registry.names() {
        let mut checksum = registry.instantiate(name).expect("builtin algorithm");
        let len = checksum.digest_len();
        checksum.update(b"some bytes");
        assert_eq!(checksum.finalize().len(), len, "{name}");
    }
}

#[test]
fn finalize_leaves_accumulator_reusable() {
    let registry = AlgorithmRegistry::builtin();
    for name in registry.names() {
        let mut checksum = registry.instantiate(name).expect("builtin algorithm");
        let empty = checksum.finalize();
        checksum.update(b"payload");
        let first = checksum.finalize();
        checksum.update(b"payload");
        assert_eq!(checksum.finalize(), first, "{name}");
        assert_eq!(checksum.finalize(), empty, "{name}");
    }
}
