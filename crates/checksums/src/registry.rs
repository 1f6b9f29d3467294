//! crates/checksums/src/registry.rs
//!
//! Name to constructor mapping for every supported algorithm.

use std::collections::BTreeMap;
use std::fmt;

use crate::strong::{
    Blake2b, Blake2s, Blake3, Md4, Md5, Sha1, Sha3_224, Sha3_256, Sha3_384, Sha3_512, Sha224,
    Sha256, Sha384, Sha512, Xxh3, Xxh64,
};
use crate::weak::{Adler32, Crc32, Sum8, Xor8};
use crate::{Checksum, SelectionError, UnknownAlgorithm};

/// Builds a fresh accumulator in its initial state.
pub type Constructor = fn() -> Box<dyn Checksum>;

/// Keyword that selects every registered algorithm.
const SELECT_ALL: &str = "all";

/// Registry of algorithms addressable by name.
///
/// Lookups are case-insensitive and ignore `-` and `_`, so `SHA-256`,
/// `sha_256` and `sha256` all resolve to the same entry. Extra spellings that
/// do not normalize onto a canonical name are added with
/// [`alias`](Self::alias).
#[derive(Clone, Default)]
pub struct AlgorithmRegistry {
    constructors: BTreeMap<&'static str, Constructor>,
    lookup: BTreeMap<String, &'static str>,
}

impl AlgorithmRegistry {
    /// Creates a registry with no algorithms.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry containing every built-in algorithm.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register("adler32", || Box::new(Adler32::new()));
        registry.register("crc32", || Box::new(Crc32::new()));
        registry.register("xor8", || Box::new(Xor8::new()));
        registry.register("sum8", || Box::new(Sum8::new()));
        registry.register("md4", || Box::new(Md4::new("md4")));
        registry.register("md5", || Box::new(Md5::new("md5")));
        registry.register("sha1", || Box::new(Sha1::new("sha1")));
        registry.register("sha224", || Box::new(Sha224::new("sha224")));
        registry.register("sha256", || Box::new(Sha256::new("sha256")));
        registry.register("sha384", || Box::new(Sha384::new("sha384")));
        registry.register("sha512", || Box::new(Sha512::new("sha512")));
        registry.register("sha3-224", || Box::new(Sha3_224::new("sha3-224")));
        registry.register("sha3-256", || Box::new(Sha3_256::new("sha3-256")));
        registry.register("sha3-384", || Box::new(Sha3_384::new("sha3-384")));
        registry.register("sha3-512", || Box::new(Sha3_512::new("sha3-512")));
        registry.register("blake2b", || Box::new(Blake2b::new("blake2b")));
        registry.register("blake2s", || Box::new(Blake2s::new("blake2s")));
        registry.register("blake3", || Box::new(Blake3::new()));
        registry.register("xxh64", || Box::new(Xxh64::new()));
        registry.register("xxh3", || Box::new(Xxh3::new()));

        for (alias, canonical) in [
            ("blake2b512", "blake2b"),
            ("blake2s256", "blake2s"),
            ("xxhash64", "xxh64"),
            ("xxh3_64", "xxh3"),
            ("xxhash3", "xxh3"),
        ] {
            // every canonical target above was registered just before
            let _ = registry.alias(alias, canonical);
        }
        registry
    }

    /// Registers `name` (stored lower-case) with its constructor, replacing
    /// any previous registration under the same normalized name.
    pub fn register(&mut self, name: &'static str, constructor: Constructor) {
        self.constructors.insert(name, constructor);
        self.lookup.insert(normalize(name), name);
    }

    /// Adds an extra spelling for an already registered algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownAlgorithm`] when `canonical` does not resolve.
    pub fn alias(&mut self, alias: &str, canonical: &str) -> Result<(), UnknownAlgorithm> {
        let target = self.canonical_name(canonical)?;
        self.lookup.insert(normalize(alias), target);
        Ok(())
    }

    /// Resolves any accepted spelling to the canonical name.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownAlgorithm`] when the name is not registered.
    pub fn canonical_name(&self, name: &str) -> Result<&'static str, UnknownAlgorithm> {
        self.lookup
            .get(&normalize(name))
            .copied()
            .ok_or_else(|| UnknownAlgorithm::new(name))
    }

    /// Reports whether `name` resolves to a registered algorithm.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(&normalize(name))
    }

    /// Creates a fresh accumulator for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownAlgorithm`] when the name is not registered.
    pub fn instantiate(&self, name: &str) -> Result<Box<dyn Checksum>, UnknownAlgorithm> {
        self.constructor(name).map(|constructor| constructor())
    }

    /// Returns the constructor registered for `name`.
    ///
    /// Resolving constructors up front lets callers reject unknown names
    /// before doing any work and then build accumulators without a lookup.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownAlgorithm`] when the name is not registered.
    pub fn constructor(&self, name: &str) -> Result<Constructor, UnknownAlgorithm> {
        let canonical = self.canonical_name(name)?;
        self.constructors
            .get(canonical)
            .copied()
            .ok_or_else(|| UnknownAlgorithm::new(name))
    }

    /// Canonical names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.keys().copied()
    }

    /// Number of registered algorithms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Parses a `+`-separated selection such as `md5+sha1`, or `all`.
    ///
    /// The result holds canonical names in first-mention order with
    /// duplicates removed.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::Empty`] for a blank selection or a blank
    /// part, and [`SelectionError::Unknown`] for an unregistered name.
    pub fn parse_selection(&self, selection: &str) -> Result<Vec<&'static str>, SelectionError> {
        let trimmed = selection.trim();
        if trimmed.eq_ignore_ascii_case(SELECT_ALL) {
            return Ok(self.names().collect());
        }

        let mut selected = Vec::new();
        for part in trimmed.split('+') {
            let part = part.trim();
            if part.is_empty() {
                return Err(SelectionError::Empty);
            }
            let canonical = self.canonical_name(part)?;
            if !selected.contains(&canonical) {
                selected.push(canonical);
            }
        }
        Ok(selected)
    }
}

impl fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.constructors.keys()).finish()
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
