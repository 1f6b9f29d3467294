//! crates/engine/src/weights.rs
//!
//! Relative per-algorithm cost used to balance fan-out workers.

use std::collections::BTreeMap;

/// Weight assumed for algorithms missing from a table.
pub const DEFAULT_WEIGHT: u32 = 1;

/// Relative time to hash a fixed reference payload, keyed by canonical name.
///
/// The first fifteen entries were measured together on one machine; the
/// BLAKE and xxHash rows are scaled from single-thread throughput against
/// `sha256` on the same payload.
const MEASURED: &[(&str, u32)] = &[
    ("adler32", 102),
    ("crc32", 105),
    ("xor8", 66),
    ("sum8", 66),
    ("md4", 225),
    ("md5", 267),
    ("sha1", 364),
    ("sha224", 682),
    ("sha256", 585),
    ("sha384", 411),
    ("sha512", 411),
    ("sha3-224", 4824),
    ("sha3-256", 4925),
    ("sha3-384", 6403),
    ("sha3-512", 9274),
    ("blake2b", 300),
    ("blake2s", 450),
    ("blake3", 60),
    ("xxh64", 30),
    ("xxh3", 20),
];

/// An algorithm together with its scheduling weight.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AlgorithmDescriptor {
    /// Canonical algorithm name.
    pub name: &'static str,
    /// Relative cost, always at least 1.
    pub weight: u32,
}

/// Immutable name to weight mapping.
///
/// Weights only order and assign work; they never affect results.
///
/// ```
/// use engine::WeightTable;
///
/// let table = WeightTable::measured();
/// assert!(table.weight("sha3-512") > table.weight("md5"));
/// assert_eq!(table.weight("not-an-algorithm"), 1);
///
/// let custom: WeightTable = [("a", 10), ("b", 0)].into_iter().collect();
/// assert_eq!(custom.weight("b"), 1);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WeightTable {
    weights: BTreeMap<String, u32>,
}

impl WeightTable {
    /// Measured defaults for every built-in algorithm.
    pub fn measured() -> Self {
        MEASURED.iter().copied().collect()
    }

    /// A table where every algorithm weighs [`DEFAULT_WEIGHT`].
    pub fn uniform() -> Self {
        Self::default()
    }

    /// Weight of canonical algorithm `name`.
    pub fn weight(&self, name: &str) -> u32 {
        self.weights.get(name).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    /// Pairs `name` with its weight.
    pub fn describe(&self, name: &'static str) -> AlgorithmDescriptor {
        AlgorithmDescriptor {
            name,
            weight: self.weight(name),
        }
    }

    /// Number of explicitly weighted algorithms.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns `true` when every lookup falls back to the default.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for WeightTable {
    /// Builds a table; zero weights are raised to 1.
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self {
            weights: iter
                .into_iter()
                .map(|(name, weight)| (name.into(), weight.max(1)))
                .collect(),
        }
    }
}
