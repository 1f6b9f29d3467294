//! crates/engine/src/engine.rs
//!
//! Public entry points tying the registry, the weight table and the three
//! pipelines together.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use checksums::{AlgorithmRegistry, Constructor};
use logging::trace_sched;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::results::{Digests, FileDigests, SourceId};
use crate::schedule::{self, Assignment};
use crate::weights::{AlgorithmDescriptor, WeightTable};
use crate::{bytes, fanout, files};

/// Name given to sources passed to [`Engine::run_fan_out`].
pub const STREAM_SOURCE: &str = "<stream>";

/// An algorithm whose name has been checked against the registry.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Resolved {
    pub(crate) name: &'static str,
    pub(crate) constructor: Constructor,
}

/// Concurrent checksum engine.
///
/// An engine is cheap to clone and holds no threads between runs: every
/// `run_*` call starts its own threads and joins all of them before it
/// returns, on success and on failure alike.
///
/// Algorithm names go through the registry, so any accepted spelling
/// (`SHA-256`, `sha_256`) works and repeated names are hashed once. Unknown
/// names and empty lists are rejected before any thread starts.
#[derive(Clone, Debug)]
pub struct Engine {
    registry: AlgorithmRegistry,
    weights: WeightTable,
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// Engine with every built-in algorithm and the measured weights.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            registry: AlgorithmRegistry::builtin(),
            weights: WeightTable::measured(),
            config,
        }
    }

    /// Replaces the algorithm registry.
    #[must_use]
    pub fn with_registry(mut self, registry: AlgorithmRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replaces the scheduling weights.
    #[must_use]
    pub fn with_weights(mut self, weights: WeightTable) -> Self {
        self.weights = weights;
        self
    }

    /// Active configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Registry used to resolve algorithm names.
    pub const fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    /// Weights used to balance fan-out workers.
    pub const fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Worker assignment [`run_fan_out`](Self::run_fan_out) would use.
    pub fn plan<S: AsRef<str>>(&self, algorithms: &[S]) -> EngineResult<Assignment> {
        let resolved = self.resolve(algorithms)?;
        let descriptors: Vec<AlgorithmDescriptor> = resolved
            .iter()
            .map(|algorithm| self.weights.describe(algorithm.name))
            .collect();
        Ok(schedule::assign(
            &descriptors,
            self.config.fan_out_workers(descriptors.len()),
        ))
    }

    /// Hashes an in-memory buffer with every algorithm in parallel.
    pub fn run_bytes<S: AsRef<str>>(&self, data: &[u8], algorithms: &[S]) -> EngineResult<Digests> {
        let resolved = self.resolve(algorithms)?;
        Ok(bytes::run(data, &resolved))
    }

    /// Reads `source` once and hashes it with every algorithm.
    ///
    /// A read error aborts every worker and is returned as
    /// [`EngineError::Io`] once all threads have been joined.
    pub fn run_fan_out<R, S>(&self, source: R, algorithms: &[S]) -> EngineResult<Digests>
    where
        R: Read + Send,
        S: AsRef<str>,
    {
        let resolved = self.resolve(algorithms)?;
        self.fan_out(source, &SourceId::stream(STREAM_SOURCE), &resolved)
    }

    /// Opens `path` and hashes it through the fan-out pipeline.
    pub fn run_fan_out_path<S: AsRef<str>>(
        &self,
        path: impl AsRef<Path>,
        algorithms: &[S],
    ) -> EngineResult<Digests> {
        let resolved = self.resolve(algorithms)?;
        let path = path.as_ref();
        let source_id = SourceId::Path(path.to_path_buf());
        let file = File::open(path).map_err(|error| EngineError::Io {
            source_id: source_id.clone(),
            error,
        })?;
        self.fan_out(file, &source_id, &resolved)
    }

    /// Hashes many files, one task per (file, algorithm) pair.
    ///
    /// Files that cannot be opened or read are listed in
    /// [`FileDigests::failures`] and the other files still complete. Only
    /// internal failures (a stalled stream, a panicked thread) fail the
    /// whole run.
    pub fn run_files<P, S>(&self, paths: &[P], algorithms: &[S]) -> EngineResult<FileDigests>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let resolved = self.resolve(algorithms)?;
        let mut seen = HashSet::with_capacity(paths.len());
        let unique: Vec<PathBuf> = paths
            .iter()
            .map(|path| path.as_ref().to_path_buf())
            .filter(|path| seen.insert(path.clone()))
            .collect();
        if unique.is_empty() {
            return Err(EngineError::NoSources);
        }
        files::run(&self.config, &unique, &resolved)
    }

    fn fan_out<R: Read + Send>(
        &self,
        source: R,
        source_id: &SourceId,
        resolved: &[Resolved],
    ) -> EngineResult<Digests> {
        let weights: Vec<u32> = resolved
            .iter()
            .map(|algorithm| self.weights.weight(algorithm.name))
            .collect();
        let groups = schedule::assign_indices(&weights, self.config.fan_out_workers(resolved.len()));
        for (worker, group) in groups.iter().enumerate() {
            let names: Vec<&str> = group.iter().map(|&i| resolved[i].name).collect();
            let load: u64 = group.iter().map(|&i| u64::from(weights[i])).sum();
            trace_sched!(worker, load, algorithms = ?names, "assigned");
        }
        fanout::run(&self.config, source, source_id, resolved, &groups)
    }

    /// Resolves names to canonical algorithms, dropping repeats.
    fn resolve<S: AsRef<str>>(&self, algorithms: &[S]) -> EngineResult<Vec<Resolved>> {
        let mut resolved: Vec<Resolved> = Vec::with_capacity(algorithms.len());
        for name in algorithms {
            let canonical = self.registry.canonical_name(name.as_ref())?;
            if resolved.iter().any(|algorithm| algorithm.name == canonical) {
                continue;
            }
            let constructor = self.registry.constructor(canonical)?;
            resolved.push(Resolved {
                name: canonical,
                constructor,
            });
        }
        if resolved.is_empty() {
            return Err(EngineError::NoAlgorithms);
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_canonicalizes_and_dedupes() {
        let engine = Engine::default();
        let resolved = engine
            .resolve(&["SHA-256", "md5", "sha_256"])
            .expect("known names");
        let names: Vec<_> = resolved.iter().map(|algorithm| algorithm.name).collect();
        assert_eq!(names, vec!["sha256", "md5"]);
    }

    #[test]
    fn empty_and_unknown_selections_are_rejected() {
        let engine = Engine::default();
        let none: [&str; 0] = [];
        assert!(matches!(engine.resolve(&none), Err(EngineError::NoAlgorithms)));
        assert!(matches!(
            engine.resolve(&["md5", "whirlpool"]),
            Err(EngineError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn plan_uses_injected_weights() {
        let weights: WeightTable = [("sha1", 10), ("md5", 1), ("crc32", 1), ("adler32", 1)]
            .into_iter()
            .collect();
        let engine = Engine::new(EngineConfig::default().with_worker_count(2)).with_weights(weights);
        let plan = engine
            .plan(&["md5", "sha1", "crc32", "adler32"])
            .expect("plan");
        assert_eq!(plan.worker_count(), 2);
        let heavy: Vec<_> = plan.groups()[0].algorithms().iter().map(|d| d.name).collect();
        assert_eq!(heavy, vec!["sha1"]);
        assert_eq!(plan.groups()[1].load(), 3);
    }

    #[test]
    fn plan_never_uses_more_workers_than_algorithms() {
        let engine = Engine::new(EngineConfig::default().with_worker_count(16));
        assert_eq!(engine.plan(&["md5", "sha1"]).expect("plan").worker_count(), 2);
    }
}
