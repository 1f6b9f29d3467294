//! crates/engine/src/schedule.rs
//!
//! Longest-processing-time-first assignment of algorithms to workers.

use crate::weights::AlgorithmDescriptor;

/// Algorithms owned by one fan-out worker.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WorkerGroup {
    algorithms: Vec<AlgorithmDescriptor>,
    load: u64,
}

impl WorkerGroup {
    /// Algorithms in the order the worker updates them.
    pub fn algorithms(&self) -> &[AlgorithmDescriptor] {
        &self.algorithms
    }

    /// Sum of the group's weights.
    pub const fn load(&self) -> u64 {
        self.load
    }
}

/// Result of [`assign`]: one group per worker, none of them empty.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Assignment {
    groups: Vec<WorkerGroup>,
}

impl Assignment {
    /// Groups indexed by worker.
    pub fn groups(&self) -> &[WorkerGroup] {
        &self.groups
    }

    /// Number of workers that received work.
    pub fn worker_count(&self) -> usize {
        self.groups.len()
    }

    /// Heaviest group load.
    pub fn makespan(&self) -> u64 {
        self.groups.iter().map(WorkerGroup::load).max().unwrap_or(0)
    }
}

/// Spreads `descriptors` over at most `workers` workers.
///
/// Descriptors are taken heaviest first (stable, so equal weights keep the
/// caller's order) and each goes to the least-loaded worker, the lowest
/// index winning ties. The worker count is clamped to `1..=descriptors`,
/// so no group is empty, every descriptor lands in exactly one group, and
/// zero descriptors yield zero groups.
///
/// ```
/// use engine::{AlgorithmDescriptor, assign};
///
/// let jobs = [
///     AlgorithmDescriptor { name: "heavy", weight: 10 },
///     AlgorithmDescriptor { name: "a", weight: 1 },
///     AlgorithmDescriptor { name: "b", weight: 1 },
///     AlgorithmDescriptor { name: "c", weight: 1 },
/// ];
/// let plan = assign(&jobs, 2);
/// assert_eq!(plan.groups()[0].load(), 10);
/// assert_eq!(plan.groups()[1].algorithms().len(), 3);
/// ```
pub fn assign(descriptors: &[AlgorithmDescriptor], workers: usize) -> Assignment {
    let weights: Vec<u32> = descriptors.iter().map(|d| d.weight).collect();
    let groups = assign_indices(&weights, workers)
        .into_iter()
        .map(|indices| {
            let algorithms: Vec<_> = indices.into_iter().map(|i| descriptors[i]).collect();
            let load = algorithms.iter().map(|d| u64::from(d.weight)).sum();
            WorkerGroup { algorithms, load }
        })
        .collect();
    Assignment { groups }
}

/// Index form of [`assign`]; returns positions into `weights` per worker.
pub(crate) fn assign_indices(weights: &[u32], workers: usize) -> Vec<Vec<usize>> {
    if weights.is_empty() {
        return Vec::new();
    }
    let workers = workers.max(1).min(weights.len());

    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| weights[b].cmp(&weights[a]));

    let mut loads = vec![0u64; workers];
    let mut groups = vec![Vec::new(); workers];
    for index in order {
        let target = least_loaded(&loads);
        loads[target] += u64::from(weights[index]);
        groups[target].push(index);
    }
    groups
}

fn least_loaded(loads: &[u64]) -> usize {
    let mut best = 0;
    for (worker, &load) in loads.iter().enumerate().skip(1) {
        if load < loads[best] {
            best = worker;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn descriptors(weights: &[(&'static str, u32)]) -> Vec<AlgorithmDescriptor> {
        weights
            .iter()
            .map(|&(name, weight)| AlgorithmDescriptor { name, weight })
            .collect()
    }

    fn names(group: &WorkerGroup) -> Vec<&'static str> {
        group.algorithms().iter().map(|d| d.name).collect()
    }

    /// Smallest achievable makespan, by trying every assignment.
    fn optimal_makespan(weights: &[u32], workers: usize) -> u64 {
        let mut best = u64::MAX;
        let mut choice = vec![0usize; weights.len()];
        loop {
            let mut loads = vec![0u64; workers];
            for (index, &worker) in choice.iter().enumerate() {
                loads[worker] += u64::from(weights[index]);
            }
            best = best.min(loads.into_iter().max().unwrap_or(0));

            let mut position = 0;
            loop {
                if position == choice.len() {
                    return best;
                }
                choice[position] += 1;
                if choice[position] < workers {
                    break;
                }
                choice[position] = 0;
                position += 1;
            }
        }
    }

    #[test]
    fn heavy_job_gets_its_own_worker() {
        let plan = assign(
            &descriptors(&[("a", 1), ("heavy", 10), ("b", 1), ("c", 1)]),
            2,
        );
        assert_eq!(plan.worker_count(), 2);
        assert_eq!(names(&plan.groups()[0]), vec!["heavy"]);
        assert_eq!(names(&plan.groups()[1]), vec!["a", "b", "c"]);
        assert_eq!(plan.makespan(), 10);
    }

    #[test]
    fn ties_go_to_the_lowest_worker() {
        let plan = assign(&descriptors(&[("x", 5), ("y", 5), ("z", 5)]), 3);
        let layout: Vec<_> = plan.groups().iter().map(names).collect();
        assert_eq!(layout, vec![vec!["x"], vec!["y"], vec!["z"]]);

        let plan = assign(&descriptors(&[("p", 2), ("q", 2), ("r", 1), ("s", 1)]), 2);
        let layout: Vec<_> = plan.groups().iter().map(names).collect();
        assert_eq!(layout, vec![vec!["p", "r"], vec!["q", "s"]]);
    }

    #[test]
    fn workers_are_clamped_to_algorithm_count() {
        let plan = assign(&descriptors(&[("only", 3)]), 8);
        assert_eq!(plan.worker_count(), 1);
        assert_eq!(plan.groups()[0].load(), 3);
    }

    #[test]
    fn nothing_to_assign() {
        let plan = assign(&[], 4);
        assert_eq!(plan.worker_count(), 0);
        assert_eq!(plan.makespan(), 0);
        assert!(assign_indices(&[], 0).is_empty());
    }

    #[test]
    fn zero_workers_still_assigns_everything() {
        assert_eq!(assign_indices(&[1, 2], 0), vec![vec![1, 0]]);
        let plan = assign(&descriptors(&[("md5", 3)]), 0);
        assert_eq!(plan.worker_count(), 1);
        assert_eq!(names(&plan.groups()[0]), vec!["md5"]);
    }

    #[test]
    fn brute_force_reference_is_exact() {
        assert_eq!(optimal_makespan(&[3, 3, 2, 2, 2], 2), 6);
        assert_eq!(optimal_makespan(&[7], 1), 7);
    }

    proptest! {
        #[test]
        fn every_index_is_assigned_exactly_once(
            weights in proptest::collection::vec(1u32..1000, 0..24),
            workers in 0usize..8,
        ) {
            let groups = assign_indices(&weights, workers);
            prop_assert_eq!(groups.len(), workers.max(1).min(weights.len()));
            let mut seen: Vec<usize> = groups.iter().flatten().copied().collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..weights.len()).collect::<Vec<_>>());
            prop_assert!(groups.iter().all(|group| !group.is_empty()));
        }

        #[test]
        fn makespan_within_lpt_bound(
            weights in proptest::collection::vec(1u32..200, 1..8),
            workers in 1usize..4,
        ) {
            let workers = workers.min(weights.len());
            let groups = assign_indices(&weights, workers);
            let makespan = groups
                .iter()
                .map(|group| group.iter().map(|&i| u64::from(weights[i])).sum::<u64>())
                .max()
                .unwrap_or(0);
            let optimum = optimal_makespan(&weights, workers);
            let w = workers as u64;
            // makespan <= (4/3 - 1/(3W)) * optimum, scaled by 3W
            prop_assert!(3 * w * makespan <= (4 * w - 1) * optimum);
        }
    }
}
