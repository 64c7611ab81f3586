//! Cutoff-bounded Dijkstra search.
//!
//! The cutoff is a pruning filter evaluated on every *candidate* distance
//! before the candidate is admitted to the frontier, not a filter over the
//! final result. A vertex whose every path fails the cutoff is never
//! discovered.

use crate::config::Config;
use crate::error::{IsochroneError, Result};
use crate::graph::Graph;
use crate::parallel::run_in_threads;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Debug;
use std::hash::Hash;

/// Reachable vertex -> minimum accumulated cost from the source.
pub type DistanceMap<V> = FxHashMap<V, f64>;

/// Admission policy for candidate path costs.
///
/// Implemented for any `Fn(f64) -> bool + Sync`, so a closure works
/// directly. Implementations must be free of shared mutable state; one
/// cutoff is shared by every worker of a multi-source search.
pub trait Cutoff: Sync {
    fn admits(&self, candidate: f64) -> bool;
}

impl<F> Cutoff for F
where
    F: Fn(f64) -> bool + Sync,
{
    #[inline]
    fn admits(&self, candidate: f64) -> bool {
        self(candidate)
    }
}

/// Admits candidates with `distance <= limit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxDistance(pub f64);

impl Cutoff for MaxDistance {
    #[inline]
    fn admits(&self, candidate: f64) -> bool {
        candidate <= self.0
    }
}

/// Admits every candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unbounded;

impl Cutoff for Unbounded {
    #[inline]
    fn admits(&self, _candidate: f64) -> bool {
        true
    }
}

/// Heap entry; ordered so that `BinaryHeap` pops the smallest cost first.
#[derive(Debug)]
struct SearchState<V> {
    cost: f64,
    vertex: V,
}

impl<V> PartialEq for SearchState<V> {
    fn eq(&self, other: &Self) -> bool {
        self.cost.total_cmp(&other.cost) == Ordering::Equal
    }
}

impl<V> Eq for SearchState<V> {}

impl<V> PartialOrd for SearchState<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V> Ord for SearchState<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: smaller costs have higher priority
        other.cost.total_cmp(&self.cost)
    }
}

/// Shortest distances from `source` to every vertex the cutoff lets through.
///
/// The result always maps `source` to `0.0`. Stale heap entries (popped
/// with a cost above the best known one) are skipped. An edge `u -> v` is
/// relaxed only if `cutoff.admits(dist[u] + w)` and the candidate improves
/// on `dist[v]`.
///
/// Expanding a vertex that has no adjacency entry, including a `source`
/// missing from the graph, fails with [`IsochroneError::VertexNotFound`].
///
/// # Examples
///
/// ```
/// use isochrones::{Graph, MaxDistance, single_source_search};
///
/// let graph = Graph::from_edges(vec![(1, 2, 2.0), (2, 3, 2.0), (3, 1, 1.0)])?;
/// let distances = single_source_search(&graph, &1, &MaxDistance(3.0))?;
/// assert_eq!(distances[&1], 0.0);
/// assert_eq!(distances[&2], 2.0);
/// assert!(!distances.contains_key(&3));
/// # Ok::<(), isochrones::IsochroneError>(())
/// ```
pub fn single_source_search<V, C>(graph: &Graph<V>, source: &V, cutoff: &C) -> Result<DistanceMap<V>>
where
    V: Clone + Eq + Hash + Debug,
    C: Cutoff + ?Sized,
{
    let mut distances = DistanceMap::default();
    let mut heap = BinaryHeap::new();

    distances.insert(source.clone(), 0.0);
    heap.push(SearchState {
        cost: 0.0,
        vertex: source.clone(),
    });

    while let Some(SearchState { cost, vertex }) = heap.pop() {
        if distances.get(&vertex).is_some_and(|&best| cost > best) {
            continue;
        }

        for (neighbor, &weight) in graph.neighbors(&vertex)? {
            let candidate = cost + weight;
            if !cutoff.admits(candidate) {
                continue;
            }

            let improves = distances
                .get(neighbor)
                .is_none_or(|&known| candidate < known);
            if improves {
                distances.insert(neighbor.clone(), candidate);
                heap.push(SearchState {
                    cost: candidate,
                    vertex: neighbor.clone(),
                });
            }
        }
    }

    Ok(distances)
}

/// Run [`single_source_search`] once per source on `workers` threads.
///
/// Searches share nothing but the read-only graph and cutoff; each one owns
/// its heap and distance map. `result[i]` belongs to `sources[i]`.
pub fn multi_source_search<V, C>(
    graph: &Graph<V>,
    sources: &[V],
    workers: usize,
    cutoff: &C,
) -> Result<Vec<DistanceMap<V>>>
where
    V: Clone + Eq + Hash + Debug + Send + Sync,
    C: Cutoff + ?Sized,
{
    log::debug!(
        "Searching from {} sources over {} vertices on {} workers",
        sources.len(),
        graph.vertex_count(),
        workers
    );
    run_in_threads(sources, workers, |source, _worker| {
        single_source_search(graph, source, cutoff)
    })
}

/// Every vertex within `max_distance` of each source.
///
/// # Examples
///
/// ```
/// use isochrones::{Graph, reachable_within};
///
/// let graph = Graph::from_edges(vec![("a", "b", 1.0), ("b", "a", 1.0)])?;
/// let isochrones = reachable_within(&graph, &["a", "b"], 5.0, 2)?;
/// assert_eq!(isochrones[1][&"a"], 1.0);
/// # Ok::<(), isochrones::IsochroneError>(())
/// ```
pub fn reachable_within<V>(
    graph: &Graph<V>,
    sources: &[V],
    max_distance: f64,
    workers: usize,
) -> Result<Vec<DistanceMap<V>>>
where
    V: Clone + Eq + Hash + Debug + Send + Sync,
{
    if max_distance.is_nan() {
        return Err(IsochroneError::InvalidInput(
            "Distance cutoff must not be NaN".to_string(),
        ));
    }
    multi_source_search(graph, sources, workers, &MaxDistance(max_distance))
}

/// [`multi_source_search`] with the worker count and cutoff from `config`.
pub fn search_with_config<V>(
    graph: &Graph<V>,
    sources: &[V],
    config: &Config,
) -> Result<Vec<DistanceMap<V>>>
where
    V: Clone + Eq + Hash + Debug + Send + Sync,
{
    config.validate().map_err(IsochroneError::Config)?;
    multi_source_search(graph, sources, config.workers, &config.search_cutoff())
}
