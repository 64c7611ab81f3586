//! Immutable weighted directed graph.
//!
//! A [`Graph`] is built once from a complete edge map and never mutated
//! afterwards, so a `&Graph` can be shared by every search worker without
//! synchronization. Vertices are any hashable key; [`VertexInterner`] maps
//! string identifiers to dense integer ids for the hot path.

use crate::error::{IsochroneError, Result};
use rustc_hash::FxHashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Outgoing edges of one vertex: neighbor -> edge weight.
pub type Neighbors<V> = FxHashMap<V, f64>;

/// Complete adjacency: vertex -> neighbor -> edge weight.
pub type AdjacencyMap<V> = FxHashMap<V, Neighbors<V>>;

/// Dense integer vertex id handed out by [`VertexInterner`].
pub type VertexId = usize;

#[derive(Debug, Clone)]
pub struct Graph<V> {
    weights: AdjacencyMap<V>,
}

impl<V> Graph<V>
where
    V: Eq + Hash + Debug,
{
    /// Build a graph from a vertex -> neighbor -> weight mapping.
    ///
    /// Accepts any nested iterable, e.g. `HashMap<V, HashMap<V, f64>>` or
    /// `Vec<(V, Vec<(V, f64)>)>`. Only keys of the outer mapping are vertices
    /// that can be expanded; a neighbor without its own entry is a sink that
    /// searches cannot expand.
    ///
    /// Every weight must be finite and non-negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use isochrones::Graph;
    /// use std::collections::HashMap;
    ///
    /// let weights = HashMap::from([
    ///     (1, HashMap::from([(2, 3.0)])),
    ///     (2, HashMap::from([(1, 3.0)])),
    /// ]);
    /// let graph = Graph::new(weights)?;
    /// assert_eq!(graph.vertex_count(), 2);
    /// assert_eq!(graph.neighbors(&1)?[&2], 3.0);
    /// # Ok::<(), isochrones::IsochroneError>(())
    /// ```
    pub fn new<W, N>(weights: W) -> Result<Self>
    where
        W: IntoIterator<Item = (V, N)>,
        N: IntoIterator<Item = (V, f64)>,
    {
        let mut adjacency = AdjacencyMap::default();

        for (vertex, neighbors) in weights {
            let mut edges = Neighbors::default();
            for (neighbor, weight) in neighbors {
                validate_weight(&vertex, &neighbor, weight)?;
                insert_min(&mut edges, neighbor, weight);
            }

            let entry: &mut Neighbors<V> = adjacency.entry(vertex).or_default();
            for (neighbor, weight) in edges {
                insert_min(entry, neighbor, weight);
            }
        }

        Ok(Self { weights: adjacency })
    }

    /// Build a graph from `(from, to, weight)` triples.
    ///
    /// Every edge source becomes a vertex. Parallel edges keep the smallest
    /// weight.
    pub fn from_edges<E>(edges: E) -> Result<Self>
    where
        E: IntoIterator<Item = (V, V, f64)>,
    {
        let mut adjacency = AdjacencyMap::default();

        for (from, to, weight) in edges {
            validate_weight(&from, &to, weight)?;
            let entry: &mut Neighbors<V> = adjacency.entry(from).or_default();
            insert_min(entry, to, weight);
        }

        Ok(Self { weights: adjacency })
    }

    /// Outgoing edges of `vertex`.
    ///
    /// Fails with [`IsochroneError::VertexNotFound`] when `vertex` has no
    /// adjacency entry; a missing vertex is never treated as having zero
    /// neighbors.
    #[inline]
    pub fn neighbors(&self, vertex: &V) -> Result<&Neighbors<V>> {
        self.weights
            .get(vertex)
            .ok_or_else(|| IsochroneError::VertexNotFound(format!("{:?}", vertex)))
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.weights.contains_key(vertex)
    }

    pub fn vertex_count(&self) -> usize {
        self.weights.len()
    }

    pub fn edge_count(&self) -> usize {
        self.weights.values().map(|neighbors| neighbors.len()).sum()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.weights.keys()
    }
}

impl Graph<VertexId> {
    /// Build an integer-keyed graph from string-keyed weights.
    ///
    /// Returns the graph together with the interner needed to translate ids
    /// back to names.
    ///
    /// # Examples
    ///
    /// ```
    /// use isochrones::Graph;
    ///
    /// let weights = vec![
    ///     ("a", vec![("b", 1.5)]),
    ///     ("b", vec![("a", 1.5), ("c", 2.0)]),
    /// ];
    /// let (graph, interner) = Graph::from_named(weights)?;
    /// let b = interner.id_of("b").unwrap();
    /// assert_eq!(graph.neighbors(&b)?.len(), 2);
    /// assert_eq!(interner.len(), 3);
    /// # Ok::<(), isochrones::IsochroneError>(())
    /// ```
    pub fn from_named<W, N, S>(weights: W) -> Result<(Self, VertexInterner)>
    where
        W: IntoIterator<Item = (S, N)>,
        N: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut interner = VertexInterner::default();
        let mut interned = Vec::new();

        for (vertex, neighbors) in weights {
            let id = interner.intern(vertex.as_ref());
            let edges: Vec<(VertexId, f64)> = neighbors
                .into_iter()
                .map(|(neighbor, weight)| (interner.intern(neighbor.as_ref()), weight))
                .collect();
            interned.push((id, edges));
        }

        log::debug!("Interned {} vertex names", interner.len());
        let graph = Graph::new(interned)?;
        Ok((graph, interner))
    }
}

fn validate_weight<V: Debug>(from: &V, to: &V, weight: f64) -> Result<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(IsochroneError::InvalidInput(format!(
            "Edge {:?} -> {:?} has weight {}; weights must be finite and non-negative",
            from, to, weight
        )));
    }
    Ok(())
}

fn insert_min<V: Eq + Hash>(edges: &mut Neighbors<V>, neighbor: V, weight: f64) {
    edges
        .entry(neighbor)
        .and_modify(|known| *known = known.min(weight))
        .or_insert(weight);
}

/// String -> dense integer id table.
///
/// Ids are handed out in first-seen order starting at zero and stay stable
/// for the lifetime of the interner.
#[derive(Debug, Clone, Default)]
pub struct VertexInterner {
    ids: FxHashMap<String, VertexId>,
    names: Vec<String>,
}

impl VertexInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `name`, allocating a new one on first sight.
    pub fn intern(&mut self, name: &str) -> VertexId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    pub fn id_of(&self, name: &str) -> Option<VertexId> {
        self.ids.get(name).copied()
    }

    pub fn name_of(&self, id: VertexId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Translate names to ids, failing on the first unknown name.
    pub fn ids_of<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<VertexId>> {
        names
            .iter()
            .map(|name| {
                self.id_of(name.as_ref())
                    .ok_or_else(|| IsochroneError::VertexNotFound(name.as_ref().to_string()))
            })
            .collect()
    }

    /// Translate an id-keyed distance map back to vertex names.
    pub fn resolve_distances(
        &self,
        distances: &FxHashMap<VertexId, f64>,
    ) -> Result<FxHashMap<String, f64>> {
        distances
            .iter()
            .map(|(&id, &distance)| {
                self.name_of(id)
                    .map(|name| (name.to_string(), distance))
                    .ok_or_else(|| IsochroneError::VertexNotFound(format!("id {}", id)))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
