//! The core graph container.
//!
//! A [`Graph`] is immutable once built. Adjacency queries go through an
//! edge index that is derived from the edge set on first use and then kept
//! for the lifetime of the instance; every structural change produces a new
//! graph with its own index.

use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::sync::OnceLock;
use tracing::debug;

use super::types::Edge;
use crate::error::{Error, Result};

/// An immutable directed graph with a distinguished root vertex.
#[derive(Debug, Clone)]
pub struct Graph<V, E> {
    vertices: HashSet<V>,
    edges: HashSet<E>,
    /// Default entry point. Carried as metadata, it may have incoming edges.
    root: V,
    /// Index: vertex -> every edge touching it as parent or child.
    edge_index: OnceLock<HashMap<V, HashSet<E>>>,
}

impl<V, E> Graph<V, E>
where
    V: Eq + Hash + Clone + Send + Sync,
    E: Edge<Vertex = V> + Eq + Hash + Clone + Send + Sync,
{
    /// Create a graph from its parts.
    ///
    /// Edge endpoints are expected to be members of `vertices`. This is not
    /// checked; a vertex that only appears in edges simply has no entry in the
    /// vertex set, and a vertex without edges reports empty neighbor sets.
    pub fn new(vertices: HashSet<V>, edges: HashSet<E>, root: V) -> Self {
        Self {
            vertices,
            edges,
            root,
            edge_index: OnceLock::new(),
        }
    }

    pub fn vertices(&self) -> &HashSet<V> {
        &self.vertices
    }

    pub fn edges(&self) -> &HashSet<E> {
        &self.edges
    }

    pub fn root(&self) -> &V {
        &self.root
    }

    /// Consume the graph, returning `(vertices, edges, root)`.
    pub fn into_parts(self) -> (HashSet<V>, HashSet<E>, V) {
        (self.vertices, self.edges, self.root)
    }

    pub fn contains_vertex(&self, v: &V) -> bool {
        self.vertices.contains(v)
    }

    // ─── Adjacency Queries ──────────────────────────────────────

    /// All edges touching `v`. Empty when `v` has no indexed edges.
    pub fn edges_of_vertex(&self, v: &V) -> HashSet<E> {
        self.touching(v).cloned().collect()
    }

    /// Edges where `v` is the parent.
    pub fn outgoing_edges_of_vertex(&self, v: &V) -> HashSet<E> {
        self.touching(v)
            .filter(|e| e.parent() == v)
            .cloned()
            .collect()
    }

    /// Edges where `v` is the child.
    pub fn incoming_edges_of_vertex(&self, v: &V) -> HashSet<E> {
        self.touching(v)
            .filter(|e| e.child() == v)
            .cloned()
            .collect()
    }

    /// Vertices `v` depends on directly.
    pub fn children_of_vertex(&self, v: &V) -> HashSet<V> {
        self.touching(v)
            .filter(|e| e.parent() == v)
            .map(|e| e.child().clone())
            .collect()
    }

    /// Vertices that depend on `v` directly.
    pub fn parents_of_vertex(&self, v: &V) -> HashSet<V> {
        self.touching(v)
            .filter(|e| e.child() == v)
            .map(|e| e.parent().clone())
            .collect()
    }

    /// Number of edges touching `v`.
    pub fn order(&self, v: &V) -> usize {
        self.touching(v).count()
    }

    pub fn order_outgoing(&self, v: &V) -> usize {
        self.touching(v).filter(|e| e.parent() == v).count()
    }

    pub fn order_incoming(&self, v: &V) -> usize {
        self.touching(v).filter(|e| e.child() == v).count()
    }

    // ─── Structural Operations ──────────────────────────────────

    /// Return a new graph without `to_remove` and without every edge touching
    /// one of those vertices. The root is kept as is.
    ///
    /// Removing nothing yields an identical graph.
    pub fn remove_all(&self, to_remove: &HashSet<V>) -> Graph<V, E> {
        if to_remove.is_empty() {
            debug!("remove_all called with an empty set, graph unchanged");
            return Graph::new(self.vertices.clone(), self.edges.clone(), self.root.clone());
        }

        let edges_to_remove: HashSet<&E> = to_remove
            .iter()
            .flat_map(|v| self.touching(v))
            .collect();

        let vertices = self
            .vertices
            .iter()
            .filter(|v| !to_remove.contains(*v))
            .cloned()
            .collect();
        let edges = self
            .edges
            .iter()
            .filter(|e| !edges_to_remove.contains(*e))
            .cloned()
            .collect();

        Graph::new(vertices, edges, self.root.clone())
    }

    // ─── Internal Helpers ───────────────────────────────────────

    fn touching<'a>(&'a self, v: &V) -> impl Iterator<Item = &'a E> + 'a {
        self.index().get(v).into_iter().flatten()
    }

    /// The edge index, built on first access. Concurrent first callers
    /// block until the single build finishes and then share its result.
    fn index(&self) -> &HashMap<V, HashSet<E>> {
        self.edge_index.get_or_init(|| {
            let index = self
                .edges
                .par_iter()
                .fold(HashMap::new, |mut acc: HashMap<V, HashSet<E>>, e| {
                    acc.entry(e.parent().clone()).or_default().insert(e.clone());
                    acc.entry(e.child().clone()).or_default().insert(e.clone());
                    acc
                })
                .reduce(HashMap::new, merge_index);
            debug!(
                vertices = index.len(),
                edges = self.edges.len(),
                "built edge index"
            );
            index
        })
    }
}

impl<V, E> Graph<V, E>
where
    V: Eq + Hash + Clone + Send + Sync + fmt::Display,
    E: Edge<Vertex = V> + Eq + Hash + Clone + Send + Sync,
{
    /// Fail with [`Error::VertexNotFound`] unless `v` is in the vertex set.
    pub fn verify_vertex_exists(&self, v: &V) -> Result<()> {
        if self.vertices.contains(v) {
            Ok(())
        } else {
            Err(Error::VertexNotFound {
                vertex: v.to_string(),
            })
        }
    }
}

fn merge_index<V, E>(
    mut a: HashMap<V, HashSet<E>>,
    mut b: HashMap<V, HashSet<E>>,
) -> HashMap<V, HashSet<E>>
where
    V: Eq + Hash,
    E: Eq + Hash,
{
    if a.len() < b.len() {
        std::mem::swap(&mut a, &mut b);
    }
    for (v, edges) in b {
        a.entry(v).or_default().extend(edges);
    }
    a
}

/// Graphs compare by vertices, edges and root; the derived index is ignored.
impl<V, E> PartialEq for Graph<V, E>
where
    V: Eq + Hash,
    E: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.vertices == other.vertices && self.edges == other.edges
    }
}

impl<V: Eq + Hash, E: Eq + Hash> Eq for Graph<V, E> {}
