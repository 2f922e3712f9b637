//! Core types for the dependency graph.
//!
//! Defines the edge capability shared by every graph instantiation and
//! the partial result accumulated while walking a closure.

use std::collections::HashSet;
use std::hash::Hash;

/// A directed edge meaning "parent depends on child".
///
/// Implementors are compared and hashed by value; two edges with the same
/// endpoints should be equal so that the edge collection behaves as a set.
pub trait Edge {
    /// The vertex type this edge connects.
    type Vertex;

    /// The depending side of the edge.
    fn parent(&self) -> &Self::Vertex;

    /// The side being depended upon.
    fn child(&self) -> &Self::Vertex;
}

/// Vertices and edges collected for part of a closure.
///
/// Merging two partial results is set union, so the final closure does not
/// depend on the order in which parallel branches finish.
#[derive(Debug, Clone)]
pub(crate) struct Reach<V, E> {
    pub(crate) vertices: HashSet<V>,
    pub(crate) edges: HashSet<E>,
}

impl<V, E> Reach<V, E>
where
    V: Eq + Hash,
    E: Eq + Hash,
{
    pub(crate) fn empty() -> Self {
        Self {
            vertices: HashSet::new(),
            edges: HashSet::new(),
        }
    }

    /// A single vertex contributing no edges.
    pub(crate) fn vertex(v: V) -> Self {
        let mut reach = Self::empty();
        reach.vertices.insert(v);
        reach
    }

    pub(crate) fn union(mut self, mut other: Self) -> Self {
        // Extend the larger side.
        if self.vertices.len() < other.vertices.len() {
            std::mem::swap(&mut self.vertices, &mut other.vertices);
        }
        if self.edges.len() < other.edges.len() {
            std::mem::swap(&mut self.edges, &mut other.edges);
        }
        self.vertices.extend(other.vertices);
        self.edges.extend(other.edges);
        self
    }
}
