//! Induced subgraph (transitive dependency closure) computation.
//!
//! The closure of a vertex is walked breadth first, one frontier at a time,
//! with a parallel fan-out over the frontier. Since the graph is a DAG rather
//! than a tree, a shared dependency can be reached along many paths; every
//! walk therefore carries its own claim set, and only the branch that claims
//! a vertex first puts it on the next frontier. Stack depth stays constant
//! however deep the dependency chains are.

use dashmap::DashSet;
use rayon::prelude::*;
use std::fmt;
use std::hash::Hash;
use tracing::debug;

use super::engine::Graph;
use super::types::{Edge, Reach};
use crate::error::Result;

impl<V, E> Graph<V, E>
where
    V: Eq + Hash + Clone + Send + Sync + fmt::Display,
    E: Edge<Vertex = V> + Eq + Hash + Clone + Send + Sync,
{
    /// Compute the subgraph of everything `v` transitively depends on.
    ///
    /// The result contains `v`, every vertex reachable from it through
    /// outgoing edges, and the outgoing edges among them. Edges entering the
    /// closure from outside are never included. The new graph is rooted at `v`.
    ///
    /// Fails with [`crate::Error::VertexNotFound`] if `v` is not a vertex of
    /// this graph.
    pub fn induced_sub_graph(&self, v: &V) -> Result<Graph<V, E>> {
        self.verify_vertex_exists(v)?;

        let claimed = DashSet::new();
        claimed.insert(v.clone());

        let mut reach = Reach::vertex(v.clone());
        let mut frontier = vec![v.clone()];
        let mut rounds = 0usize;
        while !frontier.is_empty() {
            let step = frontier
                .par_iter()
                .map(|u| self.expand(u, &claimed))
                .reduce(Reach::empty, Reach::union);
            frontier = step.vertices.iter().cloned().collect();
            reach = reach.union(step);
            rounds += 1;
        }

        debug!(
            root = %v,
            vertices = reach.vertices.len(),
            edges = reach.edges.len(),
            rounds,
            "computed induced subgraph"
        );
        Ok(Graph::new(reach.vertices, reach.edges, v.clone()))
    }

    /// Outgoing edges of `u`, plus the children this branch claimed first.
    fn expand(&self, u: &V, claimed: &DashSet<V>) -> Reach<V, E> {
        let edges = self.outgoing_edges_of_vertex(u);
        // `insert` is the atomic claim: false means another branch owns it.
        let vertices = edges
            .iter()
            .map(|e| e.child())
            .filter(|child| claimed.insert((*child).clone()))
            .cloned()
            .collect();
        Reach { vertices, edges }
    }
}
