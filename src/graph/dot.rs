//! Graphviz DOT rendering.
//!
//! Only the vertex and edge sets are rendered. Output is sorted so that the
//! same graph always produces the same text.

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use super::engine::Graph;
use super::types::Edge;

impl<V, E> Graph<V, E>
where
    V: Eq + Hash + Ord + Clone + Send + Sync + fmt::Display,
    E: Edge<Vertex = V> + Eq + Hash + Clone + Send + Sync,
{
    /// Render the graph as a Graphviz `digraph`.
    pub fn to_dot(&self) -> String {
        let mut rendered: DiGraph<String, String> = DiGraph::new();
        let mut nodes: HashMap<&V, NodeIndex> = HashMap::new();

        let mut vertices: Vec<&V> = self.vertices().iter().collect();
        vertices.sort();
        for v in vertices {
            nodes.insert(v, rendered.add_node(v.to_string()));
        }

        let mut edges: Vec<&E> = self.edges().iter().collect();
        edges.sort_by(|a, b| (a.parent(), a.child()).cmp(&(b.parent(), b.child())));
        for e in edges {
            // Endpoints missing from the vertex set still get a node.
            let parent = *nodes
                .entry(e.parent())
                .or_insert_with(|| rendered.add_node(e.parent().to_string()));
            let child = *nodes
                .entry(e.child())
                .or_insert_with(|| rendered.add_node(e.child().to_string()));
            rendered.add_edge(parent, child, String::new());
        }

        format!("{}", Dot::with_config(&rendered, &[Config::EdgeNoLabel]))
    }
}
