//! Deletion-impact analysis.
//!
//! Given top-level vertices a caller wants to delete, work out which
//! vertices of their combined closures can go without leaving any surviving
//! vertex with a dangling dependency.
//!
//! The analysis runs in two phases. First the closures of all accepted
//! candidates are unioned. Then every vertex of that union that is still the
//! child of an edge coming from outside the union is retained together with
//! its own closure in the original graph. What remains is deletable.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, info, warn};

use crate::graph::{Edge, Graph};

/// Why a deletion candidate was not processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// The name did not resolve to a vertex.
    NotFound { name: String },
    /// Other vertices depend on the candidate directly.
    HasDependents { name: String, dependents: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotFound { name } => write!(f, "Module not found: {}", name),
            Rejection::HasDependents { name, .. } => write!(f, "{} cannot be deleted", name),
        }
    }
}

/// Outcome of a deletion request.
#[derive(Debug, Clone)]
pub struct DeletionImpact<V> {
    /// Candidates that passed the eligibility checks.
    pub accepted: Vec<V>,
    /// Candidates that were reported and skipped.
    pub rejected: Vec<Rejection>,
    /// Vertices that can be removed together.
    pub deletable: HashSet<V>,
}

impl<V: Ord> DeletionImpact<V> {
    /// The deletable vertices in ascending order.
    pub fn sorted_deletable(&self) -> Vec<&V> {
        let mut sorted: Vec<&V> = self.deletable.iter().collect();
        sorted.sort();
        sorted
    }
}

/// Resolve `names` with `resolve`, check eligibility, and compute the
/// deletable set for the accepted candidates.
///
/// A name that does not resolve to a vertex of `graph`, or whose vertex has
/// incoming edges, is recorded in [`DeletionImpact::rejected`] and skipped.
/// The remaining candidates are still analyzed.
pub fn deletion_impact<V, E, S, F>(
    graph: &Graph<V, E>,
    names: &[S],
    resolve: F,
) -> DeletionImpact<V>
where
    V: Eq + Hash + Clone + Send + Sync + fmt::Display,
    E: Edge<Vertex = V> + Eq + Hash + Clone + Send + Sync,
    S: AsRef<str>,
    F: Fn(&str) -> Option<V>,
{
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for name in names {
        let name = name.as_ref();
        match resolve(name).filter(|v| graph.contains_vertex(v)) {
            None => {
                warn!(module = name, "deletion candidate not found");
                rejected.push(Rejection::NotFound {
                    name: name.to_string(),
                });
            }
            Some(v) => {
                let dependents = graph.order_incoming(&v);
                if dependents > 0 {
                    warn!(module = %v, dependents, "deletion candidate is still depended on");
                    rejected.push(Rejection::HasDependents {
                        name: v.to_string(),
                        dependents,
                    });
                } else {
                    accepted.push(v);
                }
            }
        }
    }

    let deletable = deletable_vertices(graph, &accepted);
    DeletionImpact {
        accepted,
        rejected,
        deletable,
    }
}

/// Compute which vertices of the candidates' closures can be deleted.
///
/// Candidates are assumed to have passed the eligibility checks of
/// [`deletion_impact`]; a candidate missing from the graph is skipped.
pub fn deletable_vertices<V, E>(graph: &Graph<V, E>, candidates: &[V]) -> HashSet<V>
where
    V: Eq + Hash + Clone + Send + Sync + fmt::Display,
    E: Edge<Vertex = V> + Eq + Hash + Clone + Send + Sync,
{
    let mut candidate: HashSet<V> = candidates
        .par_iter()
        .filter_map(|c| match graph.induced_sub_graph(c) {
            Ok(sub) => Some(sub),
            Err(e) => {
                warn!(error = %e, "skipping deletion candidate");
                None
            }
        })
        .flat_map_iter(|sub| sub.into_parts().0)
        .collect();

    if candidate.is_empty() {
        return candidate;
    }

    let rest: HashSet<&V> = graph
        .vertices()
        .iter()
        .filter(|v| !candidate.contains(*v))
        .collect();

    // Children of boundary edges: still needed by a surviving vertex.
    let needed: HashSet<&V> = graph
        .edges()
        .iter()
        .filter(|e| rest.contains(e.parent()) && candidate.contains(e.child()))
        .map(|e| e.child())
        .collect();
    debug!(
        candidates = candidate.len(),
        boundary = needed.len(),
        "computed deletion boundary"
    );

    let retained: HashSet<V> = needed
        .par_iter()
        .filter_map(|v| graph.induced_sub_graph(v).ok())
        .flat_map_iter(|sub| sub.into_parts().0)
        .collect();

    candidate.retain(|v| !retained.contains(v));
    info!(
        deletable = candidate.len(),
        retained = retained.len(),
        "deletion impact computed"
    );
    candidate
}
