//! Dependency graph module: the structural backbone of maven-modules.
//!
//! Provides a generic immutable directed graph, closure computation over it
//! and Graphviz rendering. Nothing here knows about Maven; the module domain
//! lives in [`crate::maven`].

pub mod closure;
pub mod dot;
pub mod engine;
pub mod types;

pub use engine::Graph;
pub use types::Edge;
