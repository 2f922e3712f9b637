//! # maven-modules
//!
//! Dependency analysis for large multi-module Maven repositories.
//!
//! The project's modules and their declared dependencies are loaded into an
//! immutable directed graph, which answers structural questions:
//!
//! - **Top-level modules**: modules no other module depends on
//! - **Closures**: everything a module transitively depends on
//! - **Deletion impact**: which modules can go along with a set of top-level
//!   modules without breaking any module that stays
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use maven_modules::{delete_modules, maven_graph, ToolConfig};
//! use std::path::Path;
//!
//! let graph = maven_graph(Path::new("."), &ToolConfig::default()).unwrap();
//!
//! let impact = delete_modules(&graph, &["org.example:legacy-app"]);
//! for module in impact.sorted_deletable() {
//!     println!("{}", module);
//! }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod maven;
pub mod query;

// Re-exports for convenience
pub use error::{Error, Result};

pub use analysis::{deletable_vertices, deletion_impact, DeletionImpact, Rejection};
pub use config::ToolConfig;
pub use graph::{Edge, Graph};
pub use maven::{maven_graph, MavenCoordinate, MavenEdge, MavenPom, MavenVertex, ModuleGraph};
pub use query::{
    delete_modules, find_module, modules_by_dependent_count, modules_by_source_files,
    subgraph_dot, top_level_modules, DependentCount, ModuleFilter,
};
