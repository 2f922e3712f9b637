//! Maven module domain: descriptor parsing, module discovery and building
//! the module dependency graph.

pub mod builder;
pub mod pom;
pub mod scan;
pub mod types;

pub use builder::{graph_from_poms, maven_graph};
pub use pom::{parse_pom, parse_pom_str};
pub use scan::{count_source_files, descriptor_paths};
pub use types::{MavenCoordinate, MavenEdge, MavenPom, MavenVertex, ModuleGraph};
