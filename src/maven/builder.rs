//! Module graph builder. Scans a project directory and assembles the
//! dependency graph of its modules.

use rayon::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

use super::pom::parse_pom;
use super::scan::{count_source_files, descriptor_paths};
use super::types::{MavenEdge, MavenPom, MavenVertex, ModuleGraph};
use crate::config::ToolConfig;
use crate::error::{Error, Result};

/// Build the module graph of the project rooted at `root`.
///
/// Descriptors are parsed in parallel; the top-level descriptor becomes the
/// graph root.
pub fn maven_graph(root: &Path, config: &ToolConfig) -> Result<ModuleGraph> {
    let paths = descriptor_paths(root, config)?;
    debug!(root = %root.display(), descriptors = paths.len(), "discovered modules");

    let poms: Vec<MavenPom> = paths
        .par_iter()
        .map(|path| {
            let module_dir = path.parent().unwrap_or(root);
            parse_pom(path, count_source_files(module_dir, config), config)
        })
        .collect::<Result<_>>()?;

    let graph = graph_from_poms(&poms, config).ok_or_else(|| Error::NoModules {
        path: root.to_path_buf(),
    })?;
    info!(
        modules = graph.vertices().len(),
        dependencies = graph.edges().len(),
        root = %graph.root(),
        "built module graph"
    );
    Ok(graph)
}

/// Assemble a graph from parsed descriptors. The last descriptor is the
/// root; `None` when there are none.
///
/// Only dependencies on modules of the project become edges. Edge endpoints
/// are the modules' own vertices, so a module's type and source count come
/// from its own descriptor rather than from the declaring reference.
pub fn graph_from_poms(poms: &[MavenPom], config: &ToolConfig) -> Option<ModuleGraph> {
    let root = MavenVertex::from(&poms.last()?.coordinate);

    let mut vertices: HashSet<MavenVertex> = HashSet::with_capacity(poms.len());
    for pom in poms {
        vertices.insert(MavenVertex::from(&pom.coordinate));
    }
    let root = vertices.get(&root).cloned().unwrap_or(root);

    let mut edges = HashSet::new();
    for pom in poms {
        let Some(parent) = vertices.get(&MavenVertex::from(&pom.coordinate)) else {
            continue;
        };
        let declared = pom
            .dependencies
            .iter()
            .chain(pom.parent.iter().filter(|_| config.parent_edges));
        for coordinate in declared {
            if let Some(child) = vertices.get(&MavenVertex::from(coordinate)) {
                edges.insert(MavenEdge::new(parent.clone(), child.clone()));
            }
        }
    }

    Some(ModuleGraph::new(vertices, edges, root))
}
