//! Queries over a module graph, as offered by the command line.
//!
//! Filters never influence graph construction or the closure and deletion
//! algorithms; they are applied to results that were already computed.

use serde::Serialize;

use crate::analysis::{deletion_impact, DeletionImpact};
use crate::config::ToolConfig;
use crate::error::{Error, Result};
use crate::maven::{MavenVertex, ModuleGraph};

/// Predicates selecting modules by declared type and test status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFilter {
    /// Keep modules of this type. Modules without a type are kept too.
    pub kind: Option<String>,
    /// Drop modules of this type.
    pub skip_kind: Option<String>,
    /// Drop modules whose artifact id contains `test_marker`.
    pub skip_tests: bool,
    pub test_marker: String,
}

impl Default for ModuleFilter {
    fn default() -> Self {
        Self {
            kind: None,
            skip_kind: None,
            skip_tests: false,
            test_marker: ToolConfig::default().test_marker,
        }
    }
}

impl ModuleFilter {
    pub fn matches(&self, module: &MavenVertex) -> bool {
        let declared = module.kind.as_deref();
        let kind_ok = match (self.kind.as_deref(), declared) {
            (Some(wanted), Some(kind)) => wanted == kind,
            _ => true,
        };
        let skip_ok = match (self.skip_kind.as_deref(), declared) {
            (Some(skipped), Some(kind)) => skipped != kind,
            _ => true,
        };
        let tests_ok = !self.skip_tests || !module.artifact_id.contains(&self.test_marker);
        kind_ok && skip_ok && tests_ok
    }
}

/// A module with the number of modules depending on it directly.
#[derive(Debug, Clone, Serialize)]
pub struct DependentCount<'a> {
    pub dependents: usize,
    pub module: &'a MavenVertex,
}

/// Look up a module by `groupId:artifactId`. Further `:` segments are
/// ignored.
pub fn find_module<'a>(graph: &'a ModuleGraph, name: &str) -> Option<&'a MavenVertex> {
    let mut parts = name.split(':');
    let group_id = parts.next()?;
    let artifact_id = parts.next()?;
    graph
        .vertices()
        .get(&MavenVertex::key_only(group_id, artifact_id))
}

/// Modules nothing else in the project depends on, sorted by key.
pub fn top_level_modules<'a>(
    graph: &'a ModuleGraph,
    filter: &ModuleFilter,
) -> Vec<&'a MavenVertex> {
    let mut modules: Vec<&MavenVertex> = graph
        .vertices()
        .iter()
        .filter(|v| graph.order_incoming(v) == 0)
        .filter(|v| filter.matches(v))
        .collect();
    modules.sort();
    modules
}

/// Modules ordered by source file count, largest first.
pub fn modules_by_source_files<'a>(
    graph: &'a ModuleGraph,
    filter: &ModuleFilter,
) -> Vec<&'a MavenVertex> {
    let mut modules: Vec<&MavenVertex> = graph
        .vertices()
        .iter()
        .filter(|v| filter.matches(v))
        .collect();
    modules.sort_by(|a, b| b.source_files.cmp(&a.source_files).then_with(|| a.cmp(b)));
    modules
}

/// Modules ordered by how many modules depend on them, most first.
pub fn modules_by_dependent_count<'a>(
    graph: &'a ModuleGraph,
    filter: &ModuleFilter,
) -> Vec<DependentCount<'a>> {
    let mut counts: Vec<DependentCount<'a>> = graph
        .vertices()
        .iter()
        .filter(|v| filter.matches(v))
        .map(|module| DependentCount {
            dependents: graph.order_incoming(module),
            module,
        })
        .collect();
    counts.sort_by(|a, b| {
        b.dependents
            .cmp(&a.dependents)
            .then_with(|| a.module.cmp(b.module))
    });
    counts
}

/// Work out which modules can be deleted along with the named top-level
/// modules.
pub fn delete_modules<S: AsRef<str>>(
    graph: &ModuleGraph,
    names: &[S],
) -> DeletionImpact<MavenVertex> {
    deletion_impact(graph, names, |name| find_module(graph, name).cloned())
}

/// DOT description of the named module's induced subgraph.
pub fn subgraph_dot(graph: &ModuleGraph, name: &str) -> Result<String> {
    let module = find_module(graph, name).ok_or_else(|| Error::VertexNotFound {
        vertex: name.to_string(),
    })?;
    Ok(graph.induced_sub_graph(module)?.to_dot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Rejection;
    use crate::maven::MavenEdge;
    use std::collections::HashSet;

    fn module(artifact: &str, kind: Option<&str>, source_files: usize) -> MavenVertex {
        MavenVertex {
            group_id: "g".to_string(),
            artifact_id: artifact.to_string(),
            version: None,
            kind: kind.map(String::from),
            source_files,
        }
    }

    /// app(war) -> service -> core, app-test -> service, tools -> core,
    /// legacy(pom) stands alone.
    fn project() -> ModuleGraph {
        let app = module("app", Some("war"), 10);
        let service = module("service", Some("jar"), 30);
        let core = module("core", Some("jar"), 50);
        let app_test = module("app-test", Some("jar"), 5);
        let tools = module("tools", None, 1);
        let legacy = module("legacy", Some("pom"), 0);

        let edges: HashSet<MavenEdge> = [
            (&app, &service),
            (&service, &core),
            (&app_test, &service),
            (&tools, &core),
        ]
        .into_iter()
        .map(|(p, c)| MavenEdge::new(p.clone(), c.clone()))
        .collect();
        let vertices = [app.clone(), service, core, app_test, tools, legacy]
            .into_iter()
            .collect();
        ModuleGraph::new(vertices, edges, app)
    }

    fn names(modules: &[&MavenVertex]) -> Vec<String> {
        modules.iter().map(|m| m.artifact_id.clone()).collect()
    }

    #[test]
    fn test_find_module() {
        let graph = project();
        assert_eq!(find_module(&graph, "g:core").unwrap().source_files, 50);
        assert!(find_module(&graph, "g:core:jar").is_some());
        assert!(find_module(&graph, "g:missing").is_none());
        assert!(find_module(&graph, "core").is_none());
    }

    #[test]
    fn test_top_level_modules() {
        let graph = project();
        let top = top_level_modules(&graph, &ModuleFilter::default());
        assert_eq!(names(&top), vec!["app", "app-test", "legacy", "tools"]);
    }

    #[test]
    fn test_filters() {
        let graph = project();

        let jars = ModuleFilter {
            kind: Some("jar".to_string()),
            ..ModuleFilter::default()
        };
        // Modules without a declared type pass a type filter.
        assert_eq!(names(&top_level_modules(&graph, &jars)), vec!["app-test", "tools"]);

        let no_pom = ModuleFilter {
            skip_kind: Some("pom".to_string()),
            ..ModuleFilter::default()
        };
        assert_eq!(
            names(&top_level_modules(&graph, &no_pom)),
            vec!["app", "app-test", "tools"]
        );

        let no_tests = ModuleFilter {
            skip_tests: true,
            ..ModuleFilter::default()
        };
        assert_eq!(
            names(&top_level_modules(&graph, &no_tests)),
            vec!["app", "legacy", "tools"]
        );
    }

    #[test]
    fn test_modules_by_source_files() {
        let graph = project();
        let ranked = modules_by_source_files(&graph, &ModuleFilter::default());
        assert_eq!(
            names(&ranked),
            vec!["core", "service", "app", "app-test", "tools", "legacy"]
        );
    }

    #[test]
    fn test_modules_by_dependent_count() {
        let graph = project();
        let ranked = modules_by_dependent_count(&graph, &ModuleFilter::default());
        let pairs: Vec<(usize, &str)> = ranked
            .iter()
            .map(|c| (c.dependents, c.module.artifact_id.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (2, "core"),
                (2, "service"),
                (0, "app"),
                (0, "app-test"),
                (0, "legacy"),
                (0, "tools"),
            ]
        );
    }

    #[test]
    fn test_delete_modules() {
        let graph = project();

        // service and core are still needed by app-test and tools.
        let impact = delete_modules(&graph, &["g:app"]);
        assert_eq!(names(&impact.sorted_deletable()), vec!["app"]);

        // With app-test gone too, service goes; tools still needs core.
        let impact = delete_modules(&graph, &["g:app", "g:app-test"]);
        assert_eq!(
            names(&impact.sorted_deletable()),
            vec!["app", "app-test", "service"]
        );

        let impact = delete_modules(&graph, &["g:app", "g:app-test", "g:tools"]);
        assert_eq!(
            names(&impact.sorted_deletable()),
            vec!["app", "app-test", "core", "service", "tools"]
        );
    }

    #[test]
    fn test_delete_modules_reports_rejections() {
        let graph = project();
        let impact = delete_modules(&graph, &["g:nope", "g:core", "g:legacy"]);

        assert_eq!(
            impact.rejected,
            vec![
                Rejection::NotFound {
                    name: "g:nope".to_string()
                },
                Rejection::HasDependents {
                    name: "g:core:jar".to_string(),
                    dependents: 2
                },
            ]
        );
        assert_eq!(names(&impact.sorted_deletable()), vec!["legacy"]);
    }

    #[test]
    fn test_subgraph_dot() {
        let graph = project();
        let dot = subgraph_dot(&graph, "g:service").unwrap();
        assert!(dot.contains("g:service:jar"));
        assert!(dot.contains("g:core:jar"));
        assert!(!dot.contains("g:app:war"));
        assert_eq!(dot.matches("->").count(), 1);

        assert!(matches!(
            subgraph_dot(&graph, "g:missing"),
            Err(Error::VertexNotFound { .. })
        ));
    }
}
