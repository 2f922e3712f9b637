//! Maven module model.
//!
//! A [`MavenVertex`] is identified by `groupId:artifactId` alone. The same
//! module is seen both as a dependency reference and through its own
//! descriptor, with different attributes; both must be the same vertex.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::graph::{Edge, Graph};

/// The module dependency graph.
pub type ModuleGraph = Graph<MavenVertex, MavenEdge>;

/// A coordinate read from a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MavenCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub scope: Option<String>,
    /// Declared `type` (dependencies) or `packaging` (projects).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Regular files under the declaring module's source directory.
    pub source_files: usize,
}

/// A parsed descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenPom {
    /// The `<parent>` coordinate, if declared.
    pub parent: Option<MavenCoordinate>,
    /// The project's own coordinate.
    pub coordinate: MavenCoordinate,
    /// Direct `<dependencies>` entries.
    pub dependencies: Vec<MavenCoordinate>,
}

/// A module in the dependency graph.
#[derive(Debug, Clone, Serialize)]
pub struct MavenVertex {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub source_files: usize,
}

impl MavenVertex {
    /// A vertex carrying only the identifying key, for lookups.
    pub fn key_only(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
            kind: None,
            source_files: 0,
        }
    }

    /// `groupId:artifactId`
    pub fn key(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    fn key_parts(&self) -> (&str, &str) {
        (&self.group_id, &self.artifact_id)
    }
}

impl From<&MavenCoordinate> for MavenVertex {
    fn from(c: &MavenCoordinate) -> Self {
        Self {
            group_id: c.group_id.clone(),
            artifact_id: c.artifact_id.clone(),
            version: c.version.clone(),
            kind: c.kind.clone(),
            source_files: c.source_files,
        }
    }
}

impl PartialEq for MavenVertex {
    fn eq(&self, other: &Self) -> bool {
        self.key_parts() == other.key_parts()
    }
}

impl Eq for MavenVertex {}

impl Hash for MavenVertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key_parts().hash(state);
    }
}

impl PartialOrd for MavenVertex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MavenVertex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key_parts().cmp(&other.key_parts())
    }
}

impl fmt::Display for MavenVertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.group_id,
            self.artifact_id,
            self.kind.as_deref().unwrap_or("null")
        )
    }
}

/// `parent` depends on `child`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MavenEdge {
    pub parent: MavenVertex,
    pub child: MavenVertex,
}

impl MavenEdge {
    pub fn new(parent: MavenVertex, child: MavenVertex) -> Self {
        Self { parent, child }
    }
}

impl Edge for MavenEdge {
    type Vertex = MavenVertex;

    fn parent(&self) -> &MavenVertex {
        &self.parent
    }

    fn child(&self) -> &MavenVertex {
        &self.child
    }
}

impl fmt::Display for MavenEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.parent, self.child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn vertex(kind: Option<&str>, version: Option<&str>, source_files: usize) -> MavenVertex {
        MavenVertex {
            group_id: "org.example".to_string(),
            artifact_id: "core".to_string(),
            version: version.map(String::from),
            kind: kind.map(String::from),
            source_files,
        }
    }

    #[test]
    fn test_equality_by_key_only() {
        let as_dependency = vertex(None, Some("${project.version}"), 0);
        let as_module = vertex(Some("jar"), Some("1.0"), 42);

        assert_eq!(as_dependency, as_module);
        assert_eq!(hash_of(&as_dependency), hash_of(&as_module));

        let set: HashSet<MavenVertex> = [as_dependency, as_module].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_different_keys_differ() {
        let a = MavenVertex::key_only("org.example", "core");
        let b = MavenVertex::key_only("org.example", "api");
        let c = MavenVertex::key_only("org.other", "core");
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert!(b < a);
        assert!(a < c);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            vertex(Some("war"), None, 0).to_string(),
            "org.example:core:war"
        );
        assert_eq!(vertex(None, None, 0).to_string(), "org.example:core:null");
        assert_eq!(vertex(None, None, 0).key(), "org.example:core");
    }

    #[test]
    fn test_edges_collapse_by_endpoint_keys() {
        let parent = MavenVertex::key_only("g", "app");
        let e1 = MavenEdge::new(parent.clone(), vertex(None, None, 0));
        let e2 = MavenEdge::new(parent, vertex(Some("jar"), Some("2"), 7));
        let set: HashSet<MavenEdge> = [e1, e2].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_vertex_from_coordinate() {
        let c = MavenCoordinate {
            group_id: "g".to_string(),
            artifact_id: "a".to_string(),
            version: Some("1".to_string()),
            scope: Some("test".to_string()),
            kind: Some("pom".to_string()),
            source_files: 3,
        };
        let v = MavenVertex::from(&c);
        assert_eq!(v.kind.as_deref(), Some("pom"));
        assert_eq!(v.source_files, 3);
        assert_eq!(v.to_string(), "g:a:pom");
    }
}
