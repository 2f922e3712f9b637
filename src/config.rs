//! Tool configuration, read from `.maven-modules.toml` in the project root.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Config file name looked up in the project directory.
pub const CONFIG_FILE: &str = ".maven-modules.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Build descriptor file name.
    pub descriptor: String,
    /// Directory, relative to a module, whose files are counted as sources.
    pub source_dir: String,
    /// Artifact-id substring marking test modules.
    pub test_marker: String,
    /// Packaging assumed when a descriptor declares none.
    pub default_packaging: String,
    /// Treat a module's `<parent>` as a dependency edge.
    pub parent_edges: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            descriptor: "pom.xml".to_string(),
            source_dir: "src/main".to_string(),
            test_marker: "-test".to_string(),
            default_packaging: "jar".to_string(),
            parent_edges: false,
        }
    }
}

impl ToolConfig {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&text).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load the config at `path`, falling back to defaults when the file is
    /// missing or invalid.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "ignoring config file");
                Self::default()
            }
        }
    }

    /// Config for a run: an explicitly named file must load, otherwise the
    /// project's own [`CONFIG_FILE`] is used if present.
    pub fn resolve(explicit: Option<&Path>, project_dir: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => Ok(Self::load(&project_dir.join(CONFIG_FILE))),
        }
    }
}
