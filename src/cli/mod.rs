//! CLI module for maven-modules.
//!
//! Commands:
//! - Listing: top-level-modules, module-source-files, module-dependency-count
//! - Analysis: delete-modules, subgraph-dot

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::query::ModuleFilter;

#[derive(Parser)]
#[command(name = "maven-modules")]
#[command(about = "Dependency analysis for multi-module Maven repositories", long_about = None)]
pub struct Cli {
    /// Maven project directory (default: current directory)
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,

    /// Config file (default: <directory>/.maven-modules.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write debug output to stderr
    #[arg(short, long, global = true, overrides_with = "quiet")]
    pub verbose: bool,

    /// Turn debug output off again
    #[arg(short, long, global = true, overrides_with = "verbose")]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List modules no other module in the repository depends on
    TopLevelModules {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List modules sorted by number of source files
    ModuleSourceFiles {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List modules sorted by the number of modules depending on them
    ModuleDependencyCount {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show which modules can be removed when deleting MODULES
    DeleteModules {
        /// Top-level modules to delete (groupId:artifactId)
        #[arg(required = true)]
        modules: Vec<String>,
    },

    /// Render the graph of everything MODULE depends on as OUTPUT_FILE
    SubgraphDot {
        /// Module to investigate (groupId:artifactId)
        module: String,

        /// Target file for the image
        output_file: PathBuf,

        /// Image type passed to Graphviz
        #[arg(short = 't', long, default_value = "png")]
        image_type: String,

        /// File name for the intermediate dot file
        #[arg(short = 'f', long, default_value = "subgraph.dot")]
        dot_file: PathBuf,
    },
}

/// The Graphviz invocation rendering `dot_file` into `output_file`.
pub fn graphviz_command(image_type: &str, dot_file: &Path, output_file: &Path) -> Command {
    let mut command = Command::new("dot");
    command
        .arg(format!("-T{}", image_type))
        .arg(dot_file)
        .arg("-o")
        .arg(output_file);
    command
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Module type to list (e.g. jar, war, pom)
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Module type to skip (e.g. jar, war, pom)
    #[arg(long = "skip-type")]
    pub skip_kind: Option<String>,

    /// Skip test modules (artifact ids containing the test marker)
    #[arg(long)]
    pub skip_tests: bool,
}

impl FilterArgs {
    pub fn into_filter(self, test_marker: &str) -> ModuleFilter {
        ModuleFilter {
            kind: self.kind,
            skip_kind: self.skip_kind,
            skip_tests: self.skip_tests,
            test_marker: test_marker.to_string(),
        }
    }
}
