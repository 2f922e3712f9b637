//! maven-modules CLI - dependency analysis for multi-module Maven repositories.
//!
//! Usage:
//!   maven-modules top-level-modules          # Modules nothing depends on
//!   maven-modules module-source-files        # Modules by source file count
//!   maven-modules module-dependency-count    # Modules by dependent count
//!   maven-modules delete-modules <g:a>...    # What else goes with these modules
//!   maven-modules subgraph-dot <g:a> <out>   # Image of a module's closure

use anyhow::{bail, Context, Result};
use clap::Parser;
use maven_modules::cli::{graphviz_command, Cli, Commands};
use maven_modules::config::ToolConfig;
use maven_modules::{
    delete_modules, maven_graph, modules_by_dependent_count, modules_by_source_files,
    subgraph_dot, top_level_modules, MavenVertex, Rejection,
};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries results only.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[derive(Serialize)]
struct DeletionReport<'a> {
    deletable: Vec<&'a MavenVertex>,
    rejected: &'a [Rejection],
}

fn run(cli: Cli) -> Result<()> {
    let root = cli.directory.canonicalize().unwrap_or(cli.directory);
    let config = ToolConfig::resolve(cli.config.as_deref(), &root)?;

    let graph = maven_graph(&root, &config)
        .with_context(|| format!("could not build module graph for {}", root.display()))?;

    match cli.command {
        Commands::TopLevelModules { filter } => {
            let filter = filter.into_filter(&config.test_marker);
            print_modules(&top_level_modules(&graph, &filter), cli.json)?;
        }

        Commands::ModuleSourceFiles { filter } => {
            let filter = filter.into_filter(&config.test_marker);
            print_modules(&modules_by_source_files(&graph, &filter), cli.json)?;
        }

        Commands::ModuleDependencyCount { filter } => {
            let filter = filter.into_filter(&config.test_marker);
            let counts = modules_by_dependent_count(&graph, &filter);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&counts)?);
            } else {
                for count in &counts {
                    println!("{} - {}", count.dependents, count.module);
                }
            }
        }

        Commands::DeleteModules { modules } => {
            let impact = delete_modules(&graph, &modules);
            for rejection in &impact.rejected {
                eprintln!("{}", rejection);
            }
            let deletable = impact.sorted_deletable();
            if cli.json {
                let report = DeletionReport {
                    deletable,
                    rejected: &impact.rejected,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for module in deletable {
                    println!("{}", module);
                }
            }
        }

        Commands::SubgraphDot {
            module,
            output_file,
            image_type,
            dot_file,
        } => {
            let dot = subgraph_dot(&graph, &module)?;
            fs::write(&dot_file, &dot)
                .with_context(|| format!("could not write {}", dot_file.display()))?;
            render_image(&image_type, &dot_file, &output_file)?;
        }
    }

    Ok(())
}

fn print_modules(modules: &[&MavenVertex], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(modules)?);
    } else {
        for module in modules {
            println!("{}", module);
        }
    }
    Ok(())
}

fn render_image(image_type: &str, dot_file: &Path, output_file: &Path) -> Result<()> {
    let output = graphviz_command(image_type, dot_file, output_file)
        .output()
        .context("could not run Graphviz `dot`")?;
    if !output.status.success() {
        bail!(
            "failed to generate {} from {} ({}):\n{}",
            output_file.display(),
            dot_file.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim_end()
        );
    }
    eprintln!("Wrote {}", output_file.display());
    Ok(())
}
