//! Module discovery.
//!
//! A module is a directory holding a build descriptor. Discovery descends
//! only into subdirectories that are modules themselves, and lists deeper
//! modules before shallower ones, so the top-level descriptor comes last.

use ignore::{DirEntry, WalkBuilder};
use std::cmp::Reverse;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::ToolConfig;
use crate::error::{Error, Result};

/// Descriptor paths of every module under `root`, children before parents.
///
/// Modules at the same depth are listed in walk order, siblings sorted by
/// file name.
pub fn descriptor_paths(root: &Path, config: &ToolConfig) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let descriptor = config.descriptor.clone();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| is_module(entry, &descriptor))
        .build();

    let mut modules: Vec<(usize, PathBuf)> = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        let path = entry.path().join(&config.descriptor);
        if path.is_file() {
            modules.push((entry.depth(), path));
        }
    }

    // Stable, so walk order survives within a depth.
    modules.sort_by_key(|(depth, _)| Reverse(*depth));
    Ok(modules.into_iter().map(|(_, path)| path).collect())
}

fn is_module(entry: &DirEntry, descriptor: &str) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_dir()) && entry.path().join(descriptor).is_file()
}

fn walk_error(root: &Path, err: ignore::Error) -> Error {
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, message));
    Error::io(root, source)
}

/// Count regular files below the module's source directory. A module
/// without one has no source files.
pub fn count_source_files(module_dir: &Path, config: &ToolConfig) -> usize {
    let source_dir = module_dir.join(&config.source_dir);
    if !source_dir.is_dir() {
        return 0;
    }
    WalkBuilder::new(&source_dir)
        .standard_filters(false)
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_children_before_parent() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("pom.xml"));
        touch(&root.join("b/pom.xml"));
        touch(&root.join("a/pom.xml"));
        touch(&root.join("a/nested/pom.xml"));
        // Not a module: no descriptor, so nothing below it is visited.
        touch(&root.join("docs/deep/pom.xml"));

        let paths = descriptor_paths(root, &ToolConfig::default()).unwrap();
        let relative: Vec<PathBuf> = paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from("a/nested/pom.xml"),
                PathBuf::from("a/pom.xml"),
                PathBuf::from("b/pom.xml"),
                PathBuf::from("pom.xml"),
            ]
        );
    }

    #[test]
    fn test_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let paths = descriptor_paths(&dir.path().join("nope"), &ToolConfig::default()).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn test_custom_descriptor_name() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("module.xml"));
        touch(&dir.path().join("sub/module.xml"));
        touch(&dir.path().join("other/pom.xml"));

        let config = ToolConfig {
            descriptor: "module.xml".to_string(),
            ..ToolConfig::default()
        };
        let paths = descriptor_paths(dir.path(), &config).unwrap();
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_deeper_modules_come_first() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("pom.xml"));
        touch(&root.join("a/pom.xml"));
        touch(&root.join("b/pom.xml"));
        touch(&root.join("b/inner/pom.xml"));
        touch(&root.join("b/inner/leaf/pom.xml"));
        // Hidden and ignored directories are not skipped.
        touch(&root.join(".hidden/pom.xml"));
        fs::write(root.join(".gitignore"), "a/\n").unwrap();

        let paths = descriptor_paths(root, &ToolConfig::default()).unwrap();
        let relative: Vec<PathBuf> = paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from("b/inner/leaf/pom.xml"),
                PathBuf::from("b/inner/pom.xml"),
                PathBuf::from(".hidden/pom.xml"),
                PathBuf::from("a/pom.xml"),
                PathBuf::from("b/pom.xml"),
                PathBuf::from("pom.xml"),
            ]
        );
    }

    #[test]
    fn test_count_source_files() {
        let dir = tempfile::tempdir().unwrap();
        let module = dir.path();
        touch(&module.join("src/main/java/org/example/App.java"));
        touch(&module.join("src/main/java/org/example/Util.java"));
        touch(&module.join("src/main/resources/.hidden"));
        touch(&module.join("src/test/java/AppTest.java"));

        assert_eq!(count_source_files(module, &ToolConfig::default()), 3);
    }

    #[test]
    fn test_count_without_sources() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(count_source_files(dir.path(), &ToolConfig::default()), 0);
    }
}
