//! Error types for maven-modules.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or querying a module graph.
#[derive(Debug, Error)]
pub enum Error {
    /// An operation was invoked on a vertex that is not part of the graph.
    #[error("vertex '{vertex}' does not exist in the graph")]
    VertexNotFound { vertex: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed descriptor {path}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },

    /// A descriptor lacks a coordinate element that cannot be inherited.
    #[error("descriptor {path} has no <{element}>")]
    MissingElement { path: PathBuf, element: &'static str },

    #[error("no modules found under {path}")]
    NoModules { path: PathBuf },

    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
