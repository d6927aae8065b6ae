//! Error types for graph rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while laying out or writing the graph image.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The Graphviz `dot` executable is not installed or not on PATH.
    #[error("Graphviz 'dot' executable not found on PATH")]
    DotNotFound,

    /// Graphviz exited non-zero (bad format, layout failure, ...).
    #[error("Graphviz failed to render: {stderr}")]
    Layout { stderr: String },

    /// I/O failure writing the DOT source or the output image.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
