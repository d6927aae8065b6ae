//! Graph emission and rendering for dirgraph.
//!
//! This crate turns a scanned [`FileTree`](dirgraph_core::FileTree) into a
//! graph description and hands it to the external layout engine:
//!
//! - [`graph`]: the narrow [`GraphSink`] interface to the layout engine
//! - [`emit`]: the tree walk populating a sink, plus presentation options
//! - [`dot`]: the Graphviz-backed sink (DOT source + `dot` invocation)
//!
//! # Example
//!
//! ```rust,no_run
//! use dirgraph_render::{DotGraph, GraphEmitter, GraphSink, RenderConfig};
//! use dirgraph_scan::{ScanConfig, Scanner};
//!
//! let tree = Scanner::new().scan(&ScanConfig::new("/some/dir")).unwrap();
//!
//! let emitter = GraphEmitter::with_config(RenderConfig::default());
//! let mut graph = DotGraph::new();
//! emitter.emit(&tree, &mut graph);
//! graph.render(std::path::Path::new("graph.png")).unwrap();
//! ```

mod dot;
mod emit;
mod error;
mod graph;

pub use dot::{DotGraph, escape_label};
pub use emit::{DEFAULT_COLOR, GraphEmitter, RenderConfig, RenderConfigBuilder};
pub use error::RenderError;
pub use graph::GraphSink;

// Re-export core types for convenience
pub use dirgraph_core::{FileNode, FileTree, NodeId, NodeKind};
