//! Tree-to-graph population.

use derive_builder::Builder;

use dirgraph_core::{FileNode, FileTree};

use crate::graph::GraphSink;

/// Default node fill color.
pub const DEFAULT_COLOR: &str = "#03A9F4";

/// Presentation options for the emitted graph.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct RenderConfig {
    /// Fill color for nodes.
    #[builder(default = "DEFAULT_COLOR.to_string()")]
    pub color: String,

    /// Graph title. Empty means no title attribute is set.
    #[builder(default)]
    pub title: String,

    /// Include files as note-shaped leaf nodes.
    #[builder(default = "false")]
    pub include_files: bool,

    /// Inter-rank separation in the layout.
    #[builder(default = "1.0")]
    pub separation: f64,
}

impl RenderConfig {
    /// Create a new config builder.
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            title: String::new(),
            include_files: false,
            separation: 1.0,
        }
    }
}

/// Walks a [`FileTree`] and describes it to a [`GraphSink`].
///
/// Every directory becomes a node with an edge from its parent. Files become
/// note-shaped leaf nodes when `include_files` is set and are invisible
/// otherwise — neither node nor edge. Edges always point parent → child;
/// hierarchy direction comes from the rank direction, not edge reversal.
pub struct GraphEmitter {
    config: RenderConfig,
}

impl GraphEmitter {
    /// Create an emitter with default presentation options.
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    /// Create an emitter with the given options.
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Get the active configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Describe the whole tree: layout attributes, root node, recursive
    /// population, then final styling.
    pub fn emit(&self, tree: &FileTree, sink: &mut impl GraphSink) {
        self.setup(sink);
        sink.add_node(tree.root.id, &[("label", tree.root.name.as_str())]);
        self.populate(&tree.root, sink);
        self.finalize(sink);
    }

    /// Apply graph-level layout attributes and the directory node default.
    fn setup(&self, sink: &mut impl GraphSink) {
        sink.set_graph_attr("rankdir", "LR");
        sink.set_graph_attr("ranksep", &self.config.separation.to_string());
        sink.set_node_default("shape", "folder");
    }

    /// Recursively emit nodes and edges for the children of `node`.
    ///
    /// Each tree node is visited exactly once, so every node id is added at
    /// most once and every emitted node has exactly one incoming edge.
    pub fn populate(&self, node: &FileNode, sink: &mut impl GraphSink) {
        for child in &node.children {
            if child.is_file() {
                if self.config.include_files {
                    sink.add_node(child.id, &[("shape", "note"), ("label", child.name.as_str())]);
                    sink.add_edge(node.id, child.id);
                }
            } else {
                sink.add_node(child.id, &[("label", child.name.as_str())]);
                sink.add_edge(node.id, child.id);
                self.populate(child, sink);
            }
        }
    }

    /// Apply the title and global fill styling.
    pub fn finalize(&self, sink: &mut impl GraphSink) {
        if !self.config.title.is_empty() {
            sink.set_graph_attr("label", &self.config.title);
        }
        sink.set_node_default("style", "filled");
        sink.set_node_default("fillcolor", &self.config.color);
    }
}

impl Default for GraphEmitter {
    fn default() -> Self {
        Self::new()
    }
}
