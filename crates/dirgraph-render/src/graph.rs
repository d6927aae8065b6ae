//! The narrow interface to the graph layout engine.

use std::path::Path;

use dirgraph_core::NodeId;

use crate::error::RenderError;

/// A sink for a graph description.
///
/// The tree walk only ever issues these five calls, which keeps the walking
/// logic independent of any rendering library and testable against a
/// recording fake. Attribute ordering inside the final description is the
/// implementation's concern; defaults apply to every node without an
/// explicit override for the same key.
pub trait GraphSink {
    /// Add a node with display attributes. A given id is added at most once
    /// per graph.
    fn add_node(&mut self, id: NodeId, attrs: &[(&str, &str)]);

    /// Add a directed edge between two previously added nodes.
    fn add_edge(&mut self, from: NodeId, to: NodeId);

    /// Set a graph-level attribute (label, rankdir, ranksep, ...).
    fn set_graph_attr(&mut self, key: &str, value: &str);

    /// Set a default attribute applied to all nodes.
    fn set_node_default(&mut self, key: &str, value: &str);

    /// Lay out the graph and write an image to `output`.
    fn render(&self, output: &Path) -> Result<(), RenderError>;
}
