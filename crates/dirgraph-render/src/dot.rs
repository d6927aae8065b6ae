//! DOT-format graph sink backed by the Graphviz `dot` executable.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use dirgraph_core::NodeId;

use crate::error::RenderError;
use crate::graph::GraphSink;

/// Escape special characters for DOT labels.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Graph description accumulated as DOT statements.
///
/// Calls may arrive in any order; the source is assembled at render time
/// with graph attributes and node defaults ahead of node and edge
/// statements, so defaults apply to every node. Node ids are `n{id}`, which
/// are always valid DOT identifiers.
pub struct DotGraph {
    graph_attrs: Vec<(String, String)>,
    node_defaults: Vec<(String, String)>,
    nodes: Vec<(NodeId, Vec<(String, String)>)>,
    edges: Vec<(NodeId, NodeId)>,
}

impl DotGraph {
    /// Create an empty directed graph.
    pub fn new() -> Self {
        Self {
            graph_attrs: Vec::new(),
            node_defaults: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Number of nodes added so far.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges added so far.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Assemble the DOT source text.
    pub fn dot_source(&self) -> String {
        let mut output = String::with_capacity(4096);
        output.push_str("digraph dirgraph {\n");

        for (key, value) in &self.graph_attrs {
            let _ = writeln!(output, "  {}=\"{}\";", key, escape_label(value));
        }

        if !self.node_defaults.is_empty() {
            let _ = write!(output, "  node [");
            for (i, (key, value)) in self.node_defaults.iter().enumerate() {
                if i > 0 {
                    output.push_str(", ");
                }
                let _ = write!(output, "{}=\"{}\"", key, escape_label(value));
            }
            output.push_str("];\n");
        }

        output.push('\n');

        for (id, attrs) in &self.nodes {
            let _ = write!(output, "  n{}", id.0);
            if !attrs.is_empty() {
                output.push_str(" [");
                for (i, (key, value)) in attrs.iter().enumerate() {
                    if i > 0 {
                        output.push_str(", ");
                    }
                    let _ = write!(output, "{}=\"{}\"", key, escape_label(value));
                }
                output.push(']');
            }
            output.push_str(";\n");
        }

        output.push('\n');

        for (from, to) in &self.edges {
            let _ = writeln!(output, "  n{} -> n{};", from.0, to.0);
        }

        output.push_str("}\n");
        output
    }
}

impl Default for DotGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphSink for DotGraph {
    fn add_node(&mut self, id: NodeId, attrs: &[(&str, &str)]) {
        let attrs = attrs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.nodes.push((id, attrs));
    }

    fn add_edge(&mut self, from: NodeId, to: NodeId) {
        self.edges.push((from, to));
    }

    fn set_graph_attr(&mut self, key: &str, value: &str) {
        self.graph_attrs.push((key.to_string(), value.to_string()));
    }

    fn set_node_default(&mut self, key: &str, value: &str) {
        self.node_defaults
            .push((key.to_string(), value.to_string()));
    }

    fn render(&self, output: &Path) -> Result<(), RenderError> {
        let format = output_format(output);
        let source = self.dot_source();

        let dir = output.parent().filter(|p| !p.as_os_str().is_empty());

        let mut dot_file = match dir {
            Some(dir) => tempfile::Builder::new()
                .suffix(".dot")
                .tempfile_in(dir)
                .map_err(|e| RenderError::io(output, e))?,
            None => tempfile::Builder::new()
                .suffix(".dot")
                .tempfile()
                .map_err(|e| RenderError::io(output, e))?,
        };
        dot_file
            .write_all(source.as_bytes())
            .map_err(|e| RenderError::io(dot_file.path(), e))?;

        // Render into a sibling temp file and persist only on success, so a
        // failed layout never creates or clobbers the output path.
        let image_file = match dir {
            Some(dir) => tempfile::NamedTempFile::new_in(dir),
            None => tempfile::NamedTempFile::new(),
        }
        .map_err(|e| RenderError::io(output, e))?;

        debug!(format = %format, output = %output.display(), "invoking graphviz");

        let result = Command::new("dot")
            .arg(format!("-T{format}"))
            .arg(dot_file.path())
            .arg("-o")
            .arg(image_file.path())
            .output();

        let command_output = match result {
            Ok(out) => out,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RenderError::DotNotFound);
            }
            Err(e) => return Err(RenderError::io(output, e)),
        };

        if !command_output.status.success() {
            return Err(RenderError::Layout {
                stderr: String::from_utf8_lossy(&command_output.stderr)
                    .trim()
                    .to_string(),
            });
        }

        image_file
            .persist(output)
            .map_err(|e| RenderError::io(output, e.error))?;

        Ok(())
    }
}

/// Infer the Graphviz output format from the output path's extension.
///
/// The extension is not validated; an unsupported format is Graphviz's
/// error to report.
fn output_format(output: &Path) -> String {
    output
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "png".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label("plain"), "plain");
        assert_eq!(escape_label("a\"b"), "a\\\"b");
        assert_eq!(escape_label("a\\b"), "a\\\\b");
        assert_eq!(escape_label("a\nb"), "a\\nb");
    }

    #[test]
    fn test_output_format_inference() {
        assert_eq!(output_format(Path::new("graph.png")), "png");
        assert_eq!(output_format(Path::new("graph.SVG")), "svg");
        assert_eq!(output_format(Path::new("graph")), "png");
    }

    #[test]
    fn test_dot_source_layout() {
        let mut graph = DotGraph::new();
        graph.set_graph_attr("rankdir", "LR");
        graph.add_node(NodeId::new(0), &[("label", "root")]);
        graph.add_node(NodeId::new(1), &[("shape", "note"), ("label", "f.txt")]);
        graph.add_edge(NodeId::new(0), NodeId::new(1));
        // Defaults set after population still precede node statements.
        graph.set_node_default("style", "filled");

        let source = graph.dot_source();

        assert!(source.starts_with("digraph dirgraph {"));
        assert!(source.ends_with("}\n"));
        assert!(source.contains("rankdir=\"LR\";"));
        assert!(source.contains("node [style=\"filled\"];"));
        assert!(source.contains("n0 [label=\"root\"];"));
        assert!(source.contains("n1 [shape=\"note\", label=\"f.txt\"];"));
        assert!(source.contains("n0 -> n1;"));

        let defaults_pos = source.find("node [").unwrap();
        let first_node_pos = source.find("n0 [").unwrap();
        assert!(defaults_pos < first_node_pos);
    }

    #[test]
    fn test_dot_source_escapes_labels() {
        let mut graph = DotGraph::new();
        graph.add_node(NodeId::new(0), &[("label", "we\"ird")]);

        assert!(graph.dot_source().contains("label=\"we\\\"ird\""));
    }
}
