//! File and directory node types.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Unique identifier for a node within a tree.
///
/// Assigned in depth-first pre-order during the scan, so it doubles as a
/// stable graph identity: one tree node, one graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Create a new NodeId from a u64.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Type of file system node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Regular file (or anything that is not a directory).
    File,
    /// Directory.
    Directory,
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, NodeKind::Directory)
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File)
    }
}

/// A single file or directory in the tree.
///
/// The parent owns its children; there is no back-reference. Children keep
/// the order the filesystem enumeration yielded them in, unsorted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileNode {
    /// Unique identifier for this node.
    pub id: NodeId,

    /// File/directory name (final path segment, not full path).
    pub name: CompactString,

    /// Node type.
    pub kind: NodeKind,

    /// Children nodes (directories only; files have none).
    pub children: Vec<FileNode>,
}

impl FileNode {
    /// Create a new file node.
    pub fn new_file(id: NodeId, name: impl Into<CompactString>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    /// Create a new directory node.
    pub fn new_directory(id: NodeId, name: impl Into<CompactString>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::Directory,
            children: Vec::new(),
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Total number of nodes in this subtree, including self.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(FileNode::subtree_len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(42);
        assert_eq!(id.0, 42);
    }

    #[test]
    fn test_file_node_creation() {
        let node = FileNode::new_file(NodeId::new(1), "test.txt");
        assert!(node.is_file());
        assert!(!node.is_dir());
        assert_eq!(node.child_count(), 0);
    }

    #[test]
    fn test_directory_node_creation() {
        let node = FileNode::new_directory(NodeId::new(1), "test_dir");
        assert!(node.is_dir());
        assert!(!node.is_file());
    }

    #[test]
    fn test_subtree_len() {
        let mut root = FileNode::new_directory(NodeId::new(0), "root");
        let mut dir = FileNode::new_directory(NodeId::new(1), "dir");
        dir.children.push(FileNode::new_file(NodeId::new(2), "f.txt"));
        root.children.push(dir);

        assert_eq!(root.subtree_len(), 3);
    }
}
