//! Core types for dirgraph.
//!
//! This crate provides the fundamental data structures shared by the
//! scanner and the renderer: file nodes, trees, and configuration.

mod config;
mod error;
mod node;
mod tree;

pub use config::{ScanConfig, ScanConfigBuilder};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use node::{FileNode, NodeId, NodeKind};
pub use tree::{FileTree, TreeStats};
