//! File system scanning for dirgraph.
//!
//! This crate is responsible for traversing a directory and building the
//! file tree structure. The walk is deliberately simple:
//!
//! - **Single-threaded** recursive `read_dir` traversal
//! - **Depth-first pre-order** materialization
//! - **Enumeration order** preserved — children are never sorted
//! - **Skip-and-warn** on unreadable subdirectories
//!
//! # Example
//!
//! ```rust,no_run
//! use dirgraph_scan::{Scanner, ScanConfig};
//!
//! let config = ScanConfig::new("/path/to/scan");
//! let tree = Scanner::new().scan(&config).unwrap();
//!
//! println!("{} files, {} directories", tree.total_files(), tree.total_dirs());
//! ```

mod scanner;

pub use scanner::Scanner;

// Re-export core types for convenience
pub use dirgraph_core::{
    FileNode, FileTree, NodeId, NodeKind, ScanConfig, ScanError, ScanWarning, TreeStats,
    WarningKind,
};
