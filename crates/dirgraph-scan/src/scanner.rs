//! Recursive directory scanner.

use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, warn};

use dirgraph_core::{
    FileNode, FileTree, NodeId, ScanConfig, ScanError, ScanWarning, TreeStats,
};

/// Single-threaded scanner building a [`FileTree`] with `std::fs::read_dir`.
///
/// The walk is depth-first pre-order: a directory's node is created, then
/// its subtree is fully materialized before the next sibling is visited.
/// Children keep the order the OS yields them in.
pub struct Scanner;

impl Scanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// Perform a scan of the configured root.
    ///
    /// Failure to resolve or enumerate the root itself is fatal; anything
    /// below it is skipped with a [`ScanWarning`] recorded on the tree.
    pub fn scan(&self, config: &ScanConfig) -> Result<FileTree, ScanError> {
        let start = Instant::now();
        let root_path = config
            .root
            .canonicalize()
            .map_err(|e| ScanError::io(&config.root, e))?;

        let root_metadata =
            fs::metadata(&root_path).map_err(|e| ScanError::io(&root_path, e))?;
        if !root_metadata.is_dir() {
            return Err(ScanError::NotADirectory { path: root_path });
        }

        let root_name = root_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root_path.to_string_lossy().to_string());

        let mut ctx = ScanContext {
            config,
            next_id: 0,
            stats: TreeStats::new(),
            warnings: Vec::new(),
        };

        let mut root = FileNode::new_directory(ctx.next_id(), root_name);
        ctx.stats.record_dir(0);

        let entries = fs::read_dir(&root_path).map_err(|e| ScanError::io(&root_path, e))?;
        self.populate_children(&mut root, &root_path, entries, 1, &mut ctx);

        debug!(
            files = ctx.stats.total_files,
            dirs = ctx.stats.total_dirs,
            "scan complete"
        );

        Ok(FileTree::new(
            root,
            root_path,
            config.clone(),
            ctx.stats,
            start.elapsed(),
            ctx.warnings,
        ))
    }

    /// Materialize the children of `node` from an open directory handle,
    /// recursing into subdirectories.
    fn populate_children(
        &self,
        node: &mut FileNode,
        dir_path: &Path,
        entries: fs::ReadDir,
        depth: u32,
        ctx: &mut ScanContext<'_>,
    ) {
        for entry_result in entries {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    warn!(path = %dir_path.display(), error = %err, "failed to read entry");
                    ctx.warnings.push(ScanWarning::read_error(dir_path, &err));
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().to_string();
            if ctx.config.should_skip_hidden(&name) || ctx.config.should_ignore(&name) {
                continue;
            }

            let path = entry.path();

            // Classification follows symlinks: a link to a directory is
            // traversed as a regular directory, a broken link is a file.
            let is_dir = match fs::metadata(&path) {
                Ok(m) => m.is_dir(),
                Err(err) => {
                    if err.kind() != std::io::ErrorKind::NotFound {
                        ctx.warnings.push(ScanWarning::metadata_error(&path, &err));
                    }
                    false
                }
            };

            if is_dir {
                ctx.stats.record_dir(depth);
                let mut child = FileNode::new_directory(ctx.next_id(), name);

                let at_limit = ctx.config.max_depth.is_some_and(|d| depth >= d);
                if !at_limit {
                    match fs::read_dir(&path) {
                        Ok(child_entries) => {
                            self.populate_children(&mut child, &path, child_entries, depth + 1, ctx);
                        }
                        Err(err) => {
                            warn!(
                                path = %path.display(),
                                error = %err,
                                "skipping unreadable directory"
                            );
                            let warning = if err.kind() == std::io::ErrorKind::PermissionDenied {
                                ScanWarning::permission_denied(&path)
                            } else {
                                ScanWarning::read_error(&path, &err)
                            };
                            ctx.warnings.push(warning);
                        }
                    }
                }

                node.children.push(child);
            } else {
                ctx.stats.record_file(depth);
                node.children.push(FileNode::new_file(ctx.next_id(), name));
            }
        }
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-scan mutable state threaded through the recursion.
struct ScanContext<'a> {
    config: &'a ScanConfig,
    next_id: u64,
    stats: TreeStats,
    warnings: Vec<ScanWarning>,
}

impl ScanContext<'_> {
    fn next_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        NodeId::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("dir1")).unwrap();
        fs::create_dir(root.join("dir2")).unwrap();
        fs::create_dir(root.join("dir1/subdir")).unwrap();

        fs::write(root.join("file1.txt"), "hello").unwrap();
        fs::write(root.join("dir1/file2.txt"), "world").unwrap();
        fs::write(root.join("dir1/subdir/file3.txt"), "test").unwrap();
        fs::write(root.join("dir2/file4.txt"), "another").unwrap();

        temp
    }

    fn find_child<'a>(node: &'a FileNode, name: &str) -> Option<&'a FileNode> {
        node.children.iter().find(|c| c.name.as_str() == name)
    }

    #[test]
    fn test_basic_scan() {
        let temp = create_test_tree();
        let config = ScanConfig::new(temp.path());

        let tree = Scanner::new().scan(&config).unwrap();

        assert_eq!(tree.stats.total_files, 4);
        // root + dir1 + dir2 + subdir
        assert_eq!(tree.stats.total_dirs, 4);
        assert_eq!(tree.stats.max_depth, 3);
        assert_eq!(tree.root.child_count(), 3);
    }

    #[test]
    fn test_structure_mirrors_filesystem() {
        let temp = create_test_tree();
        let config = ScanConfig::new(temp.path());

        let tree = Scanner::new().scan(&config).unwrap();

        let dir1 = find_child(&tree.root, "dir1").unwrap();
        assert!(dir1.is_dir());
        assert_eq!(dir1.child_count(), 2);

        let subdir = find_child(dir1, "subdir").unwrap();
        assert!(subdir.is_dir());
        assert!(find_child(subdir, "file3.txt").unwrap().is_file());

        let file1 = find_child(&tree.root, "file1.txt").unwrap();
        assert!(file1.is_file());
        assert_eq!(file1.child_count(), 0);
    }

    #[test]
    fn test_node_ids_unique() {
        let temp = create_test_tree();
        let config = ScanConfig::new(temp.path());

        let tree = Scanner::new().scan(&config).unwrap();

        let mut ids = Vec::new();
        collect_ids(&tree.root, &mut ids);
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(total, tree.root.subtree_len());
    }

    fn collect_ids(node: &FileNode, ids: &mut Vec<u64>) {
        ids.push(node.id.0);
        for child in &node.children {
            collect_ids(child, ids);
        }
    }

    #[test]
    fn test_rescan_is_structurally_identical() {
        let temp = create_test_tree();
        let config = ScanConfig::new(temp.path());
        let scanner = Scanner::new();

        let first = scanner.scan(&config).unwrap();
        let second = scanner.scan(&config).unwrap();

        assert!(same_shape(&first.root, &second.root));
    }

    // Structural equality modulo child order, which may legitimately differ
    // between enumerations.
    fn same_shape(a: &FileNode, b: &FileNode) -> bool {
        if a.name != b.name || a.kind != b.kind || a.child_count() != b.child_count() {
            return false;
        }
        a.children.iter().all(|ca| {
            b.children
                .iter()
                .any(|cb| cb.name == ca.name && same_shape(ca, cb))
        })
    }

    #[test]
    fn test_ignore_patterns() {
        let temp = create_test_tree();
        let config = ScanConfig::builder()
            .root(temp.path())
            .ignore_patterns(vec!["dir2".to_string()])
            .build()
            .unwrap();

        let tree = Scanner::new().scan(&config).unwrap();

        assert!(find_child(&tree.root, "dir2").is_none());
        assert!(find_child(&tree.root, "dir1").is_some());
    }

    #[test]
    fn test_skip_hidden() {
        let temp = create_test_tree();
        fs::create_dir(temp.path().join(".git")).unwrap();
        fs::write(temp.path().join(".hidden"), "x").unwrap();

        let config = ScanConfig::builder()
            .root(temp.path())
            .include_hidden(false)
            .build()
            .unwrap();

        let tree = Scanner::new().scan(&config).unwrap();

        assert!(find_child(&tree.root, ".git").is_none());
        assert!(find_child(&tree.root, ".hidden").is_none());

        // Included by default.
        let config = ScanConfig::new(temp.path());
        let tree = Scanner::new().scan(&config).unwrap();
        assert!(find_child(&tree.root, ".git").is_some());
    }

    #[test]
    fn test_max_depth_truncates() {
        let temp = create_test_tree();
        let config = ScanConfig::builder()
            .root(temp.path())
            .max_depth(Some(1u32))
            .build()
            .unwrap();

        let tree = Scanner::new().scan(&config).unwrap();

        // dir1 is present as a leaf: enumerated, not descended into.
        let dir1 = find_child(&tree.root, "dir1").unwrap();
        assert!(dir1.is_dir());
        assert_eq!(dir1.child_count(), 0);
    }

    #[test]
    fn test_empty_root() {
        let temp = TempDir::new().unwrap();
        let config = ScanConfig::new(temp.path());

        let tree = Scanner::new().scan(&config).unwrap();

        assert_eq!(tree.root.child_count(), 0);
        assert_eq!(tree.stats.total_dirs, 1);
        assert_eq!(tree.stats.total_files, 0);
    }

    #[test]
    fn test_nonexistent_root_fails() {
        let config = ScanConfig::new("/definitely/not/a/real/path");
        let err = Scanner::new().scan(&config).unwrap_err();
        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[test]
    fn test_file_root_fails() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        fs::write(&file, "not a directory").unwrap();

        let config = ScanConfig::new(&file);
        let err = Scanner::new().scan(&config).unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_skipped_with_warning() {
        use std::os::unix::fs::PermissionsExt;

        let temp = create_test_tree();
        let locked = temp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("secret.txt"), "x").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permissions are not enforced for root; nothing to observe then.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let config = ScanConfig::new(temp.path());
        let tree = Scanner::new().scan(&config).unwrap();

        // Restore so TempDir can clean up.
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let node = find_child(&tree.root, "locked").unwrap();
        assert!(node.is_dir());
        assert_eq!(node.child_count(), 0);
        assert!(tree.has_warnings());
        // Siblings are unaffected.
        assert!(find_child(&tree.root, "dir1").is_some());
        assert!(find_child(&tree.root, "dir2").is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_traversed() {
        let temp = create_test_tree();
        std::os::unix::fs::symlink(temp.path().join("dir2"), temp.path().join("link")).unwrap();

        let config = ScanConfig::new(temp.path());
        let tree = Scanner::new().scan(&config).unwrap();

        let link = find_child(&tree.root, "link").unwrap();
        assert!(link.is_dir());
        assert!(find_child(link, "file4.txt").is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_is_a_file() {
        let temp = create_test_tree();
        std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("dangling"))
            .unwrap();

        let config = ScanConfig::new(temp.path());
        let tree = Scanner::new().scan(&config).unwrap();

        let dangling = find_child(&tree.root, "dangling").unwrap();
        assert!(dangling.is_file());
    }
}
