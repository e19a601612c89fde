//! Structure scanner: Root (A) -> Branches (B) -> Leaves (C), two levels deep.

use std::path::Path;
use tracing::{debug, warn};

use crate::fs_ops::FileSystem;

use super::model::Structure;

/// True when the base name starts with the hidden marker ('.').
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// Directories directly under `dir` that pass the hidden filter.
fn child_dirs(fs: &dyn FileSystem, dir: &Path, include_hidden: bool) -> std::io::Result<Vec<std::path::PathBuf>> {
    Ok(fs
        .list_dir(dir)?
        .into_iter()
        .filter(|p| fs.is_dir(p))
        .filter(|p| include_hidden || !is_hidden(p))
        .collect())
}

/// Map every Branch under `root` to its Leaves.
///
/// Never fails: a root that is not a directory yields an empty map, and a Branch whose
/// listing fails is kept with no Leaves.
pub fn scan_structure(fs: &dyn FileSystem, root: &Path, include_hidden: bool) -> Structure {
    let mut result = Structure::new();
    if !fs.is_dir(root) {
        debug!(root = %root.display(), "scan: root is not a directory");
        return result;
    }

    let branches = match child_dirs(fs, root, include_hidden) {
        Ok(b) => b,
        Err(e) => {
            warn!(root = %root.display(), error = %e, "scan: cannot list root");
            return result;
        }
    };

    for branch in branches {
        let leaves = child_dirs(fs, &branch, include_hidden).unwrap_or_else(|e| {
            warn!(branch = %branch.display(), error = %e, "scan: cannot list branch");
            Vec::new()
        });
        result.insert(branch, leaves);
    }

    debug!(root = %root.display(), branches = result.len(), "scan complete");
    result
}
