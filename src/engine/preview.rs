//! Preview builder: expand chosen Leaves into one Operation per direct child.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::fs_ops::FileSystem;

use super::model::{ConflictMode, Operation, Status};
use super::resolve::resolve_conflict;

/// Filesystem view that also treats destinations planned earlier in the same preview as taken,
/// so two Leaves promoting the same name into one Branch do not both get "OK".
struct PlannedView<'a> {
    fs: &'a dyn FileSystem,
    claimed: HashSet<PathBuf>,
}

impl FileSystem for PlannedView<'_> {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        self.fs.list_dir(dir)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.fs.is_dir(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.claimed.contains(path) || self.fs.exists(path)
    }

    fn remove_all(&self, path: &Path) -> io::Result<()> {
        self.fs.remove_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.fs.rename(from, to)
    }
}

/// Build the ordered operation list for `leaves` under `mode`.
///
/// Duplicate Leaves collapse to their first occurrence; Leaves that are not directories, or
/// whose listing fails, contribute nothing. Order follows the input, then the listing order.
pub fn build_preview<P: AsRef<Path>>(fs: &dyn FileSystem, leaves: &[P], mode: ConflictMode) -> Vec<Operation> {
    let mut seen: HashSet<&Path> = HashSet::new();
    let unique: Vec<&Path> = leaves
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| seen.insert(*p))
        .collect();

    let mut view = PlannedView {
        fs,
        claimed: HashSet::new(),
    };
    let mut ops = Vec::new();

    for leaf in &unique {
        if !fs.is_dir(leaf) {
            debug!(leaf = %leaf.display(), "preview: not a directory, skipped");
            continue;
        }
        let Some(branch) = leaf.parent() else {
            continue;
        };
        let items = match fs.list_dir(leaf) {
            Ok(items) => items,
            Err(e) => {
                warn!(leaf = %leaf.display(), error = %e, "preview: cannot list leaf");
                continue;
            }
        };

        for item in items {
            let Some(name) = item.file_name() else {
                continue;
            };
            let candidate = branch.join(name);
            let mut res = resolve_conflict(&view, &candidate, mode);

            // Overwriting a Leaf that is itself being promoted would delete it.
            if res.status.overwrites() && unique.contains(&res.dst.as_path()) {
                res.status = Status::SkipConflict;
                res.perform = false;
            }

            if res.perform {
                view.claimed.insert(res.dst.clone());
            }
            ops.push(Operation::new(item, res.dst, res.status, res.perform));
        }
    }

    debug!(leaves = unique.len(), operations = ops.len(), %mode, "preview built");
    ops
}
