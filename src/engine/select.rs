//! Turn a user selection of Branches and Leaves into the sorted Leaf list a preview needs.

use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::warn;

use crate::fs_ops::FileSystem;

use super::model::Structure;

/// Selecting a Branch selects all of its scanned Leaves; explicit Leaves are added when the
/// scan found them. With nothing selected, every Leaf in `structure` is chosen.
///
/// Paths are matched exactly against `structure`, so callers pass them in the same form the
/// scan produced. Anything that is not a scanned Branch or Leaf is dropped with a warning.
/// The result is de-duplicated, limited to existing directories and sorted.
pub fn select_leaves(
    fs: &dyn FileSystem,
    structure: &Structure,
    branches: &[PathBuf],
    leaves: &[PathBuf],
) -> Vec<PathBuf> {
    let mut chosen: BTreeSet<PathBuf> = BTreeSet::new();

    if branches.is_empty() && leaves.is_empty() {
        chosen.extend(structure.values().flatten().cloned());
    } else {
        for branch in branches {
            match structure.get(branch) {
                Some(cs) => chosen.extend(cs.iter().cloned()),
                None => warn!(branch = %branch.display(), "select: not a scanned Branch, ignored"),
            }
        }
        let known: BTreeSet<&PathBuf> = structure.values().flatten().collect();
        for leaf in leaves {
            if known.contains(leaf) {
                chosen.insert(leaf.clone());
            } else {
                warn!(leaf = %leaf.display(), "select: not a scanned Leaf, ignored");
            }
        }
    }

    chosen.into_iter().filter(|p| fs.is_dir(p)).collect()
}
