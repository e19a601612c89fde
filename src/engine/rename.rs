//! In-place folder rename for Branches and Leaves.
//! The returned one-record batch is a forward action: record it in the ledger to make it undoable.

use std::path::Path;
use tracing::info;

use crate::errors::LevelUpError;
use crate::fs_ops::{FileSystem, io_error_with_help};
use crate::platform::ShellNotifier;

use super::model::{MoveBatch, MoveRecord};

/// Rename the directory at `path` to `new_name` within the same parent.
///
/// Returns an empty batch when the name is unchanged.
pub fn rename_folder(
    fs: &dyn FileSystem,
    notifier: &dyn ShellNotifier,
    path: &Path,
    new_name: &str,
) -> anyhow::Result<MoveBatch> {
    if !fs.is_dir(path) {
        return Err(LevelUpError::NotADirectory(path.to_path_buf()).into());
    }

    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err(LevelUpError::EmptyName.into());
    }
    if new_name.contains(['/', '\\']) || new_name == "." || new_name == ".." {
        anyhow::bail!("Invalid folder name: '{new_name}'");
    }

    let parent = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Cannot rename a filesystem root: {}", path.display()))?;
    let target = parent.join(new_name);
    if target == path {
        return Ok(MoveBatch::new());
    }
    if fs.exists(&target) {
        return Err(LevelUpError::NameTaken(target).into());
    }

    fs.rename(path, &target)
        .map_err(io_error_with_help("rename folder", path))?;
    notifier.path_renamed(path, &target, true);
    info!(from = %path.display(), to = %target.display(), "folder renamed");

    Ok(MoveBatch::from(vec![MoveRecord::new(path, target)]))
}
