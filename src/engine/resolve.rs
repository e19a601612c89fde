//! Conflict resolver.
//!
//! Policy:
//! - Free destination: use it as-is ("OK").
//! - Skip: keep the planned path but do not perform the move.
//! - Overwrite: keep the planned path; execution deletes the existing target first.
//! - Rename: first free "<stem>_<n><.ext>" sibling, n = 1, 2, ...
//!
//! Only existence checks are performed, so the outcome is deterministic for a given
//! filesystem state.

use std::path::{Path, PathBuf};
use tracing::warn;

use crate::fs_ops::{FileSystem, SuffixTag, numbered_sibling};

use super::model::{ConflictMode, Status};

/// Final destination, status label and whether execution should act.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub dst: PathBuf,
    pub status: Status,
    pub perform: bool,
}

pub fn resolve_conflict(fs: &dyn FileSystem, candidate: &Path, mode: ConflictMode) -> Resolution {
    if !fs.exists(candidate) {
        return Resolution {
            dst: candidate.to_path_buf(),
            status: Status::Ok,
            perform: true,
        };
    }

    match mode {
        ConflictMode::Skip => Resolution {
            dst: candidate.to_path_buf(),
            status: Status::SkipConflict,
            perform: false,
        },
        ConflictMode::Overwrite => Resolution {
            dst: candidate.to_path_buf(),
            status: Status::Overwrite,
            perform: true,
        },
        ConflictMode::Rename => match numbered_sibling(fs, candidate, SuffixTag::Rename) {
            Ok(dst) => {
                let name = dst
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Resolution {
                    dst,
                    status: Status::Rename(name),
                    perform: true,
                }
            }
            Err(e) => {
                warn!(candidate = %candidate.display(), error = %e, "rename: giving up");
                Resolution {
                    dst: candidate.to_path_buf(),
                    status: Status::NoFreeName,
                    perform: false,
                }
            }
        },
    }
}
