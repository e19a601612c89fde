//! Filesystem collaborator.
//!
//! The engine never touches `std::fs` directly: it goes through the `FileSystem` trait so the
//! listing/existence/delete/move primitives can be swapped (tests inject failures this way).
//! `RealFs` is the production implementation.

mod atomic;
pub mod helpers;
pub mod sibling;

pub use helpers::{describe_io_error, io_error_with_help};
pub use sibling::{MAX_SUFFIX, SuffixTag, free_sibling, numbered_sibling};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Primitives the promotion engine needs from the filesystem.
pub trait FileSystem {
    /// Direct children (files and directories) of `dir`.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
    /// True if `path` is a directory (following symlinks).
    fn is_dir(&self, path: &Path) -> bool;
    /// True if anything occupies `path`, including a dangling symlink.
    fn exists(&self, path: &Path) -> bool;
    /// Delete `path`; directories are removed recursively.
    fn remove_all(&self, path: &Path) -> io::Result<()>;
    /// Move `from` to `to` as a single rename of the whole item.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// `FileSystem` backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl FileSystem for RealFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| entry.map(|e| e.into_path()).map_err(io::Error::from))
            .collect()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn remove_all(&self, path: &Path) -> io::Result<()> {
        let meta = fs::symlink_metadata(path)?;
        if meta.file_type().is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        atomic::rename_entry(from, to)
    }
}
