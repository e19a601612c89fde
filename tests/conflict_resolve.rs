//! Conflict resolution and numbered sibling naming against an in-memory occupancy set.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use folder_levelup::engine::{ConflictMode, Status, resolve_conflict};
use folder_levelup::fs_ops::{MAX_SUFFIX, SuffixTag, free_sibling};
use folder_levelup::{FileSystem, LevelUpError};

/// Pretends exactly the given paths exist. `all` makes every path look taken.
#[derive(Default)]
struct Occupied {
    paths: HashSet<PathBuf>,
    all: bool,
}

impl Occupied {
    fn with(paths: &[&str]) -> Self {
        Self {
            paths: paths.iter().map(PathBuf::from).collect(),
            all: false,
        }
    }
}

impl FileSystem for Occupied {
    fn list_dir(&self, _dir: &Path) -> io::Result<Vec<PathBuf>> {
        Ok(Vec::new())
    }
    fn is_dir(&self, _path: &Path) -> bool {
        false
    }
    fn exists(&self, path: &Path) -> bool {
        self.all || self.paths.contains(path)
    }
    fn remove_all(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
    fn rename(&self, _from: &Path, _to: &Path) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn free_destination_is_ok_in_every_mode() {
    let fs = Occupied::default();
    for mode in [ConflictMode::Skip, ConflictMode::Overwrite, ConflictMode::Rename] {
        let r = resolve_conflict(&fs, Path::new("/a/B/x.txt"), mode);
        assert_eq!(r.dst, PathBuf::from("/a/B/x.txt"));
        assert_eq!(r.status, Status::Ok);
        assert!(r.perform);
    }
}

#[test]
fn taken_destination_per_mode() {
    let fs = Occupied::with(&["/a/B/x.txt"]);
    let skip = resolve_conflict(&fs, Path::new("/a/B/x.txt"), ConflictMode::Skip);
    assert_eq!(skip.status, Status::SkipConflict);
    assert!(!skip.perform);

    let over = resolve_conflict(&fs, Path::new("/a/B/x.txt"), ConflictMode::Overwrite);
    assert_eq!(over.status, Status::Overwrite);
    assert_eq!(over.dst, PathBuf::from("/a/B/x.txt"));
    assert!(over.perform);
}

#[test]
fn rename_skips_taken_numbers() {
    let fs = Occupied::with(&["/a/B/x.txt", "/a/B/x_1.txt", "/a/B/x_2.txt"]);
    let r = resolve_conflict(&fs, Path::new("/a/B/x.txt"), ConflictMode::Rename);
    assert_eq!(r.dst, PathBuf::from("/a/B/x_3.txt"));
    assert_eq!(r.status, Status::Rename("x_3.txt".into()));
    assert_eq!(r.status.to_string(), "RENAME→x_3.txt");
}

#[test]
fn rename_of_directory_without_extension() {
    let fs = Occupied::with(&["/a/B/photos"]);
    let r = resolve_conflict(&fs, Path::new("/a/B/photos"), ConflictMode::Rename);
    assert_eq!(r.dst, PathBuf::from("/a/B/photos_1"));
}

#[test]
fn exhausted_rename_is_not_performed() {
    let fs = Occupied {
        all: true,
        ..Occupied::default()
    };
    let r = resolve_conflict(&fs, Path::new("/a/B/x.txt"), ConflictMode::Rename);
    assert_eq!(r.status, Status::NoFreeName);
    assert!(!r.perform);
}

#[test]
fn undo_and_redo_tags() {
    let fs = Occupied::with(&["/a/B/C/x.txt", "/a/B/C/x_undo1.txt"]);
    assert_eq!(
        free_sibling(&fs, Path::new("/a/B/C/x.txt"), SuffixTag::Undo).unwrap(),
        PathBuf::from("/a/B/C/x_undo2.txt")
    );
    assert_eq!(
        free_sibling(&fs, Path::new("/a/B/C/x.txt"), SuffixTag::Redo).unwrap(),
        PathBuf::from("/a/B/C/x_redo1.txt")
    );
    assert_eq!(
        free_sibling(&fs, Path::new("/a/B/y.txt"), SuffixTag::Redo).unwrap(),
        PathBuf::from("/a/B/y.txt")
    );
}

#[test]
fn exhaustion_is_typed() {
    let fs = Occupied {
        all: true,
        ..Occupied::default()
    };
    match free_sibling(&fs, Path::new("/a/x"), SuffixTag::Undo) {
        Err(LevelUpError::NameSpaceExhausted { tries, .. }) => assert_eq!(tries, MAX_SUFFIX),
        other => panic!("unexpected: {other:?}"),
    }
}
