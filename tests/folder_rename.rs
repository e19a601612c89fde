use assert_fs::TempDir;
use assert_fs::prelude::*;

use folder_levelup::engine::{Ledger, LedgerStep, rename_folder};
use folder_levelup::{LevelUpError, NoopNotifier, RealFs};

#[test]
fn renames_in_place_and_is_undoable() {
    let a = TempDir::new().unwrap();
    a.child("B/C/f").write_str("f").unwrap();

    let batch = rename_folder(&RealFs, &NoopNotifier, a.child("B/C").path(), "  Renamed ").unwrap();
    assert_eq!(batch.len(), 1);
    assert!(a.child("B/Renamed/f").path().exists());
    assert!(!a.child("B/C").path().exists());

    let mut ledger = Ledger::new();
    ledger.record(batch);
    assert!(matches!(ledger.undo(&RealFs), LedgerStep::Done(_)));
    assert!(a.child("B/C/f").path().exists());
}

#[test]
fn same_name_is_a_no_op() {
    let a = TempDir::new().unwrap();
    a.child("B").create_dir_all().unwrap();
    let batch = rename_folder(&RealFs, &NoopNotifier, a.child("B").path(), "B").unwrap();
    assert!(batch.is_empty());
}

#[test]
fn rejects_bad_input() {
    let a = TempDir::new().unwrap();
    a.child("B").create_dir_all().unwrap();
    a.child("Taken").create_dir_all().unwrap();
    a.child("file.txt").write_str("x").unwrap();

    let err = rename_folder(&RealFs, &NoopNotifier, a.child("B").path(), "   ").unwrap_err();
    assert!(matches!(err.downcast_ref::<LevelUpError>(), Some(LevelUpError::EmptyName)));

    let err = rename_folder(&RealFs, &NoopNotifier, a.child("B").path(), "Taken").unwrap_err();
    assert!(matches!(err.downcast_ref::<LevelUpError>(), Some(LevelUpError::NameTaken(_))));

    let err = rename_folder(&RealFs, &NoopNotifier, a.child("file.txt").path(), "dir").unwrap_err();
    assert!(matches!(err.downcast_ref::<LevelUpError>(), Some(LevelUpError::NotADirectory(_))));

    assert!(rename_folder(&RealFs, &NoopNotifier, a.child("B").path(), "x/y").is_err());
    assert!(rename_folder(&RealFs, &NoopNotifier, a.child("B").path(), "..").is_err());
    assert!(a.child("B").path().is_dir());
}
