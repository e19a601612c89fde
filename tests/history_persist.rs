//! Ledger persistence across sessions, the way the CLI uses it.

use assert_fs::TempDir;
use assert_fs::prelude::*;
use std::fs;

use folder_levelup::config::Config;
use folder_levelup::history::{HistoryStore, load_ledger};
use folder_levelup::{LedgerStep, LevelUpError, NoopNotifier, RealFs, Selection, Session};

fn open(state: &std::path::Path) -> Session {
    let cfg = Config {
        history_file: Some(state.join("history.json")),
        log_file: None,
        ..Config::default()
    };
    Session::with_backend(
        cfg.clone(),
        cfg,
        Some(state.join("config.xml")),
        Box::new(RealFs),
        Box::new(NoopNotifier),
    )
    .unwrap()
}

#[test]
fn undo_survives_a_restart() {
    let td = TempDir::new().unwrap();
    let state = td.path().join("state");
    td.child("A/B/C/x.txt").write_str("x").unwrap();

    let mut s = open(&state);
    let ops = s
        .preview(&Selection {
            root: Some(td.child("A").path().to_path_buf()),
            ..Selection::default()
        })
        .unwrap();
    s.execute(&ops, false, None).unwrap();
    s.close().unwrap();

    let on_disk = load_ledger(&state.join("history.json")).unwrap();
    assert_eq!(on_disk.undo_depth(), 1);
    let json = fs::read_to_string(state.join("history.json")).unwrap();
    assert!(json.contains("\"before\""));
    assert!(json.contains("\"after\""));

    let mut s = open(&state);
    assert!(matches!(s.undo().unwrap(), LedgerStep::Done(_)));
    assert!(td.child("A/B/C/x.txt").path().exists());
    s.close().unwrap();
}

#[test]
fn simulated_run_records_nothing() {
    let td = TempDir::new().unwrap();
    let state = td.path().join("state");
    td.child("A/B/C/x.txt").write_str("x").unwrap();

    let mut s = open(&state);
    let ops = s
        .preview(&Selection {
            root: Some(td.child("A").path().to_path_buf()),
            ..Selection::default()
        })
        .unwrap();
    assert!(s.config().last_root.is_some(), "a valid Root becomes last_root");
    let report = s.execute(&ops, true, None).unwrap();
    assert!(report.applied.is_empty());
    assert_eq!(s.ledger().undo_depth(), 0);
    assert!(matches!(s.undo().unwrap(), LedgerStep::NoHistory));
}

#[test]
fn corrupt_history_refuses_to_open() {
    let td = TempDir::new().unwrap();
    let path = td.path().join("history.json");
    fs::write(&path, "[[[").unwrap();
    let err = HistoryStore::open(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LevelUpError>(),
        Some(LevelUpError::CorruptHistory { .. })
    ));
}
