//! Undo/Redo ledger against a real tree, including occupied targets.

use assert_fs::TempDir;
use assert_fs::prelude::*;
use std::fs;

use folder_levelup::engine::{ConflictMode, Ledger, LedgerStep, MoveBatch, MoveRecord, build_preview, execute_operations};
use folder_levelup::{NoopNotifier, RealFs};

fn promoted(a: &TempDir) -> Ledger {
    a.child("B/C/x.txt").write_str("x").unwrap();
    a.child("B/C/d/inner").write_str("i").unwrap();
    let ops = build_preview(&RealFs, &[a.child("B/C").path()], ConflictMode::Skip);
    let report = execute_operations(&RealFs, &NoopNotifier, &ops, false, None);
    assert!(report.is_clean());
    let mut ledger = Ledger::new();
    ledger.record(report.applied);
    ledger
}

#[test]
fn empty_stacks_report_no_history() {
    let mut ledger = Ledger::new();
    assert!(matches!(ledger.undo(&RealFs), LedgerStep::NoHistory));
    assert!(matches!(ledger.redo(&RealFs), LedgerStep::NoHistory));
}

#[test]
fn undo_into_recreated_name_uses_undo_suffix() {
    let a = TempDir::new().unwrap();
    let mut ledger = promoted(&a);
    a.child("B/C/x.txt").write_str("recreated").unwrap();

    let LedgerStep::Done(report) = ledger.undo(&RealFs) else {
        panic!("expected history");
    };
    assert!(report.is_clean());
    assert_eq!(fs::read_to_string(a.child("B/C/x.txt").path()).unwrap(), "recreated");
    assert_eq!(fs::read_to_string(a.child("B/C/x_undo1.txt").path()).unwrap(), "x");
    assert!(a.child("B/C/d/inner").path().exists());

    let redo = ledger.peek_redo().unwrap();
    assert!(
        redo.records()
            .iter()
            .any(|r| r.before == a.child("B/C/x_undo1.txt").path() && r.after == a.child("B/x.txt").path())
    );
}

#[test]
fn redo_into_occupied_name_uses_redo_suffix() {
    let a = TempDir::new().unwrap();
    let mut ledger = promoted(&a);
    ledger.undo(&RealFs);
    a.child("B/x.txt").write_str("squatter").unwrap();

    let LedgerStep::Done(report) = ledger.redo(&RealFs) else {
        panic!("expected redo history");
    };
    assert!(report.is_clean());
    assert_eq!(fs::read_to_string(a.child("B/x.txt").path()).unwrap(), "squatter");
    assert_eq!(fs::read_to_string(a.child("B/x_redo1.txt").path()).unwrap(), "x");
    assert!(a.child("B/d/inner").path().exists());
    assert_eq!(ledger.undo_depth(), 1);
}

#[test]
fn vanished_items_are_skipped_silently() {
    let a = TempDir::new().unwrap();
    let mut ledger = promoted(&a);
    fs::remove_file(a.child("B/x.txt").path()).unwrap();

    let LedgerStep::Done(report) = ledger.undo(&RealFs) else {
        panic!("expected history");
    };
    assert!(report.errors.is_empty());
    assert_eq!(report.applied.len(), 1);
    assert!(a.child("B/C/d").path().is_dir());
}

#[test]
fn undo_of_fully_vanished_batch_pushes_nothing_to_redo() {
    let a = TempDir::new().unwrap();
    let mut ledger = Ledger::new();
    ledger.record(MoveBatch::from(vec![MoveRecord::new(
        a.child("B/C/gone").path(),
        a.child("B/gone").path(),
    )]));

    let LedgerStep::Done(report) = ledger.undo(&RealFs) else {
        panic!("expected history");
    };
    assert!(report.applied.is_empty());
    assert_eq!(ledger.undo_depth(), 0);
    assert_eq!(ledger.redo_depth(), 0);
}

#[test]
fn new_forward_batch_clears_redo() {
    let a = TempDir::new().unwrap();
    let mut ledger = promoted(&a);
    ledger.undo(&RealFs);
    assert_eq!(ledger.redo_depth(), 1);

    ledger.record(MoveBatch::from(vec![MoveRecord::new("/p/B/C/y", "/p/B/y")]));
    assert_eq!(ledger.redo_depth(), 0);
    assert_eq!(ledger.undo_depth(), 1);
}

#[test]
fn redo_keeps_remaining_redo_batches() {
    let a = TempDir::new().unwrap();
    let mut ledger = promoted(&a);
    a.child("B2/C/z").write_str("z").unwrap();
    let ops = build_preview(&RealFs, &[a.child("B2/C").path()], ConflictMode::Skip);
    ledger.record(execute_operations(&RealFs, &NoopNotifier, &ops, false, None).applied);

    ledger.undo(&RealFs);
    ledger.undo(&RealFs);
    assert_eq!(ledger.redo_depth(), 2);

    ledger.redo(&RealFs);
    assert_eq!(ledger.redo_depth(), 1);
    assert_eq!(ledger.undo_depth(), 1);
    assert!(a.child("B/x.txt").path().exists());
    assert!(a.child("B2/C/z").path().exists());
}
