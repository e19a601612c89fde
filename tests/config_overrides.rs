//! Command-line overrides apply to one command only; config.xml keeps its own values.

use assert_fs::TempDir;
use assert_fs::prelude::*;
use clap::Parser;
use std::fs;

use folder_levelup::cli::{Args, Command};
use folder_levelup::config::{LogLevel, load_config_from_xml_path};
use folder_levelup::{ConflictMode, NoopNotifier, RealFs, Session};

#[test]
fn one_off_flags_are_not_persisted() {
    let td = TempDir::new().unwrap();
    td.child("A/B/C/x.txt").write_str("x").unwrap();
    let state = td.path().join("state");
    let cfg_path = state.join("config.xml");
    let history = state.join("history.json");
    let other_history = state.join("other.json");
    fs::create_dir_all(&state).unwrap();
    fs::write(
        &cfg_path,
        format!(
            "<config>\n  <conflict_mode>skip</conflict_mode>\n  <log_level>normal</log_level>\n  <history_file>{}</history_file>\n</config>\n",
            history.display()
        ),
    )
    .unwrap();

    let loaded = load_config_from_xml_path(&cfg_path).unwrap();
    let root = td.child("A").path().to_str().unwrap().to_string();
    let other = other_history.to_str().unwrap().to_string();
    let args = Args::parse_from([
        "folder_levelup",
        "-d",
        "--history-file",
        &other,
        "preview",
        &root,
        "--mode",
        "overwrite",
        "--include-hidden",
    ]);
    let mut effective = loaded.clone();
    args.apply_overrides(&mut effective);
    assert_eq!(effective.conflict_mode, ConflictMode::Overwrite);

    let mut session = Session::with_backend(
        loaded,
        effective,
        Some(cfg_path.clone()),
        Box::new(RealFs),
        Box::new(NoopNotifier),
    )
    .unwrap();
    let Command::Preview(plan) = &args.command else {
        panic!("expected preview");
    };
    session.preview(&plan.selection()).unwrap();
    session.close().unwrap();

    let saved = load_config_from_xml_path(&cfg_path).unwrap();
    assert_eq!(saved.conflict_mode, ConflictMode::Skip);
    assert!(!saved.include_hidden);
    assert_eq!(saved.log_level, LogLevel::Normal);
    assert_eq!(saved.history_file.as_deref(), Some(history.as_path()));
    assert_eq!(
        saved.last_root,
        Some(dunce::canonicalize(td.child("A").path()).unwrap()),
        "last_root is the one value a command updates"
    );
}
