//! Core library for `folder_levelup`.
//!
//! Promotes the contents of every Leaf folder `A/B/C` one level up into its Branch `A/B`:
//! scan a Root, plan with per-item conflict handling, execute (or simulate), and undo/redo
//! whole batches across invocations.
//!
//! Public API:
//! - engine: scan, select, preview, execute and the Undo/Redo ledger
//! - fs_ops: the `FileSystem` collaborator and non-colliding sibling naming
//! - config: XML-backed settings
//! - context: a `Session` tying config, history and engine together
//! - errors: typed errors and per-step failures

pub mod cli;
pub mod config;
pub mod context;
pub mod engine;
pub mod errors;
pub mod fs_ops;
pub mod history;
pub mod logging;
pub mod output;
pub mod platform;
pub mod shutdown;

pub use config::{Config, LogLevel, default_config_path};
pub use context::{Selection, Session};
pub use engine::{
    BatchReport, ConflictMode, Ledger, LedgerStep, MoveBatch, MoveRecord, Operation, Status, Structure,
    build_preview, execute_operations, rename_folder, resolve_conflict, scan_structure, select_leaves,
};
pub use errors::{LevelUpError, StepError};
pub use fs_ops::{FileSystem, RealFs};
pub use platform::{NoopNotifier, ShellNotifier, SystemNotifier};
