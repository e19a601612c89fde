//! Folder promotion engine.
//!
//! Scan a Root (A) for Branches (B) and Leaves (C), plan moving each Leaf's direct children
//! up into its Branch, apply the plan, and keep an Undo/Redo ledger of what moved.
//! Leaves themselves always stay in place.

pub mod execute;
pub mod ledger;
pub mod model;
pub mod preview;
pub mod rename;
pub mod resolve;
pub mod scan;
pub mod select;

pub use execute::{Progress, execute_operations};
pub use ledger::{Ledger, LedgerStep};
pub use model::{BatchReport, ConflictMode, MoveBatch, MoveRecord, Operation, Status, Structure};
pub use preview::build_preview;
pub use rename::rename_folder;
pub use resolve::{Resolution, resolve_conflict};
pub use scan::{is_hidden, scan_structure};
pub use select::select_leaves;
