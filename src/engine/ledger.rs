//! Undo/Redo ledger: two stacks of move batches.
//!
//! - A fresh forward action (execution or folder rename) is pushed to Undo and clears Redo.
//! - Undo pops the newest Undo batch, moves each item back (newest first) and pushes what it
//!   did to Redo.
//! - Redo pops the newest Redo batch, moves each item forward again and pushes the result
//!   to Undo. The remaining Redo history is kept.
//!
//! Placement during undo/redo never overwrites: an occupied target gets a `_undo<n>` /
//! `_redo<n>` name instead. Items that no longer exist are skipped without error.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::errors::StepError;
use crate::fs_ops::{FileSystem, SuffixTag, describe_io_error, free_sibling};

use super::model::{BatchReport, MoveBatch, MoveRecord};

/// Result of an undo or redo request.
#[derive(Debug)]
pub enum LedgerStep {
    /// The relevant stack was empty; nothing happened.
    NoHistory,
    /// One batch was processed.
    Done(BatchReport),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    undo: Vec<MoveBatch>,
    #[serde(default)]
    redo: Vec<MoveBatch>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a forward action. Empty batches are ignored.
    pub fn record(&mut self, batch: MoveBatch) {
        if batch.is_empty() {
            return;
        }
        debug!(records = batch.len(), dropped_redo = self.redo.len(), "ledger: record forward batch");
        self.undo.push(batch);
        self.redo.clear();
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Most recent batch on the Undo stack.
    pub fn peek_undo(&self) -> Option<&MoveBatch> {
        self.undo.last()
    }

    /// Most recent batch on the Redo stack.
    pub fn peek_redo(&self) -> Option<&MoveBatch> {
        self.redo.last()
    }

    /// Reverse the newest forward batch.
    pub fn undo(&mut self, fs: &dyn FileSystem) -> LedgerStep {
        let Some(batch) = self.undo.pop() else {
            return LedgerStep::NoHistory;
        };

        let mut report = BatchReport::default();
        for record in batch.records().iter().rev() {
            if let Some(done) = replay(fs, &record.after, &record.before, SuffixTag::Undo, &mut report.errors) {
                report.applied.push(MoveRecord::new(done, &record.after));
            }
        }

        info!(records = batch.len(), restored = report.applied.len(), failed = report.errors.len(), "undo finished");
        if !report.applied.is_empty() {
            self.redo.push(report.applied.clone());
        }
        LedgerStep::Done(report)
    }

    /// Re-apply the newest undone batch.
    pub fn redo(&mut self, fs: &dyn FileSystem) -> LedgerStep {
        let Some(batch) = self.redo.pop() else {
            return LedgerStep::NoHistory;
        };

        let mut report = BatchReport::default();
        for record in batch.records() {
            if let Some(done) = replay(fs, &record.before, &record.after, SuffixTag::Redo, &mut report.errors) {
                report.applied.push(MoveRecord::new(&record.before, done));
            }
        }

        info!(records = batch.len(), reapplied = report.applied.len(), failed = report.errors.len(), "redo finished");
        if !report.applied.is_empty() {
            self.undo.push(report.applied.clone());
        }
        LedgerStep::Done(report)
    }
}

/// Move `from` to a free path based on `to`. Returns where it landed, or None when `from` is
/// gone or the move failed (the failure is appended to `errors`).
fn replay(
    fs: &dyn FileSystem,
    from: &Path,
    to: &Path,
    tag: SuffixTag,
    errors: &mut Vec<StepError>,
) -> Option<std::path::PathBuf> {
    if !fs.exists(from) {
        debug!(path = %from.display(), "ledger: item no longer exists, skipped");
        return None;
    }

    let target = match free_sibling(fs, to, tag) {
        Ok(t) => t,
        Err(e) => {
            errors.push(StepError::new(from, to, e.to_string()));
            return None;
        }
    };

    match fs.rename(from, &target) {
        Ok(()) => {
            if target != to {
                warn!(wanted = %to.display(), placed = %target.display(), "ledger: target occupied, placed under a new name");
            }
            Some(target)
        }
        Err(e) => {
            let err = StepError::new(from, &target, describe_io_error("move", &e));
            warn!(error = %err, "ledger: move failed");
            errors.push(err);
            None
        }
    }
}
