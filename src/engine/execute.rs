//! Execution engine: apply (or simulate) a preview, one operation at a time.
//!
//! Failure isolation is per operation: a failed delete-then-move is recorded as a StepError
//! and the loop moves on. Nothing here can be cancelled once started.

use tracing::{debug, info, warn};

use crate::errors::StepError;
use crate::fs_ops::{FileSystem, describe_io_error};
use crate::platform::ShellNotifier;

use super::model::{BatchReport, MoveRecord, Operation};

/// Callback receiving `(done, total)` before each operation and once at the end.
pub type Progress<'a> = &'a mut dyn FnMut(usize, usize);

/// Apply `ops` in order.
///
/// With `simulate`, nothing on disk changes and the applied batch stays empty; progress is
/// still reported for every operation.
pub fn execute_operations(
    fs: &dyn FileSystem,
    notifier: &dyn ShellNotifier,
    ops: &[Operation],
    simulate: bool,
    mut progress: Option<Progress<'_>>,
) -> BatchReport {
    let mut report = BatchReport::default();
    let total = ops.len();

    for (done, op) in ops.iter().enumerate() {
        if let Some(cb) = progress.as_deref_mut() {
            cb(done, total);
        }

        if !op.perform() {
            continue;
        }

        if simulate {
            debug!(src = %op.src().display(), dst = %op.dst().display(), status = %op.status(), "simulate: would move");
            continue;
        }

        // A stale overwrite whose target vanished since the preview is simply a plain move.
        if op.status().overwrites()
            && fs.exists(op.dst())
            && let Err(e) = fs.remove_all(op.dst())
        {
            warn!(dst = %op.dst().display(), error = %e, "overwrite: could not delete existing target");
        }

        match fs.rename(op.src(), op.dst()) {
            Ok(()) => {
                info!(src = %op.src().display(), dst = %op.dst().display(), "moved");
                report.applied.push(MoveRecord::new(op.src(), op.dst()));
                notifier.path_updated(op.dst(), fs.is_dir(op.dst()));
                if let Some(parent) = op.dst().parent() {
                    notifier.path_updated(parent, true);
                }
            }
            Err(e) => {
                let err = StepError::new(op.src(), op.dst(), describe_io_error("move", &e));
                warn!(error = %err, "move failed");
                report.errors.push(err);
            }
        }
    }

    if let Some(cb) = progress.as_deref_mut() {
        cb(total, total);
    }

    info!(
        total,
        moved = report.applied.len(),
        failed = report.errors.len(),
        simulate,
        "execution finished"
    );
    report
}
