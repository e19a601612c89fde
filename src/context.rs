//! One working session against the engine.
//!
//! A `Session` owns the effective configuration, the locked history file and the in-memory
//! ledger. Front-ends open one, issue commands, and `close` it to write everything back.
//!
//! Two configs are kept: the one loaded from disk and the effective one with command-line
//! overrides applied. Only the loaded one, plus the new `last_root`, is ever written back.

use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::{Config, save_config_to_xml_path};
use crate::engine::{
    BatchReport, Ledger, LedgerStep, MoveBatch, Operation, Progress, Structure, build_preview,
    execute_operations, rename_folder, scan_structure, select_leaves,
};
use crate::errors::LevelUpError;
use crate::fs_ops::{FileSystem, RealFs};
use crate::history::HistoryStore;
use crate::platform::{ShellNotifier, SystemNotifier};

/// What to plan: a Root plus an optional selection of Branches and Leaves.
///
/// Relative selection entries are taken relative to the Root.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub root: Option<PathBuf>,
    pub branches: Vec<PathBuf>,
    pub leaves: Vec<PathBuf>,
}

pub struct Session {
    loaded: Config,
    cfg: Config,
    config_path: Option<PathBuf>,
    store: Option<HistoryStore>,
    ledger: Ledger,
    fs: Box<dyn FileSystem>,
    notifier: Box<dyn ShellNotifier>,
}

impl Session {
    /// Open a session on the real filesystem.
    ///
    /// `loaded` is the config as read from disk; `cfg` is the effective config for this
    /// session. The history at `cfg.history_file` is locked if one is configured.
    pub fn open(loaded: Config, cfg: Config, config_path: Option<PathBuf>) -> Result<Self> {
        Self::with_backend(loaded, cfg, config_path, Box::new(RealFs), Box::new(SystemNotifier))
    }

    pub fn with_backend(
        loaded: Config,
        cfg: Config,
        config_path: Option<PathBuf>,
        fs: Box<dyn FileSystem>,
        notifier: Box<dyn ShellNotifier>,
    ) -> Result<Self> {
        let (store, ledger) = match cfg.history_file.as_deref() {
            Some(path) => {
                let (store, ledger) = HistoryStore::open(path)?;
                (Some(store), ledger)
            }
            None => {
                warn!("no history location available; undo history will not persist");
                (None, Ledger::new())
            }
        };
        Ok(Self {
            loaded,
            cfg,
            config_path,
            store,
            ledger,
            fs,
            notifier,
        })
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Resolve the Root for a command: the given path, else the last one used.
    ///
    /// A valid Root becomes the new `last_root`.
    pub fn resolve_root(&mut self, given: Option<&Path>) -> Result<PathBuf> {
        let candidate = given
            .map(Path::to_path_buf)
            .or_else(|| self.cfg.last_root.clone())
            .ok_or_else(|| anyhow!("No ROOT given and no last_root in the config"))?;
        if !self.fs.is_dir(&candidate) {
            return Err(LevelUpError::InvalidRoot(candidate).into());
        }
        let root = dunce::canonicalize(&candidate).unwrap_or(candidate);
        debug!(root = %root.display(), "root resolved");
        self.cfg.last_root = Some(root.clone());
        Ok(root)
    }

    /// Scan a Root for Branches and their Leaves.
    pub fn scan(&mut self, root: Option<&Path>) -> Result<(PathBuf, Structure)> {
        let root = self.resolve_root(root)?;
        let structure = scan_structure(self.fs.as_ref(), &root, self.cfg.include_hidden);
        Ok((root, structure))
    }

    /// Plan the promotion of the selected Leaves under the configured conflict mode.
    pub fn preview(&mut self, selection: &Selection) -> Result<Vec<Operation>> {
        let (root, structure) = self.scan(selection.root.as_deref())?;
        // Same form as the scan: joined onto the canonical Root, then canonicalized.
        let anchor = |p: &PathBuf| {
            let joined = if p.is_absolute() { p.clone() } else { root.join(p) };
            dunce::canonicalize(&joined).unwrap_or(joined)
        };
        let branches: Vec<PathBuf> = selection.branches.iter().map(anchor).collect();
        let leaves: Vec<PathBuf> = selection.leaves.iter().map(anchor).collect();

        let chosen = select_leaves(self.fs.as_ref(), &structure, &branches, &leaves);
        let ops = build_preview(self.fs.as_ref(), &chosen, self.cfg.conflict_mode);
        info!(
            root = %root.display(),
            leaves = chosen.len(),
            operations = ops.len(),
            mode = %self.cfg.conflict_mode,
            "preview built"
        );
        Ok(ops)
    }

    /// Apply a preview. A real run records what moved so it can be undone.
    pub fn execute(&mut self, ops: &[Operation], simulate: bool, progress: Option<Progress<'_>>) -> Result<BatchReport> {
        let report = execute_operations(self.fs.as_ref(), self.notifier.as_ref(), ops, simulate, progress);
        if !simulate && !report.applied.is_empty() {
            self.ledger.record(report.applied.clone());
            self.persist()?;
        }
        Ok(report)
    }

    pub fn undo(&mut self) -> Result<LedgerStep> {
        let step = self.ledger.undo(self.fs.as_ref());
        self.after_replay(&step)?;
        Ok(step)
    }

    pub fn redo(&mut self) -> Result<LedgerStep> {
        let step = self.ledger.redo(self.fs.as_ref());
        self.after_replay(&step)?;
        Ok(step)
    }

    /// Rename a Branch or Leaf in place; the rename is undoable.
    pub fn rename(&mut self, path: &Path, new_name: &str) -> Result<MoveBatch> {
        let batch = rename_folder(self.fs.as_ref(), self.notifier.as_ref(), path, new_name)?;
        if !batch.is_empty() {
            self.ledger.record(batch.clone());
            self.persist()?;
        }
        Ok(batch)
    }

    /// Write the ledger and the config back, then release the history lock.
    ///
    /// The config written is the loaded one with only `last_root` updated.
    pub fn close(self) -> Result<()> {
        self.persist()?;
        if let Some(path) = self.config_path.as_deref() {
            let mut saved = self.loaded.clone();
            saved.last_root = self.cfg.last_root.clone();
            save_config_to_xml_path(&saved, path)?;
        }
        Ok(())
    }

    fn after_replay(&mut self, step: &LedgerStep) -> Result<()> {
        if let LedgerStep::Done(report) = step {
            for record in report.applied.records() {
                if let Some(parent) = record.after.parent() {
                    self.notifier.path_updated(parent, true);
                }
                if let Some(parent) = record.before.parent() {
                    self.notifier.path_updated(parent, true);
                }
            }
            self.persist()?;
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        match &self.store {
            Some(store) => store.save(&self.ledger),
            None => Ok(()),
        }
    }
}
