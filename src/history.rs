//! Undo/Redo history persistence.
//!
//! The ledger lives in a JSON file so `undo`/`redo` work across invocations. While a
//! `HistoryStore` is alive it holds an exclusive advisory lock on a sidecar `<file>.lock`,
//! which serializes concurrent invocations against the same history.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, trace};

use crate::engine::Ledger;
use crate::errors::LevelUpError;
use crate::fs_ops::io_error_with_help;
use crate::platform::atomic_write;

/// Read a ledger; a missing file is an empty ledger.
pub fn load_ledger(path: &Path) -> Result<Ledger> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Ledger::new()),
        Err(e) => return Err(io_error_with_help("read history", path)(e)),
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Ledger::new());
    }
    serde_json::from_slice(&bytes).map_err(|e| {
        LevelUpError::CorruptHistory {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Write a ledger atomically.
pub fn save_ledger(path: &Path, ledger: &Ledger) -> Result<()> {
    let json = serde_json::to_vec_pretty(ledger).context("serialize history")?;
    atomic_write(path, &json).with_context(|| format!("write history '{}'", path.display()))
}

fn lock_file_path(history: &Path) -> PathBuf {
    let mut name = history
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "history".into());
    name.push(".lock");
    history.with_file_name(name)
}

/// Locked handle on a history file.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    _lock: File,
}

impl HistoryStore {
    /// Lock the history at `path` (blocking until free) and load its ledger.
    pub fn open(path: &Path) -> Result<(Self, Ledger)> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error_with_help("create history dir", parent))?;
        }
        let lock_path = lock_file_path(path);
        let lock = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(io_error_with_help("open history lock", &lock_path))?;

        let start = Instant::now();
        lock.lock_exclusive()
            .map_err(io_error_with_help("lock history", &lock_path))?;
        trace!(path = %lock_path.display(), waited_ms = start.elapsed().as_millis() as u64, "history lock acquired");

        let ledger = load_ledger(path)?;
        debug!(
            path = %path.display(),
            undo = ledger.undo_depth(),
            redo = ledger.redo_depth(),
            "history loaded"
        );
        Ok((
            Self {
                path: path.to_path_buf(),
                _lock: lock,
            },
            ledger,
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        save_ledger(&self.path, ledger)
    }
}
