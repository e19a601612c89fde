//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - ROOT may be omitted; the last Root used (from the config) is taken instead.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::{Config, LogLevel};
use crate::context::Selection;
use crate::engine::ConflictMode;

/// Promote the contents of nested folders one level up, with preview and undo.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Move the contents of A/B/C folders up into A/B, with preview and undo"
)]
pub struct Args {
    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        global = true,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Use another history file for undo/redo.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub history_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List Branches and their Leaves under ROOT.
    Scan(ScanArgs),
    /// Show what a run would move, without touching anything.
    Preview(PlanArgs),
    /// Move Leaf contents up into their Branch.
    Run(RunArgs),
    /// Reverse the most recent run or rename.
    Undo,
    /// Re-apply the most recently undone batch.
    Redo,
    /// Rename a Branch or Leaf folder in place.
    Rename {
        #[arg(value_hint = ValueHint::DirPath)]
        path: PathBuf,
        new_name: String,
    },
    /// Show the depth of the undo and redo history.
    History,
    /// Print the config file location and exit.
    PrintConfig,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ScanArgs {
    /// Root folder (A); defaults to the last Root used.
    #[arg(value_name = "ROOT", value_hint = ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Include dot-prefixed Branches and Leaves.
    #[arg(long)]
    pub include_hidden: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Limit to the Leaves of this Branch (repeatable; relative to ROOT or absolute).
    #[arg(long = "branch", value_name = "B")]
    pub branches: Vec<PathBuf>,

    /// Limit to this Leaf (repeatable; relative to ROOT or absolute).
    #[arg(long = "leaf", value_name = "C")]
    pub leaves: Vec<PathBuf>,

    /// What to do when the destination name is taken.
    #[arg(long, value_enum)]
    pub mode: Option<ConflictMode>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Show what would be done, but do not modify files/directories.
    #[arg(long)]
    pub dry_run: bool,
}

impl PlanArgs {
    pub fn selection(&self) -> Selection {
        Selection {
            root: self.scan.root.clone(),
            branches: self.branches.clone(),
            leaves: self.leaves.clone(),
        }
    }
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    fn scan_args(&self) -> Option<&ScanArgs> {
        match &self.command {
            Command::Scan(s) => Some(s),
            Command::Preview(p) => Some(&p.scan),
            Command::Run(r) => Some(&r.plan.scan),
            _ => None,
        }
    }

    fn mode(&self) -> Option<ConflictMode> {
        match &self.command {
            Command::Preview(p) => p.mode,
            Command::Run(r) => r.plan.mode,
            _ => None,
        }
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(h) = &self.history_file {
            cfg.history_file = Some(h.clone());
        }
        if let Some(s) = self.scan_args()
            && s.include_hidden
        {
            cfg.include_hidden = true;
        }
        if let Some(mode) = self.mode() {
            cfg.conflict_mode = mode;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
