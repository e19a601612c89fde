//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler, opens a session,
//! dispatches the subcommand, and writes history and config back on the way out.

use anyhow::{Result, anyhow};
use std::path::Path;
use tracing::{debug, error, info, warn};

use folder_levelup::cli::{Args, Command, PlanArgs, RunArgs, ScanArgs};
use folder_levelup::config::{CONFIG_ENV, default_config_path, default_history_path, load_config};
use folder_levelup::logging::init_tracing;
use folder_levelup::output as out;
use folder_levelup::{BatchReport, LedgerStep, LevelUpError, Session, Structure, shutdown};

/// Failed steps listed before the rest are summarized.
const MAX_LISTED_ERRORS: usize = 30;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle print-config before logging init
    if let Command::PrintConfig = args.command {
        print_config_location();
        return Ok(());
    }

    let (loaded, config_path) = load_config().map_err(|e| {
        out::print_error(&format!("Failed to load config: {e:#}"));
        e
    })?;
    // Overrides apply to this command only; `loaded` is what gets written back.
    let mut cfg = loaded.clone();
    args.apply_overrides(&mut cfg);

    // Hold the guard until the end of run() so buffered file logs are flushed
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    if let Err(e) = ctrlc::set_handler(|| {
        shutdown::request();
        out::print_warn("Received interrupt; finishing the current step before exiting...");
    }) {
        warn!(error = %e, "could not install signal handler");
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?config_path,
        log = ?cfg.log_file,
        "folder_levelup starting"
    );
    debug!(?args, "effective arguments");

    let mut session = Session::open(loaded, cfg, config_path).map_err(|e| {
        report_error(&e);
        e
    })?;

    let result = dispatch(&mut session, &args.command);
    if let Err(e) = &result {
        report_error(e);
    }
    let closed = session.close();
    if let Err(e) = &closed {
        error!(error = %e, "failed to write state back");
    }
    if shutdown::is_requested() {
        warn!("interrupted; state was saved before exit");
        out::print_warn("Interrupted; history and config were saved.");
    }

    info!("folder_levelup finished");
    result.and(closed)
}

fn dispatch(session: &mut Session, command: &Command) -> Result<()> {
    match command {
        Command::Scan(s) => scan(session, s),
        Command::Preview(p) => preview(session, p),
        Command::Run(r) => execute(session, r),
        Command::Undo => replay(session.undo()?, "undo", "restored"),
        Command::Redo => replay(session.redo()?, "redo", "re-applied"),
        Command::Rename { path, new_name } => {
            let batch = session.rename(path, new_name)?;
            match batch.records().first() {
                Some(r) => out::print_user(&format!("{} -> {}", r.before.display(), r.after.display())),
                None => out::print_info("Name unchanged; nothing to do."),
            }
            Ok(())
        }
        Command::History => {
            let ledger = session.ledger();
            out::print_user(&format!("undo: {} batch(es)", ledger.undo_depth()));
            if let Some(top) = ledger.peek_undo() {
                out::print_user(&format!("  next undo reverses {} move(s)", top.len()));
            }
            out::print_user(&format!("redo: {} batch(es)", ledger.redo_depth()));
            if let Some(top) = ledger.peek_redo() {
                out::print_user(&format!("  next redo re-applies {} move(s)", top.len()));
            }
            Ok(())
        }
        Command::PrintConfig => {
            print_config_location();
            Ok(())
        }
    }
}

fn scan(session: &mut Session, args: &ScanArgs) -> Result<()> {
    let (root, structure) = session.scan(args.root.as_deref())?;
    print_structure(&root, &structure);
    Ok(())
}

fn print_structure(root: &Path, structure: &Structure) {
    if structure.is_empty() {
        out::print_info(&format!("No Branches found under {}", root.display()));
        return;
    }
    let rel = |p: &Path| p.strip_prefix(root).unwrap_or(p).display().to_string();
    for (branch, leaves) in structure {
        out::print_user(&format!("{}/", rel(branch)));
        for leaf in leaves {
            out::print_user(&format!("  {}/", rel(leaf)));
        }
    }
}

fn preview(session: &mut Session, args: &PlanArgs) -> Result<()> {
    let ops = session.preview(&args.selection())?;
    for op in &ops {
        out::print_operation(op);
    }
    let moving = ops.iter().filter(|op| op.perform()).count();
    out::print_info(&format!("{moving} of {} item(s) will be moved", ops.len()));
    Ok(())
}

fn execute(session: &mut Session, args: &RunArgs) -> Result<()> {
    if shutdown::is_requested() {
        out::print_warn("Interrupted before the run started; nothing was moved.");
        return Ok(());
    }
    let ops = session.preview(&args.plan.selection())?;
    if ops.is_empty() {
        out::print_info("Nothing to move.");
        return Ok(());
    }

    let mut progress = |done: usize, total: usize| out::print_progress(done, total);
    let report = session.execute(&ops, args.dry_run, Some(&mut progress))?;

    if args.dry_run {
        for op in ops.iter().filter(|op| op.perform()) {
            out::print_operation(op);
        }
        out::print_info("Dry-run: nothing was changed.");
        return Ok(());
    }
    out::print_success(&format!("Moved {} item(s)", report.applied.len()));
    finish_batch(&report, "run")
}

fn replay(step: LedgerStep, verb: &str, done: &str) -> Result<()> {
    match step {
        LedgerStep::NoHistory => {
            out::print_info(&format!("No history to {verb}."));
            Ok(())
        }
        LedgerStep::Done(report) => {
            out::print_success(&format!("{} {} item(s)", capitalize(done), report.applied.len()));
            finish_batch(&report, verb)
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// List step failures; a batch with failures makes the command fail.
fn finish_batch(report: &BatchReport, what: &str) -> Result<()> {
    if report.is_clean() {
        return Ok(());
    }
    for e in report.errors.iter().take(MAX_LISTED_ERRORS) {
        out::print_error(&e.to_string());
    }
    if report.errors.len() > MAX_LISTED_ERRORS {
        out::print_error(&format!("... and {} more", report.errors.len() - MAX_LISTED_ERRORS));
    }
    Err(anyhow!("{what}: {} step(s) failed", report.errors.len()))
}

fn report_error(e: &anyhow::Error) {
    if let Some(le) = e.downcast_ref::<LevelUpError>() {
        let code = le.code();
        match le {
            LevelUpError::InvalidRoot(path) => {
                error!(code, kind = "invalid_root", path = %path.display(), "Command failed")
            }
            LevelUpError::NotADirectory(path) => {
                error!(code, kind = "not_a_directory", path = %path.display(), "Command failed")
            }
            LevelUpError::NameTaken(path) => {
                error!(code, kind = "name_taken", path = %path.display(), "Command failed")
            }
            LevelUpError::CorruptHistory { path, reason } => {
                error!(code, kind = "corrupt_history", path = %path.display(), %reason, "Command failed")
            }
            _ => error!(code, error = %le, "Command failed"),
        }
    } else {
        error!(error = %e, "Command failed");
    }
}

fn print_config_location() {
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {}\n", cfg_env));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default folder_levelup config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet; one is written when a command finishes.");
            }
        }
        None => out::print_error("Could not determine a default config path."),
    }
    if let Some(h) = default_history_path() {
        out::print_info(&format!("Default history file:\n  {}\n", h.display()));
    }
}
