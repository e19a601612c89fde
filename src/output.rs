use owo_colors::OwoColorize;

use crate::engine::{Operation, Status};

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn is_err_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_err_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_err_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Print a plain user-facing line (no prefix). Use this for primary outputs
/// which users may script against.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// One preview row: `<name>  →  <dst>  [<status>]`.
pub fn format_operation(op: &Operation) -> String {
    let name = op
        .src()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| op.src().display().to_string());
    format!("{}  →  {}  [{}]", name, op.dst().display(), op.status())
}

/// Print a preview row, colored by status on a TTY.
pub fn print_operation(op: &Operation) {
    let line = format_operation(op);
    if !is_tty() {
        println!("{}", line);
        return;
    }
    match op.status() {
        Status::Ok => println!("{}", line),
        Status::Rename(_) => println!("{}", line.cyan()),
        Status::Overwrite => println!("{}", line.yellow()),
        Status::SkipConflict | Status::NoFreeName => println!("{}", line.dimmed()),
    }
}

/// Progress line on stderr; redrawn in place on a TTY.
pub fn print_progress(done: usize, total: usize) {
    if is_err_tty() {
        eprint!("\r{} {}/{}", "progress:".dimmed(), done, total);
        if done == total {
            eprintln!();
        }
    } else if done == total {
        eprintln!("progress: {}/{}", done, total);
    }
}
