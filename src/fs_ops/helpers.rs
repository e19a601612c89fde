//! I/O helper utilities.
//!
//! Provides small adapters to enrich io::Error with actionable context/hints,
//! usable with map_err in anyhow::Result code paths and when building per-step
//! error strings for a batch report.
//!
//! Usage:
//!   // in functions returning anyhow::Result<_>
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create dir", dir))?;
//!
//!   // when recording a failed step
//!   StepError::new(src, dst, describe_io_error("move", &e));

use anyhow::anyhow;
use std::io;
use std::path::Path;

#[cfg(unix)]
use libc;

/// Platform-aware hint for an io::Error, or an empty string when none applies.
fn hint_for(e: &io::Error) -> String {
    let mut msg = String::new();

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" (permission denied; check ownership and write permissions)");
                }
                libc::EXDEV => {
                    msg.push_str(" (cross-filesystem; a single rename is not possible)");
                }
                libc::EBUSY => {
                    msg.push_str(" (resource busy; ensure no other process is using it)");
                }
                libc::ENOENT => {
                    msg.push_str(" (path not found; it may have been moved or deleted)");
                }
                libc::EEXIST | libc::ENOTEMPTY => {
                    msg.push_str(" (target already exists)");
                }
                libc::ENOTDIR | libc::EISDIR => {
                    msg.push_str(" (file/directory type mismatch between source and target)");
                }
                libc::EROFS => {
                    msg.push_str(" (read-only filesystem)");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" (filename or path too long)");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str(" (access denied; check permissions)"), // ERROR_ACCESS_DENIED
                17 => msg.push_str(" (not same device; cross-filesystem move)"), // ERROR_NOT_SAME_DEVICE
                32 => msg.push_str(" (sharing violation; file is in use)"), // ERROR_SHARING_VIOLATION
                2 | 3 => msg.push_str(" (path not found; it may have been moved or deleted)"),
                80 | 183 => msg.push_str(" (target already exists)"), // ERROR_FILE_EXISTS / ERROR_ALREADY_EXISTS
                206 => msg.push_str(" (filename or path too long)"), // ERROR_FILENAME_EXCED_RANGE
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" (permission denied; check ownership and write permissions)");
            }
            io::ErrorKind::NotFound => {
                msg.push_str(" (path not found; it may have been moved or deleted)");
            }
            io::ErrorKind::AlreadyExists => {
                msg.push_str(" (target already exists)");
            }
            _ => {}
        }
    }

    msg
}

/// Human-friendly description of a failed step, without the paths (the caller has them).
pub fn describe_io_error(op: &str, e: &io::Error) -> String {
    format!("{op}: {e}{}", hint_for(e))
}

/// Adapter for anyhow::Result code.
/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> anyhow::Error.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!("{} '{}': {}{}", op, path.display(), e, hint_for(&e))
}
