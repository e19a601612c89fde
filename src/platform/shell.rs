//! Desktop shell change notification.
//!
//! Purely advisory: tells a file manager that a path changed so open windows refresh.
//! Only Windows Explorer needs this; every other platform gets a no-op.

use std::path::Path;

/// Receiver of "this path changed" hints.
pub trait ShellNotifier {
    /// A file or directory at `path` was created or updated.
    fn path_updated(&self, path: &Path, is_dir: bool);
    /// `old` was renamed to `new`.
    fn path_renamed(&self, old: &Path, new: &Path, is_folder: bool);
}

/// Notifier that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl ShellNotifier for NoopNotifier {
    fn path_updated(&self, _path: &Path, _is_dir: bool) {}
    fn path_renamed(&self, _old: &Path, _new: &Path, _is_folder: bool) {}
}

/// Notifier for the host desktop shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemNotifier;

#[cfg(not(windows))]
impl ShellNotifier for SystemNotifier {
    fn path_updated(&self, _path: &Path, _is_dir: bool) {}
    fn path_renamed(&self, _old: &Path, _new: &Path, _is_folder: bool) {}
}

#[cfg(windows)]
impl ShellNotifier for SystemNotifier {
    fn path_updated(&self, path: &Path, is_dir: bool) {
        use windows_sys::Win32::UI::Shell::{SHCNE_UPDATEDIR, SHCNE_UPDATEITEM, SHCNF_PATHW, SHChangeNotify};

        let wide = to_wide(path);
        let event = if is_dir { SHCNE_UPDATEDIR } else { SHCNE_UPDATEITEM };
        unsafe {
            SHChangeNotify(event as _, SHCNF_PATHW as _, wide.as_ptr() as _, std::ptr::null());
        }
    }

    fn path_renamed(&self, old: &Path, new: &Path, is_folder: bool) {
        use windows_sys::Win32::UI::Shell::{
            SHCNE_ALLEVENTS, SHCNE_RENAMEFOLDER, SHCNE_RENAMEITEM, SHCNF_FLUSH, SHCNF_PATHW, SHChangeNotify,
        };

        let old_w = to_wide(old);
        let new_w = to_wide(new);
        let event = if is_folder { SHCNE_RENAMEFOLDER } else { SHCNE_RENAMEITEM };
        unsafe {
            SHChangeNotify(event as _, SHCNF_PATHW as _, old_w.as_ptr() as _, new_w.as_ptr() as _);
            SHChangeNotify(SHCNE_ALLEVENTS as _, SHCNF_FLUSH as _, std::ptr::null(), std::ptr::null());
        }
    }
}

#[cfg(windows)]
fn to_wide(path: &Path) -> Vec<u16> {
    use std::iter::once;
    use std::os::windows::ffi::OsStrExt;
    path.as_os_str().encode_wide().chain(once(0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_notifier_never_panics_on_missing_paths() {
        let n = SystemNotifier;
        n.path_updated(Path::new("/definitely/not/here"), false);
        n.path_renamed(Path::new("/nope/a"), Path::new("/nope/b"), true);
    }
}
