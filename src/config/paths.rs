//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log/history paths and detects symlinked ancestors for safety.

use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::APP_DIR_NAME;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FOLDER_LEVELUP_CONFIG";

/// Config file path: $FOLDER_LEVELUP_CONFIG if set, else the OS config dir.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(p));
    }
    if let Some(mut base) = config_dir() {
        base.push(APP_DIR_NAME);
        base.push("config.xml");
        Some(base)
    } else {
        env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join(APP_DIR_NAME)
                .join("config.xml")
        })
    }
}

/// Per-user data directory for logs and history.
pub fn app_data_dir() -> Option<PathBuf> {
    if let Some(mut base) = data_dir() {
        base.push(APP_DIR_NAME);
        Some(base)
    } else {
        env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".local")
                .join("share")
                .join(APP_DIR_NAME)
        })
    }
}

/// OS-appropriate default log file path (data dir).
pub fn default_log_path() -> Option<PathBuf> {
    app_data_dir().map(|d| d.join("folder_levelup.log"))
}

/// OS-appropriate default Undo/Redo history path (data dir).
pub fn default_history_path() -> Option<PathBuf> {
    app_data_dir().map(|d| d.join("history.json"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn env_override_wins() {
        let td = tempfile::tempdir().unwrap();
        let p = td.path().join("custom.xml");
        unsafe { env::set_var(CONFIG_ENV, &p) };
        let got = default_config_path();
        unsafe { env::remove_var(CONFIG_ENV) };
        assert_eq!(got, Some(p));
    }

    #[test]
    fn data_paths_share_a_directory() {
        if let (Some(log), Some(hist)) = (default_log_path(), default_history_path()) {
            assert_eq!(log.parent(), hist.parent());
        }
    }

    #[cfg(unix)]
    #[test]
    fn detects_symlinked_ancestor() {
        let td = tempfile::tempdir().unwrap();
        let base = fs::canonicalize(td.path()).unwrap();
        let real = base.join("real");
        fs::create_dir_all(&real).unwrap();
        let link = base.join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();
        assert!(path_has_symlink_ancestor(&link.join("file.log")).unwrap());
        assert!(!path_has_symlink_ancestor(&real.join("file.log")).unwrap());
    }
}
