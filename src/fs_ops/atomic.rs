//! Single-rename move helper.
//! - Performs one rename of the whole item (file or directory); no copy fallback.
//! - On Unix, best-effort fsync of both parent directories after the rename.

use std::fs;
#[cfg(unix)]
use std::fs::File;
use std::io;
use std::path::Path;

pub(super) fn rename_entry(src: &Path, dst: &Path) -> io::Result<()> {
    fs::rename(src, dst)?;

    // Ignore fsync errors to avoid turning a successful rename into a failure.
    #[cfg(unix)]
    {
        if let Some(parent) = dst.parent() {
            let _ = fsync_dir(parent);
        }
        if let Some(parent) = src.parent()
            && Some(parent) != dst.parent()
        {
            let _ = fsync_dir(parent);
        }
    }

    Ok(())
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn moves_directory_with_contents() {
        let td = tempdir().unwrap();
        let src = td.path().join("C").join("sub");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("a.txt"), "A").unwrap();
        let dst = td.path().join("sub");

        rename_entry(&src, &dst).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "A");
    }

    #[test]
    fn missing_source_errors() {
        let td = tempdir().unwrap();
        let err = rename_entry(&td.path().join("nope"), &td.path().join("dst")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
