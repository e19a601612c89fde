//! Non-colliding sibling names.
//!
//! One algorithm serves three callers, parameterized by a suffix tag:
//! - Rename conflicts:  "x.txt" -> "x_1.txt", "x_2.txt", ...
//! - Undo placement:    "x.txt" -> "x_undo1.txt", "x_undo2.txt", ...
//! - Redo placement:    "x.txt" -> "x_redo1.txt", "x_redo2.txt", ...
//!
//! The numeric part always starts at 1 and the first free candidate wins, so the result is the
//! smallest free suffix. The search is capped at MAX_SUFFIX attempts.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::errors::LevelUpError;

use super::FileSystem;

/// Upper bound on numbered candidates tried before giving up.
pub const MAX_SUFFIX: u32 = 10_000;

/// Which family of numbered names to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixTag {
    /// `_<n>`, used by the Rename conflict mode.
    Rename,
    /// `_undo<n>`, used when an undo target is occupied.
    Undo,
    /// `_redo<n>`, used when a redo target is occupied.
    Redo,
}

impl SuffixTag {
    pub fn as_str(self) -> &'static str {
        match self {
            SuffixTag::Rename => "_",
            SuffixTag::Undo => "_undo",
            SuffixTag::Redo => "_redo",
        }
    }
}

/// Return `base` when it is free, otherwise the first free `<stem><tag><n><.ext>` next to it.
pub fn free_sibling(fs: &dyn FileSystem, base: &Path, tag: SuffixTag) -> Result<PathBuf, LevelUpError> {
    if !fs.exists(base) {
        return Ok(base.to_path_buf());
    }
    numbered_sibling(fs, base, tag)
}

/// First free `<stem><tag><n><.ext>` next to `base`, starting at n = 1 (base itself is not tried).
pub fn numbered_sibling(fs: &dyn FileSystem, base: &Path, tag: SuffixTag) -> Result<PathBuf, LevelUpError> {
    let stem: OsString = base
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    let ext: Option<OsString> = base.extension().map(|e| e.to_os_string());

    for n in 1..=MAX_SUFFIX {
        let suffix = format!("{}{n}", tag.as_str());
        let name = build_name_with_suffix(&stem, ext.as_deref(), &suffix);
        let candidate = base.with_file_name(&name);
        if !fs.exists(&candidate) {
            return Ok(candidate);
        }
    }

    warn!(base = %base.display(), tag = tag.as_str(), tries = MAX_SUFFIX, "sibling: no free name");
    Err(LevelUpError::NameSpaceExhausted {
        base: base.to_path_buf(),
        tries: MAX_SUFFIX,
    })
}

// Conservative filename limits (bytes/characters, platform-specific and approximate).
#[cfg(windows)]
const MAX_FILENAME_LEN: usize = 240; // leave headroom for legacy MAX_PATH
#[cfg(not(windows))]
const MAX_FILENAME_LEN: usize = 255; // typical POSIX/EXT limits

#[cfg(unix)]
fn name_len_units(s: &OsStr) -> usize {
    use std::os::unix::ffi::OsStrExt;
    s.as_bytes().len()
}

#[cfg(not(unix))]
fn name_len_units(s: &OsStr) -> usize {
    s.to_string_lossy().len()
}

/// Join `stem + suffix + ["." + ext]`, shrinking the stem if the result would not fit in one
/// filename component.
fn build_name_with_suffix(stem: &OsStr, ext: Option<&OsStr>, suffix: &str) -> OsString {
    let mut overhead = name_len_units(OsStr::new(suffix));
    let mut ext_part = OsString::new();
    if let Some(e) = ext {
        overhead = overhead.saturating_add(1 + name_len_units(e));
        ext_part.push(".");
        ext_part.push(e);
    }

    let mut stem_os = stem.to_os_string();
    if name_len_units(&stem_os) + overhead > MAX_FILENAME_LEN {
        let budget = MAX_FILENAME_LEN.saturating_sub(overhead).max(1);
        let lossy = stem.to_string_lossy();
        let mut acc = String::new();
        for ch in lossy.chars() {
            acc.push(ch);
            if name_len_units(OsStr::new(&acc)) > budget {
                acc.pop();
                break;
            }
        }
        if acc.is_empty() {
            acc.push('f');
        }
        stem_os = OsString::from(acc);
    }

    let mut new_name = OsString::new();
    new_name.push(&stem_os);
    new_name.push(suffix);
    new_name.push(&ext_part);
    new_name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_goes_before_extension() {
        let n = build_name_with_suffix(OsStr::new("x"), Some(OsStr::new("txt")), "_1");
        assert_eq!(n, OsString::from("x_1.txt"));
    }

    #[test]
    fn no_extension_appends_at_end() {
        let n = build_name_with_suffix(OsStr::new("folder"), None, "_undo2");
        assert_eq!(n, OsString::from("folder_undo2"));
    }

    #[test]
    fn long_stem_is_truncated_to_fit() {
        let stem = "a".repeat(400);
        let n = build_name_with_suffix(OsStr::new(&stem), Some(OsStr::new("bin")), "_12");
        assert!(name_len_units(&n) <= MAX_FILENAME_LEN);
        assert!(n.to_string_lossy().ends_with("_12.bin"));
    }

    #[test]
    fn tags_render_as_expected() {
        assert_eq!(SuffixTag::Rename.as_str(), "_");
        assert_eq!(SuffixTag::Undo.as_str(), "_undo");
        assert_eq!(SuffixTag::Redo.as_str(), "_redo");
    }
}
