//! Typed error definitions for folder_levelup.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LevelUpError {
    #[error("Root is not a directory: {0}")]
    InvalidRoot(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Folder name must not be empty")]
    EmptyName,

    #[error("A folder with that name already exists: {0}")]
    NameTaken(PathBuf),

    #[error("No free name found next to {base} after {tries} attempts")]
    NameSpaceExhausted { base: PathBuf, tries: u32 },

    #[error("History file is corrupt: {path}: {reason}")]
    CorruptHistory { path: PathBuf, reason: String },
}

impl LevelUpError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            LevelUpError::InvalidRoot(_) => 10,
            LevelUpError::NotADirectory(_) => 11,
            LevelUpError::EmptyName => 20,
            LevelUpError::NameTaken(_) => 21,
            LevelUpError::NameSpaceExhausted { .. } => 30,
            LevelUpError::CorruptHistory { .. } => 40,
        }
    }
}

/// One failed step of a batch (move, overwrite-delete, undo or redo).
///
/// Displayed as `<src> -> <dst> : <error>` so a whole batch can be shown as a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepError {
    pub src: PathBuf,
    pub dst: PathBuf,
    pub message: String,
}

impl StepError {
    pub fn new(src: impl Into<PathBuf>, dst: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} : {}", self.src.display(), self.dst.display(), self.message)
    }
}

impl std::error::Error for StepError {}
