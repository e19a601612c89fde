//! Engine data model: conflict modes, planned operations and the reversible move records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Scan result: Branch (B) -> its Leaves (C).
pub type Structure = BTreeMap<PathBuf, Vec<PathBuf>>;

/// Policy applied when a promoted item's name is already taken in the Branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConflictMode {
    /// Leave the item where it is.
    #[default]
    Skip,
    /// Delete the existing target, then move.
    Overwrite,
    /// Move under the first free `<stem>_<n><.ext>` name.
    Rename,
}

impl ConflictMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Some(ConflictMode::Skip),
            "overwrite" => Some(ConflictMode::Overwrite),
            "rename" => Some(ConflictMode::Rename),
            _ => None,
        }
    }
}

impl fmt::Display for ConflictMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConflictMode::Skip => "skip",
            ConflictMode::Overwrite => "overwrite",
            ConflictMode::Rename => "rename",
        };
        f.write_str(s)
    }
}

impl FromStr for ConflictMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid conflict mode: '{s}'"))
    }
}

/// Outcome of conflict resolution for one planned operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Destination was free.
    Ok,
    /// Destination taken and mode is Skip.
    SkipConflict,
    /// Destination taken; it is deleted right before the move.
    Overwrite,
    /// Destination taken; moved under this free base name instead.
    Rename(String),
    /// Destination taken and no free numbered name was found.
    NoFreeName,
}

impl Status {
    /// True when execution must clear the destination before moving.
    pub fn overwrites(&self) -> bool {
        matches!(self, Status::Overwrite)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => f.write_str("OK"),
            Status::SkipConflict => f.write_str("SKIP(conflict)"),
            Status::Overwrite => f.write_str("OVERWRITE"),
            Status::Rename(name) => write!(f, "RENAME→{name}"),
            Status::NoFreeName => f.write_str("SKIP(no free name)"),
        }
    }
}

/// One planned promotion step: a direct child of a Leaf and where it goes in the Branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    src: PathBuf,
    dst: PathBuf,
    status: Status,
    perform: bool,
}

impl Operation {
    pub fn new(src: impl Into<PathBuf>, dst: impl Into<PathBuf>, status: Status, perform: bool) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
            status,
            perform,
        }
    }

    pub fn src(&self) -> &Path {
        &self.src
    }

    pub fn dst(&self) -> &Path {
        &self.dst
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn perform(&self) -> bool {
        self.perform
    }
}

/// A completed move: where the item was and where it went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub before: PathBuf,
    pub after: PathBuf,
}

impl MoveRecord {
    pub fn new(before: impl Into<PathBuf>, after: impl Into<PathBuf>) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
        }
    }
}

/// Ordered moves produced by one execution, undo or redo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveBatch(Vec<MoveRecord>);

impl MoveBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MoveRecord) {
        self.0.push(record);
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<MoveRecord>> for MoveBatch {
    fn from(records: Vec<MoveRecord>) -> Self {
        Self(records)
    }
}

impl<'a> IntoIterator for &'a MoveBatch {
    type Item = &'a MoveRecord;
    type IntoIter = std::slice::Iter<'a, MoveRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Outcome of a batch: the moves that happened and the steps that failed.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub applied: MoveBatch,
    pub errors: Vec<crate::errors::StepError>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
