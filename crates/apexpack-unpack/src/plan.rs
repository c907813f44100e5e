use std::fmt;
use std::path::{Path, PathBuf};

use crate::entry::{ArchiveEntry, discover};
use crate::error::Result;
use crate::marker::is_complete;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The output directory exists; nothing else is checked.
    OutputExists,
    /// The output directory carries a completion marker.
    Completed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutputExists => f.write_str("output directory exists"),
            Self::Completed => f.write_str("already unpacked"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Unpack,
    /// An unmarked output directory is cleared and unpacked again.
    Reextract,
    Skip(SkipReason),
    Reject(String),
}

impl Action {
    pub fn needs_tools(&self) -> bool {
        matches!(self, Self::Unpack | Self::Reextract)
    }

    /// Decide what to do with an output directory in its current state.
    pub fn for_output(out_dir: &Path, strict: bool) -> Self {
        if !out_dir.is_dir() {
            Self::Unpack
        } else if !strict {
            Self::Skip(SkipReason::OutputExists)
        } else if is_complete(out_dir) {
            Self::Skip(SkipReason::Completed)
        } else {
            Self::Reextract
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unpack => f.write_str("unpack"),
            Self::Reextract => f.write_str("re-extract"),
            Self::Skip(reason) => write!(f, "skip ({reason})"),
            Self::Reject(reason) => write!(f, "reject ({reason})"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PlannedEntry {
    pub entry: ArchiveEntry,
    pub action: Action,
}

/// What a run would do, computed without touching the work directory.
#[derive(Clone, Debug, Default)]
pub struct Plan {
    pub work_dir: PathBuf,
    pub items: Vec<PlannedEntry>,
}

impl Plan {
    pub fn build(work_dir: &Path, strict: bool) -> Result<Self> {
        let items = discover(work_dir)?
            .into_iter()
            .map(|entry| {
                let action = match entry.validate() {
                    Ok(()) => Action::for_output(&entry.output_dir(), strict),
                    Err(e) => Action::Reject(e.to_string()),
                };
                PlannedEntry { entry, action }
            })
            .collect();

        Ok(Self {
            work_dir: work_dir.to_path_buf(),
            items,
        })
    }

    pub fn empty(work_dir: &Path) -> Self {
        Self {
            work_dir: work_dir.to_path_buf(),
            items: Vec::new(),
        }
    }

    /// Whether any entry would run an external tool.
    pub fn has_work(&self) -> bool {
        self.items.iter().any(|item| item.action.needs_tools())
    }
}
