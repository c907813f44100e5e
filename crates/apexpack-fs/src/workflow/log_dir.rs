use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::{Error, Result};

/// Directory holding captured tool output for one run.
///
/// A scratch directory is removed when the value is dropped, including on
/// early return or unwinding. A kept directory is created if needed and left
/// in place.
#[derive(Debug)]
pub enum LogDir {
    Scratch(TempDir),
    Kept(PathBuf),
}

impl LogDir {
    pub fn scratch() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("apexpack-logs-")
            .tempdir()
            .map_err(Error::Scratch)?;
        Ok(Self::Scratch(dir))
    }

    pub fn kept(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;
        Ok(Self::Kept(path))
    }

    /// Scratch unless `keep` names a directory to persist logs into.
    pub fn new(keep: Option<&Path>) -> Result<Self> {
        match keep {
            Some(path) => Self::kept(path),
            None => Self::scratch(),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Scratch(dir) => dir.path(),
            Self::Kept(path) => path,
        }
    }

    pub fn is_kept(&self) -> bool {
        matches!(self, Self::Kept(_))
    }

    /// Path of the log file for an entry named `stem`.
    pub fn entry_log(&self, stem: &str) -> PathBuf {
        self.path().join(format!("{stem}.log"))
    }
}
