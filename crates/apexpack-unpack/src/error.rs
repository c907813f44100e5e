//! Error types for unpack runs.

use std::path::PathBuf;

use thiserror::Error;

use crate::depackager::ToolStatus;

/// Errors that stop a whole run before any entry is touched.
#[derive(Debug, Error)]
pub enum Error {
    #[error("work directory does not exist: {0}")]
    MissingWorkDir(PathBuf),

    #[error("failed to list '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("tool resolution failed: {0}")]
    Tool(#[from] apexpack_platform::Error),

    #[error("log directory: {0}")]
    Logs(#[from] apexpack_fs::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a single entry failed. Stored in the report.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("file name '{0}' has no base name to unpack into")]
    InvalidName(String),

    #[error("normalized apex already exists: {0}")]
    NormalizeTargetExists(PathBuf),

    #[error("output path exists and is not a directory: {0}")]
    OutputNotDir(PathBuf),

    #[error(transparent)]
    Container(#[from] apexpack_archive::Error),

    #[error(transparent)]
    Fs(#[from] apexpack_fs::Error),

    #[error("{action} '{path}': {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Tool(#[from] apexpack_platform::Error),

    #[error("de-packager {status}")]
    DepackagerExit { status: ToolStatus, log: PathBuf },

    #[error("capex decompression {status}")]
    DecompressExit { status: ToolStatus, log: PathBuf },
}

impl EntryError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io {
            action,
            path,
            source,
        }
    }

    /// Log file with the tool output, when the failure came from a tool.
    pub fn log(&self) -> Option<&PathBuf> {
        match self {
            Self::DepackagerExit { log, .. } | Self::DecompressExit { log, .. } => Some(log),
            _ => None,
        }
    }
}
