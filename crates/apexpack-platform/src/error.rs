use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("tool not found on PATH: {name}")]
    ToolNotFound {
        name: String,
        #[source]
        source: which::Error,
    },

    #[error("tool path does not exist: {0}")]
    ToolMissing(PathBuf),

    #[error("command failed: {cmd}, source: {source}")]
    CommandFailed { cmd: String, source: std::io::Error },

    #[error("failed to open log file '{path}': {source}")]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },
}
