use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("'{path}' is not a valid zip container: {source}")]
    Corrupted {
        path: PathBuf,
        source: zip::result::ZipError,
    },

    #[error("member '{member}' not found in '{path}'")]
    MemberNotFound { path: PathBuf, member: String },

    #[error("zip-slip attack detected: member '{member}' resolves to '{resolved}'")]
    ZipSlip { member: String, resolved: PathBuf },

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed { path: PathBuf, source: io::Error },

    #[error("destination already exists: {0}")]
    DestinationExists(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
