use std::fs;
use std::path::{Path, PathBuf};

use apexpack_archive::ContainerKind;

use crate::error::{EntryError, Error, Result};

/// A `.apex`/`.capex` file found in the work directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: PathBuf,
    pub file_name: String,
    /// File name without its final extension.
    pub base_name: String,
    pub kind: ContainerKind,
}

impl ArchiveEntry {
    /// `None` unless the file name contains `.apex`.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let file_name = path.file_name()?.to_str()?.to_string();
        let kind = ContainerKind::from_file_name(&file_name)?;
        let base_name = Path::new(&file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        Some(Self {
            path,
            file_name,
            base_name,
            kind,
        })
    }

    /// An entry named `.apex` has no extension to strip and would unpack
    /// onto itself.
    pub fn validate(&self) -> std::result::Result<(), EntryError> {
        if self.base_name.is_empty() || self.base_name == self.file_name {
            return Err(EntryError::InvalidName(self.file_name.clone()));
        }
        Ok(())
    }

    pub fn work_dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.work_dir().join(&self.base_name)
    }

    /// Where the uncompressed container lives once normalized.
    pub fn apex_path(&self) -> PathBuf {
        match self.kind {
            ContainerKind::Apex => self.path.clone(),
            ContainerKind::Capex => self
                .work_dir()
                .join(format!("{}{}", self.base_name, ContainerKind::APEX_SUFFIX)),
        }
    }
}

/// List the containers directly under `work_dir`, sorted by file name.
///
/// Only regular files are considered; names that are not valid UTF-8 are
/// ignored.
pub fn discover(work_dir: &Path) -> Result<Vec<ArchiveEntry>> {
    let read_err = |source| Error::ReadDir {
        path: work_dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for dirent in fs::read_dir(work_dir).map_err(read_err)? {
        let dirent = dirent.map_err(read_err)?;
        if !dirent.file_type().map_err(read_err)?.is_file() {
            continue;
        }
        if let Some(entry) = ArchiveEntry::from_path(dirent.path()) {
            entries.push(entry);
        }
    }
    entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    tracing::debug!(dir = %work_dir.display(), count = entries.len(), "discovered containers");
    Ok(entries)
}
