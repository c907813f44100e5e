use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Remove every child of `dir`, keeping `dir` itself.
pub fn clear_dir(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    let read_err = |source| Error::Read {
        path: dir.to_path_buf(),
        source,
    };

    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        let is_dir = entry.file_type().map_err(read_err)?.is_dir();

        let removed = if is_dir {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.map_err(|source| Error::Remove { path, source })?;
    }

    Ok(())
}
