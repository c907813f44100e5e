use std::io::Write;
use std::path::Path;

use crate::{Error, Result};

#[derive(Clone, Copy, Debug, Default)]
pub struct AtomicWriteOptions {
    pub sync: bool,
}

impl AtomicWriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }
}

/// Write `content` to `path` through a sibling temporary file and a rename,
/// so readers observe either the old file, no file, or the full content.
pub fn atomic_write(
    path: impl AsRef<Path>,
    content: &[u8],
    options: AtomicWriteOptions,
) -> Result<()> {
    let path = path.as_ref();
    let parent = path
        .parent()
        .ok_or_else(|| Error::NoParent(path.to_path_buf()))?;

    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".apexpack-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(write_err)?;

    tmp.write_all(content).map_err(write_err)?;

    if options.sync {
        tmp.as_file().sync_all().map_err(write_err)?;
    }

    // the temporary file is unlinked on drop if persisting fails
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn writes_new_file() -> Result<()> {
        let dir = tempdir().map_err(Error::Scratch)?;
        let path = dir.path().join("marker");
        atomic_write(&path, b"done", AtomicWriteOptions::new())?;
        assert_eq!(fs::read(&path).unwrap(), b"done");
        Ok(())
    }

    #[test]
    fn replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("marker");
        fs::write(&path, "old").unwrap();

        atomic_write(&path, b"new", AtomicWriteOptions::new().sync(true)).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn leaves_no_temporary_files() {
        let dir = tempdir().unwrap();
        atomic_write(dir.path().join("a"), b"x", AtomicWriteOptions::new()).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("a")]);
    }

    #[test]
    fn missing_parent_is_a_write_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("marker");
        let result = atomic_write(&path, b"x", AtomicWriteOptions::new());
        assert!(matches!(result, Err(Error::Write { .. })));
    }
}
