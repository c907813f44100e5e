//! Locating external tools.
//!
//! A tool is either given by explicit path, which must exist, or looked up by
//! name on `PATH` at resolution time.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub fn resolve(name: &str, explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) if path.exists() => Ok(path.to_path_buf()),
        Some(path) => Err(Error::ToolMissing(path.to_path_buf())),
        None => which::which(name).map_err(|source| Error::ToolNotFound {
            name: name.to_string(),
            source,
        }),
    }
    .inspect(|path| tracing::debug!(tool = name, path = %path.display(), "resolved tool"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_existing_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("deapexer");
        std::fs::write(&tool, "").unwrap();

        assert_eq!(resolve("deapexer", Some(&tool)).unwrap(), tool);
    }

    #[test]
    fn explicit_missing_path_is_error() {
        let result = resolve("deapexer", Some(Path::new("/nonexistent/deapexer")));
        assert!(matches!(result, Err(Error::ToolMissing(_))));
    }

    #[test]
    fn unknown_name_is_not_found() {
        let result = resolve("apexpack_nonexistent_binary_12345", None);
        assert!(matches!(result, Err(Error::ToolNotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn name_is_looked_up_on_path() {
        let path = resolve("sh", None).unwrap();
        assert!(path.is_absolute());
    }
}
