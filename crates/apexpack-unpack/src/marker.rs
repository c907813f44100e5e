//! Completion markers.
//!
//! An output directory only counts as finished when it carries the marker,
//! which is written after the de-packager succeeded.

use std::path::Path;

use apexpack_fs::{AtomicWriteOptions, atomic_write};

pub const COMPLETION_MARKER: &str = ".apexpack-complete";

pub fn is_complete(out_dir: &Path) -> bool {
    out_dir.join(COMPLETION_MARKER).is_file()
}

/// Record that `out_dir` was fully unpacked from `source`.
pub fn mark_complete(out_dir: &Path, source: &str) -> apexpack_fs::Result<()> {
    let content = format!("{source}\n");
    atomic_write(
        out_dir.join(COMPLETION_MARKER),
        content.as_bytes(),
        AtomicWriteOptions::new().sync(true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_round() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_complete(dir.path()));

        mark_complete(dir.path(), "com.android.art.apex").unwrap();

        assert!(is_complete(dir.path()));
        let text = std::fs::read_to_string(dir.path().join(COMPLETION_MARKER)).unwrap();
        assert_eq!(text, "com.android.art.apex\n");
    }

    #[test]
    fn marker_directory_does_not_count() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(COMPLETION_MARKER)).unwrap();
        assert!(!is_complete(dir.path()));
    }
}
