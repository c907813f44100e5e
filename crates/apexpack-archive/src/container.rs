use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{Error, Result};
use crate::sanitize::sanitize_member_path;

/// Member of a CAPEX holding the uncompressed APEX.
pub const ORIGINAL_APEX: &str = "original_apex";

/// Member holding the public key the payload is signed with.
pub const APEX_PUBKEY: &str = "apex_pubkey";

pub struct ApexContainer {
    path: PathBuf,
    archive: ZipArchive<BufReader<File>>,
}

impl ApexContainer {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| Error::ExtractionFailed {
            path: path.clone(),
            source,
        })?;
        let archive = ZipArchive::new(BufReader::new(file)).map_err(|source| Error::Corrupted {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path, archive })
    }

    /// Extract member `name` to the file `dest`, which must not exist yet.
    /// Returns the number of bytes written.
    pub fn extract_member(&mut self, name: &str, dest: &Path) -> Result<u64> {
        if dest.exists() {
            return Err(Error::DestinationExists(dest.to_path_buf()));
        }
        self.write_member(name, dest, false)
    }

    /// Extract member `name` under `dir`, keeping its relative path and
    /// replacing any previous file. Returns the written path.
    pub fn extract_member_into(&mut self, name: &str, dir: &Path) -> Result<PathBuf> {
        let dest = sanitize_member_path(name, dir)?;
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::ExtractionFailed {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        self.write_member(name, &dest, true)?;
        Ok(dest)
    }

    fn write_member(&mut self, name: &str, dest: &Path, clobber: bool) -> Result<u64> {
        let mut member = self.archive.by_name(name).map_err(|e| match e {
            ZipError::FileNotFound => Error::MemberNotFound {
                path: self.path.clone(),
                member: name.to_string(),
            },
            source => Error::Corrupted {
                path: self.path.clone(),
                source,
            },
        })?;

        let parent = dest.parent().unwrap_or(Path::new("."));
        let extract_err = |source| Error::ExtractionFailed {
            path: dest.to_path_buf(),
            source,
        };

        // Stage next to the destination so a torn copy never carries its name
        let mut staged = tempfile::Builder::new()
            .prefix(".apexpack-")
            .tempfile_in(parent)
            .map_err(extract_err)?;
        let written = io::copy(&mut member, staged.as_file_mut()).map_err(extract_err)?;

        let persisted = if clobber {
            staged.persist(dest)
        } else {
            staged.persist_noclobber(dest)
        };
        persisted.map_err(|e| extract_err(e.error))?;

        tracing::debug!(
            member = name,
            container = %self.path.display(),
            dest = %dest.display(),
            bytes = written,
            "extracted member"
        );
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;

    use super::*;

    fn write_zip(path: &Path, members: &[(&str, &[u8])]) {
        let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
        for (name, data) in members {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn open_rejects_non_zip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.capex");
        fs::write(&path, [0xDE, 0xAD, 0xBE, 0xEF]).unwrap();

        let result = ApexContainer::open(&path);
        assert!(matches!(result, Err(Error::Corrupted { .. })));
    }

    #[test]
    fn open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ApexContainer::open(dir.path().join("missing.apex"));
        assert!(matches!(result, Err(Error::ExtractionFailed { .. })));
    }

    #[test]
    fn extract_member_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let capex = dir.path().join("a.capex");
        write_zip(&capex, &[(ORIGINAL_APEX, b"inner apex bytes")]);

        let dest = dir.path().join("a.apex");
        let written = ApexContainer::open(&capex)
            .unwrap()
            .extract_member(ORIGINAL_APEX, &dest)
            .unwrap();

        assert_eq!(written, 16);
        assert_eq!(fs::read(&dest).unwrap(), b"inner apex bytes");
    }

    #[test]
    fn extract_member_refuses_existing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let capex = dir.path().join("a.capex");
        write_zip(&capex, &[(ORIGINAL_APEX, b"new")]);
        let dest = dir.path().join("a.apex");
        fs::write(&dest, "old").unwrap();

        let result = ApexContainer::open(&capex)
            .unwrap()
            .extract_member(ORIGINAL_APEX, &dest);

        assert!(matches!(result, Err(Error::DestinationExists(_))));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "old");
    }

    #[test]
    fn missing_member_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let apex = dir.path().join("a.apex");
        write_zip(&apex, &[("apex_payload.img", b"img")]);

        let out = dir.path().join("a");
        fs::create_dir(&out).unwrap();
        let result = ApexContainer::open(&apex)
            .unwrap()
            .extract_member_into(APEX_PUBKEY, &out);

        assert!(matches!(result, Err(Error::MemberNotFound { .. })));
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn extract_member_into_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let apex = dir.path().join("a.apex");
        write_zip(&apex, &[(APEX_PUBKEY, b"key")]);
        let out = dir.path().join("a");
        fs::create_dir(&out).unwrap();
        fs::write(out.join(APEX_PUBKEY), "stale").unwrap();

        let written = ApexContainer::open(&apex)
            .unwrap()
            .extract_member_into(APEX_PUBKEY, &out)
            .unwrap();

        assert_eq!(written, out.join(APEX_PUBKEY));
        assert_eq!(fs::read(&written).unwrap(), b"key");
    }
}
