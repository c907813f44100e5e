//! The external de-packager seam.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use apexpack_platform::command::Command;
use apexpack_platform::{Result, tool};

/// Exit status of an external tool, reduced to what the report needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToolStatus {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ToolStatus {
    pub const SUCCESS: Self = Self { code: Some(0) };

    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for ToolStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exited with code {code}"),
            None => f.write_str("was terminated by a signal"),
        }
    }
}

/// Unpacks the filesystem image of an APEX into a directory.
///
/// Implementations send tool output to `log`. A non-zero status is returned
/// as a value; `Err` means the tool could not be run at all.
pub trait Depackager {
    fn extract(&self, apex: &Path, dest: &Path, log: &Path) -> Result<ToolStatus>;

    fn decompress(&self, capex: &Path, apex: &Path, log: &Path) -> Result<ToolStatus>;
}

/// Explicit tool locations. Unset fields are looked up on `PATH`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolPaths {
    pub deapexer: Option<PathBuf>,
    pub debugfs: Option<PathBuf>,
    pub fsck_erofs: Option<PathBuf>,
}

/// The `deapexer` host tool.
#[derive(Clone, Debug)]
pub struct Deapexer {
    program: PathBuf,
    debugfs: PathBuf,
    fsck_erofs: PathBuf,
}

impl Deapexer {
    pub const PROGRAM: &'static str = "deapexer";
    pub const DEBUGFS: &'static str = "debugfs";
    pub const FSCK_EROFS: &'static str = "fsck.erofs";

    pub fn new(
        program: impl Into<PathBuf>,
        debugfs: impl Into<PathBuf>,
        fsck_erofs: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            debugfs: debugfs.into(),
            fsck_erofs: fsck_erofs.into(),
        }
    }

    pub fn resolve(tools: &ToolPaths) -> Result<Self> {
        Ok(Self::new(
            tool::resolve(Self::PROGRAM, tools.deapexer.as_deref())?,
            tool::resolve(Self::DEBUGFS, tools.debugfs.as_deref())?,
            tool::resolve(Self::FSCK_EROFS, tools.fsck_erofs.as_deref())?,
        ))
    }

    fn command(&self) -> Command {
        Command::new(&self.program)
            .arg("--debugfs_path")
            .arg(&self.debugfs)
            .arg("--fsckerofs_path")
            .arg(&self.fsck_erofs)
    }

    fn extract_command(&self, apex: &Path, dest: &Path) -> Command {
        self.command().arg("extract").arg(apex).arg(dest)
    }

    fn decompress_command(&self, capex: &Path, apex: &Path) -> Command {
        self.command()
            .arg("decompress")
            .arg("--input")
            .arg(capex)
            .arg("--output")
            .arg(apex)
    }
}

impl Depackager for Deapexer {
    fn extract(&self, apex: &Path, dest: &Path, log: &Path) -> Result<ToolStatus> {
        let status = self.extract_command(apex, dest).log_to(log)?.status()?;
        Ok(status.into())
    }

    fn decompress(&self, capex: &Path, apex: &Path, log: &Path) -> Result<ToolStatus> {
        let status = self.decompress_command(capex, apex).log_to(log)?.status()?;
        Ok(status.into())
    }
}
