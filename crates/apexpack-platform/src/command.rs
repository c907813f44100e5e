use std::ffi::OsStr;
use std::fs::File;
use std::path::Path;
use std::process::{Command as StdCommand, ExitStatus, Stdio};

use crate::error::{Error, Result};

#[derive(Debug)]
pub struct Command {
    inner: StdCommand,
    program: String,
}

impl Command {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        let program = program.as_ref();
        Self {
            inner: StdCommand::new(program),
            program: program.to_string_lossy().into_owned(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.inner.arg(arg);
        self
    }

    /// Send both stdout and stderr to `path`, truncating it.
    pub fn log_to(mut self, path: &Path) -> Result<Self> {
        let log_err = |source| Error::LogFile {
            path: path.to_path_buf(),
            source,
        };
        let stdout = File::create(path).map_err(log_err)?;
        let stderr = stdout.try_clone().map_err(log_err)?;
        self.inner
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr));
        Ok(self)
    }

    /// Program followed by its arguments, for logging.
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in self.inner.get_args() {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    pub fn status(&mut self) -> Result<ExitStatus> {
        tracing::debug!(cmd = %self.display(), "running");
        self.inner.status().map_err(|e| Error::CommandFailed {
            cmd: self.program.clone(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_command_new() {
        let cmd = Command::new("deapexer");
        assert_eq!(cmd.display(), "deapexer");
    }

    #[test]
    fn test_command_new_path() {
        let cmd = Command::new(PathBuf::from("/usr/bin/deapexer"));
        assert_eq!(cmd.display(), "/usr/bin/deapexer");
    }

    #[test]
    fn test_command_args() {
        let cmd = Command::new("deapexer").arg("extract").arg("a.apex");
        let args: Vec<_> = cmd.inner.get_args().collect();
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_command_display() {
        let cmd = Command::new("deapexer")
            .arg("extract")
            .arg("com.android.art.apex")
            .arg("com.android.art");
        assert_eq!(
            cmd.display(),
            "deapexer extract com.android.art.apex com.android.art"
        );
    }

    #[test]
    fn test_command_missing_program() {
        let mut cmd = Command::new("apexpack_nonexistent_binary_12345");
        let result = cmd.status();
        assert!(matches!(result, Err(Error::CommandFailed { .. })));
    }

    #[test]
    fn test_command_log_to_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = Command::new("echo").log_to(&dir.path().join("missing/out.log"));
        assert!(matches!(result, Err(Error::LogFile { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_log_to_captures_both_streams() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("out.log");
        let status = Command::new("sh")
            .arg("-c")
            .arg("echo out; echo err >&2; exit 3")
            .log_to(&log)
            .unwrap()
            .status()
            .unwrap();

        assert_eq!(status.code(), Some(3));
        let text = std::fs::read_to_string(&log).unwrap();
        assert!(text.contains("out"));
        assert!(text.contains("err"));
    }
}
