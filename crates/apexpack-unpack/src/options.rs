use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::depackager::ToolPaths;

/// How a `.capex` is turned into a `.apex`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapexDecompressor {
    /// Copy the `original_apex` zip member out in-process.
    #[default]
    Builtin,
    /// Run `deapexer decompress --input <capex> --output <apex>`.
    Deapexer,
}

impl CapexDecompressor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Builtin => "builtin",
            Self::Deapexer => "deapexer",
        }
    }
}

impl fmt::Display for CapexDecompressor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CapexDecompressor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "builtin" => Ok(Self::Builtin),
            "deapexer" => Ok(Self::Deapexer),
            other => Err(format!(
                "unknown capex decompressor '{other}', expected 'builtin' or 'deapexer'"
            )),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct UnpackOptions {
    /// Fail entries on a non-zero de-packager exit and trust only
    /// completion markers when skipping.
    pub strict: bool,
    pub capex: CapexDecompressor,
    /// Persist tool logs here instead of a scratch directory.
    pub keep_logs: Option<PathBuf>,
    pub tools: ToolPaths,
}

impl UnpackOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn capex(mut self, capex: CapexDecompressor) -> Self {
        self.capex = capex;
        self
    }

    pub fn keep_logs(mut self, dir: impl Into<PathBuf>) -> Self {
        self.keep_logs = Some(dir.into());
        self
    }

    pub fn tools(mut self, tools: ToolPaths) -> Self {
        self.tools = tools;
        self
    }
}
