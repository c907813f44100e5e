//! Optional TOML configuration.
//!
//! ```toml
//! strict = true
//! capex_decompressor = "deapexer"
//! keep_logs = "out/apex-logs"
//!
//! [tools]
//! deapexer = "prebuilts/deapexer"
//! debugfs = "/sbin/debugfs"
//! fsck_erofs = "/usr/bin/fsck.erofs"
//! ```
//!
//! Command-line flags take precedence over the file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use apexpack_unpack::{CapexDecompressor, ToolPaths, UnpackOptions};
use serde::Deserialize;

use crate::cli::App;

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub strict: bool,
    pub capex_decompressor: Option<CapexDecompressor>,
    pub keep_logs: Option<PathBuf>,
    pub tools: ToolsConfig,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub deapexer: Option<PathBuf>,
    pub debugfs: Option<PathBuf>,
    pub fsck_erofs: Option<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Merge with the command line, flags winning.
    pub fn into_options(self, app: &App) -> UnpackOptions {
        let tools = ToolPaths {
            deapexer: app.deapexer.clone().or(self.tools.deapexer),
            debugfs: app.debugfs.clone().or(self.tools.debugfs),
            fsck_erofs: app.fsck_erofs.clone().or(self.tools.fsck_erofs),
        };

        UnpackOptions {
            strict: app.strict || self.strict,
            capex: app
                .capex_decompressor
                .or(self.capex_decompressor)
                .unwrap_or_default(),
            keep_logs: app.keep_logs.clone().or(self.keep_logs),
            tools,
        }
    }
}
