use std::path::PathBuf;

use apexpack_unpack::CapexDecompressor;
use clap::{ArgAction, Parser};

/// Unpack every .apex/.capex in a directory into a same-named directory.
#[derive(Clone, Debug, Parser)]
#[command(name = "apex_extractor", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct App {
    /// Directory holding the containers
    pub directory: PathBuf,

    /// Fail on de-packager errors and only trust completion markers
    #[arg(long)]
    pub strict: bool,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "de-packager binary [default: deapexer on PATH]")]
    pub deapexer: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "debugfs binary [default: debugfs on PATH]")]
    pub debugfs: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "fsck.erofs binary [default: fsck.erofs on PATH]")]
    pub fsck_erofs: Option<PathBuf>,

    /// How to turn .capex into .apex: builtin or deapexer
    #[arg(long, value_name = "KIND")]
    pub capex_decompressor: Option<CapexDecompressor>,

    /// Keep de-packager logs in this directory
    #[arg(long, value_name = "DIR")]
    pub keep_logs: Option<PathBuf>,

    /// Show what would be done without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// More log output (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less log output (repeatable)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_only() {
        let app = App::try_parse_from(["apex_extractor", "system/apex"]).unwrap();
        assert_eq!(app.directory, PathBuf::from("system/apex"));
        assert!(!app.strict);
        assert!(!app.dry_run);
        assert_eq!(app.capex_decompressor, None);
    }

    #[test]
    fn directory_is_required() {
        assert!(App::try_parse_from(["apex_extractor"]).is_err());
    }

    #[test]
    fn all_flags() {
        let app = App::try_parse_from([
            "apex_extractor",
            "--strict",
            "--deapexer",
            "/opt/deapexer",
            "--fsck-erofs",
            "/opt/fsck.erofs",
            "--capex-decompressor",
            "deapexer",
            "--keep-logs",
            "logs",
            "-vv",
            "out/apex",
        ])
        .unwrap();
        assert!(app.strict);
        assert_eq!(app.deapexer, Some(PathBuf::from("/opt/deapexer")));
        assert_eq!(app.fsck_erofs, Some(PathBuf::from("/opt/fsck.erofs")));
        assert_eq!(app.capex_decompressor, Some(CapexDecompressor::Deapexer));
        assert_eq!(app.verbose, 2);
    }

    #[test]
    fn unknown_decompressor_is_rejected() {
        let result =
            App::try_parse_from(["apex_extractor", "--capex-decompressor", "7z", "out/apex"]);
        assert!(result.is_err());
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(App::try_parse_from(["apex_extractor", "-v", "-q", "out/apex"]).is_err());
    }
}
