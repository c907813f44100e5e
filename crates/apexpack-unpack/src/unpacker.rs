use std::fs;
use std::path::{Path, PathBuf};

use apexpack_archive::{APEX_PUBKEY, ApexContainer, ContainerKind, ORIGINAL_APEX};
use apexpack_fs::{LogDir, clear_dir};
use tracing::{debug, info, warn};

use crate::depackager::Depackager;
use crate::entry::ArchiveEntry;
use crate::error::{EntryError, Error, Result};
use crate::marker::mark_complete;
use crate::options::{CapexDecompressor, UnpackOptions};
use crate::plan::{Action, Plan};
use crate::report::{Outcome, RunReport};

/// Lines of tool output echoed when a tool fails.
const LOG_TAIL_LINES: usize = 20;

type EntryResult<T> = std::result::Result<T, EntryError>;

pub struct Unpacker {
    options: UnpackOptions,
}

impl Unpacker {
    pub fn new(options: UnpackOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &UnpackOptions {
        &self.options
    }

    /// List the work directory and decide per entry, without side effects.
    pub fn plan(&self, work_dir: &Path) -> Result<Plan> {
        if !work_dir.is_dir() {
            if self.options.strict {
                return Err(Error::MissingWorkDir(work_dir.to_path_buf()));
            }
            warn!(dir = %work_dir.display(), "work directory does not exist, nothing to do");
            return Ok(Plan::empty(work_dir));
        }
        Plan::build(work_dir, self.options.strict)
    }

    /// Plan and execute. `depackager` is only called when some entry needs
    /// an external tool, so directories without work never require one.
    pub fn run<D, F>(&self, work_dir: &Path, depackager: F) -> Result<RunReport>
    where
        D: Depackager,
        F: FnOnce() -> Result<D>,
    {
        let plan = self.plan(work_dir)?;
        if !plan.has_work() {
            let mut report = RunReport::new(&plan.work_dir);
            for item in plan.items {
                let outcome = settle(&item.entry, item.action);
                log_outcome(&item.entry, &outcome);
                report.push(&item.entry, outcome);
            }
            return Ok(report);
        }

        let depackager = depackager()?;
        self.execute(plan, &depackager)
    }

    /// Walk `plan` in order. Entry failures are recorded, not returned.
    pub fn execute<D: Depackager>(&self, plan: Plan, depackager: &D) -> Result<RunReport> {
        let logs = LogDir::new(self.options.keep_logs.as_deref())?;
        let mut report = RunReport::new(&plan.work_dir);
        if logs.is_kept() {
            report.log_dir = Some(logs.path().to_path_buf());
        }

        for item in plan.items {
            let entry = &item.entry;
            let outcome = if item.action.needs_tools() {
                // an earlier entry with the same base name may have finished it
                match Action::for_output(&entry.output_dir(), self.options.strict) {
                    Action::Skip(reason) => Outcome::Skipped(reason),
                    _ => self
                        .unpack_entry(entry, depackager, &logs)
                        .unwrap_or_else(Outcome::Failed),
                }
            } else {
                settle(entry, item.action)
            };

            log_outcome(entry, &outcome);
            report.push(entry, outcome);
        }

        Ok(report)
    }

    fn unpack_entry<D: Depackager>(
        &self,
        entry: &ArchiveEntry,
        depackager: &D,
        logs: &LogDir,
    ) -> EntryResult<Outcome> {
        let strict = self.options.strict;
        let out_dir = entry.output_dir();
        if out_dir.exists() && !out_dir.is_dir() {
            return Err(EntryError::OutputNotDir(out_dir));
        }

        let apex = match entry.kind {
            ContainerKind::Apex => entry.path.clone(),
            ContainerKind::Capex => self.normalize(entry, depackager, logs)?,
        };

        if out_dir.is_dir() {
            debug!(dir = %out_dir.display(), "clearing unmarked output directory");
            clear_dir(&out_dir)?;
        } else {
            fs::create_dir(&out_dir).map_err(EntryError::io("failed to create", &out_dir))?;
        }

        let pubkey = match extract_pubkey(&apex, &out_dir) {
            Ok(found) => found,
            Err(e) if strict => {
                rollback(&out_dir);
                return Err(e);
            }
            Err(e) => {
                warn!(entry = %entry.file_name, error = %e, "could not extract apex_pubkey");
                false
            }
        };

        let log = logs.entry_log(&entry.base_name);
        let status = match depackager.extract(&apex, &out_dir, &log) {
            Ok(status) => status,
            Err(e) => {
                if strict {
                    rollback(&out_dir);
                }
                return Err(e.into());
            }
        };

        if status.success() {
            if let Err(e) = mark_complete(&out_dir, &entry.file_name) {
                // an unmarked leftover is only retried in strict mode
                if strict {
                    rollback(&out_dir);
                } else {
                    remove_source(&apex)?;
                }
                return Err(e.into());
            }
            remove_source(&apex)?;
            return Ok(Outcome::Unpacked { pubkey });
        }

        warn_log_tail(&log);
        if strict {
            rollback(&out_dir);
        } else {
            // the source goes even though unpacking failed
            remove_source(&apex)?;
        }
        Err(EntryError::DepackagerExit { status, log })
    }

    /// Turn a `.capex` into the sibling `.apex` and delete the `.capex`.
    fn normalize<D: Depackager>(
        &self,
        entry: &ArchiveEntry,
        depackager: &D,
        logs: &LogDir,
    ) -> EntryResult<PathBuf> {
        let apex = entry.apex_path();
        if apex.exists() {
            return Err(EntryError::NormalizeTargetExists(apex));
        }

        match self.options.capex {
            CapexDecompressor::Builtin => {
                ApexContainer::open(&entry.path)?.extract_member(ORIGINAL_APEX, &apex)?;
            }
            CapexDecompressor::Deapexer => {
                let log = logs.entry_log(&format!("{}.decompress", entry.base_name));
                let status = depackager.decompress(&entry.path, &apex, &log)?;
                if !status.success() {
                    warn_log_tail(&log);
                    if apex.exists()
                        && let Err(e) = fs::remove_file(&apex)
                    {
                        warn!(apex = %apex.display(), error = %e, "failed to remove partial apex");
                    }
                    return Err(EntryError::DecompressExit { status, log });
                }
            }
        }

        remove_source(&entry.path)?;
        debug!(from = %entry.file_name, to = %apex.display(), "normalized capex");
        Ok(apex)
    }
}

/// Outcome of an entry that never reaches a tool.
fn settle(entry: &ArchiveEntry, action: Action) -> Outcome {
    match action {
        Action::Skip(reason) => Outcome::Skipped(reason),
        Action::Reject(_) => Outcome::Failed(EntryError::InvalidName(entry.file_name.clone())),
        Action::Unpack | Action::Reextract => Outcome::Planned(action),
    }
}

/// `Ok(false)` when the container has no `apex_pubkey`.
fn extract_pubkey(apex: &Path, out_dir: &Path) -> EntryResult<bool> {
    let mut container = ApexContainer::open(apex)?;
    match container.extract_member_into(APEX_PUBKEY, out_dir) {
        Ok(_) => Ok(true),
        Err(apexpack_archive::Error::MemberNotFound { .. }) => {
            warn!(apex = %apex.display(), "container has no apex_pubkey");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

fn remove_source(path: &Path) -> EntryResult<()> {
    fs::remove_file(path).map_err(EntryError::io("failed to remove", path))
}

fn rollback(out_dir: &Path) {
    if let Err(e) = fs::remove_dir_all(out_dir) {
        warn!(dir = %out_dir.display(), error = %e, "failed to remove output directory");
    }
}

fn warn_log_tail(log: &Path) {
    let Ok(text) = fs::read_to_string(log) else {
        return;
    };
    let lines: Vec<&str> = text.lines().collect();
    let tail = lines[lines.len().saturating_sub(LOG_TAIL_LINES)..].join("\n");
    if !tail.is_empty() {
        warn!(log = %log.display(), "tool output:\n{tail}");
    }
}

fn log_outcome(entry: &ArchiveEntry, outcome: &Outcome) {
    match outcome {
        Outcome::Unpacked { .. } => info!(entry = %entry.file_name, "unpacked"),
        Outcome::Skipped(reason) => info!(entry = %entry.file_name, %reason, "skipped"),
        Outcome::Failed(e) => warn!(entry = %entry.file_name, error = %e, "failed"),
        Outcome::Planned(action) => info!(entry = %entry.file_name, %action, "planned"),
    }
}
