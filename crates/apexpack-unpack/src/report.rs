use std::path::PathBuf;

use apexpack_archive::ContainerKind;

use crate::entry::ArchiveEntry;
use crate::error::EntryError;
use crate::plan::{Action, Plan, SkipReason};

#[derive(Debug)]
pub enum Outcome {
    /// Dry run: what would have happened.
    Planned(Action),
    Unpacked {
        /// Whether `apex_pubkey` was found in the container.
        pubkey: bool,
    },
    Skipped(SkipReason),
    Failed(EntryError),
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Planned(_) => "planned",
            Self::Unpacked { .. } => "unpacked",
            Self::Skipped(_) => "skipped",
            Self::Failed(_) => "failed",
        }
    }

    pub fn detail(&self) -> String {
        match self {
            Self::Planned(action) => action.to_string(),
            Self::Unpacked { pubkey: true } => String::new(),
            Self::Unpacked { pubkey: false } => "no apex_pubkey".to_string(),
            Self::Skipped(reason) => reason.to_string(),
            Self::Failed(e) => e.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct EntryReport {
    pub file_name: String,
    pub base_name: String,
    pub kind: ContainerKind,
    pub outcome: Outcome,
}

impl EntryReport {
    pub fn new(entry: &ArchiveEntry, outcome: Outcome) -> Self {
        Self {
            file_name: entry.file_name.clone(),
            base_name: entry.base_name.clone(),
            kind: entry.kind,
            outcome,
        }
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub work_dir: PathBuf,
    pub entries: Vec<EntryReport>,
    /// Set when tool logs were kept on disk.
    pub log_dir: Option<PathBuf>,
}

impl RunReport {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            ..Self::default()
        }
    }

    pub fn from_plan(plan: Plan) -> Self {
        let entries = plan
            .items
            .into_iter()
            .map(|item| EntryReport::new(&item.entry, Outcome::Planned(item.action)))
            .collect();
        Self {
            work_dir: plan.work_dir,
            entries,
            log_dir: None,
        }
    }

    pub fn push(&mut self, entry: &ArchiveEntry, outcome: Outcome) {
        self.entries.push(EntryReport::new(entry, outcome));
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }

    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Unpacked { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed(_)))
    }

    pub fn planned(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Planned(_)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.planned() > 0 {
            return format!("{} planned", self.planned());
        }
        format!(
            "{} unpacked, {} skipped, {} failed",
            self.succeeded(),
            self.skipped(),
            self.failed()
        )
    }
}
