use apexpack_unpack::{EntryReport, Outcome, RunReport};
use tabled::{
    Table, Tabled,
    settings::{Panel, Style},
};

#[derive(Debug, Clone, Tabled)]
struct Row {
    entry: String,
    kind: String,
    status: String,
    detail: String,
}

impl From<&EntryReport> for Row {
    fn from(entry: &EntryReport) -> Self {
        let mut detail = entry.outcome.detail();
        // scratch logs are gone by now, kept ones are worth pointing at
        if let Outcome::Failed(e) = &entry.outcome
            && let Some(log) = e.log().filter(|log| log.exists())
        {
            detail.push_str(&format!(" (log: {})", log.display()));
        }

        Self {
            entry: entry.file_name.clone(),
            kind: entry.kind.to_string(),
            status: entry.outcome.label().to_string(),
            detail,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Formatter {
    pub header: Option<String>,
    pub footer: Option<String>,
}

impl Formatter {
    pub fn build<T: Tabled, I: IntoIterator<Item = T>>(self, data: I) -> Table {
        let mut table = Table::new(data);
        if let Some(header) = self.header {
            table.with(Panel::header(header));
        }
        if let Some(footer) = self.footer {
            table.with(Panel::footer(footer));
        }
        table.with(Style::blank());
        table
    }
}

/// Table of per-entry outcomes, or `None` when nothing was found.
pub fn render(report: &RunReport) -> Option<String> {
    if report.is_empty() {
        return None;
    }

    let mut footer = report.summary();
    if let Some(dir) = &report.log_dir {
        footer.push_str(&format!("; logs in {}", dir.display()));
    }

    let table = Formatter {
        header: Some(report.work_dir.display().to_string()),
        footer: Some(footer),
    }
    .build(report.entries.iter().map(Row::from));
    Some(table.to_string())
}
