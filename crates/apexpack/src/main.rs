use std::process::ExitCode;

use anyhow::{Context, Result};
use apexpack_unpack::{Deapexer, RunReport, Unpacker};
use clap::Parser;

use crate::cli::App;
use crate::config::Config;

mod cli;
mod config;
mod logging;
mod report;

fn main() -> ExitCode {
    let app = App::parse();
    logging::init(app.verbose, app.quiet);

    match run(&app) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(app: &App) -> Result<ExitCode> {
    let config = match &app.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let unpacker = Unpacker::new(config.into_options(app));
    let dir = &app.directory;

    let report = if app.dry_run {
        let plan = unpacker
            .plan(dir)
            .with_context(|| format!("failed to scan {}", dir.display()))?;
        RunReport::from_plan(plan)
    } else {
        let tools = unpacker.options().tools.clone();
        unpacker
            .run(dir, || Ok(Deapexer::resolve(&tools)?))
            .with_context(|| format!("failed to unpack {}", dir.display()))?
    };

    if let Some(table) = report::render(&report) {
        println!("{table}");
    }

    // lenient runs keep the legacy exit status regardless of entry failures
    if unpacker.options().strict && report.failed() > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
