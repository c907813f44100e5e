use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Overrides `-v`/`-q` with a full filter directive, e.g. `apexpack_unpack=debug`.
pub const LOG_ENV: &str = "APEXPACK_LOG";

pub fn level(verbose: u8, quiet: u8) -> LevelFilter {
    match i16::from(verbose) - i16::from(quiet) {
        i16::MIN..=-2 => LevelFilter::OFF,
        -1 => LevelFilter::ERROR,
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

pub fn init(verbose: u8, quiet: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level(verbose, quiet).to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
