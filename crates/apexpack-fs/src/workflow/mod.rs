pub mod log_dir;

pub use log_dir::LogDir;
