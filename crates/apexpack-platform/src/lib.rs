pub use error::{Error, Result};

pub mod command;
mod error;
pub mod tool;
