//! Filesystem primitives used by the unpacker.
//!
//! - `primitives/` - atomic writes and directory clearing
//! - `workflow/` - scoped log directories

mod error;
pub mod primitives;
pub mod workflow;

pub use error::{Error, Result};
pub use primitives::{AtomicWriteOptions, atomic_write, clear_dir};
pub use workflow::LogDir;
