pub mod atomic_write;
pub mod clear_dir;

pub use atomic_write::{AtomicWriteOptions, atomic_write};
pub use clear_dir::clear_dir;
