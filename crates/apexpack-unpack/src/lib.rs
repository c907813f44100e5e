//! Batch unpacking of APEX/CAPEX containers.
//!
//! A run has two phases. [`Unpacker::plan`] lists the containers of a work
//! directory and decides which need work; [`Unpacker::execute`] walks the
//! plan in order, normalizing CAPEX files, extracting `apex_pubkey` and
//! handing each APEX to a [`Depackager`].
//!
//! Every outcome lands in a [`RunReport`]. Failures of one entry never stop
//! the others.

pub use apexpack_archive::{APEX_PUBKEY, ORIGINAL_APEX};
pub use depackager::{Deapexer, Depackager, ToolPaths, ToolStatus};
pub use entry::{ArchiveEntry, discover};
pub use error::{EntryError, Error, Result};
pub use marker::{COMPLETION_MARKER, is_complete, mark_complete};
pub use options::{CapexDecompressor, UnpackOptions};
pub use plan::{Action, Plan, PlannedEntry, SkipReason};
pub use report::{EntryReport, Outcome, RunReport};
pub use unpacker::Unpacker;

mod depackager;
mod entry;
mod error;
mod marker;
mod options;
mod plan;
mod report;
mod unpacker;
