//! APEX/CAPEX container access.
//!
//! Both formats are zip files. A CAPEX wraps the uncompressed APEX as the
//! member `original_apex`; both carry the signing key as `apex_pubkey`.
//!
//! - `kind.rs` - container kind from file names
//! - `container.rs` - named-member extraction
//! - `sanitize.rs` - zip-slip prevention

pub use container::{ApexContainer, APEX_PUBKEY, ORIGINAL_APEX};
pub use error::{Error, Result};
pub use kind::ContainerKind;
pub use sanitize::sanitize_member_path;

mod container;
mod error;
mod kind;
mod sanitize;
