use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// `.` is a wildcard here: any character followed by `apex`.
static CONTAINER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r".apex").expect("container pattern is valid"));

/// Container flavor, decided by file name alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Apex,
    Capex,
}

impl ContainerKind {
    pub const APEX_SUFFIX: &'static str = ".apex";
    pub const CAPEX_SUFFIX: &'static str = ".capex";

    /// Whether `name` looks like a container at all. The match is the loose
    /// `.apex` pattern, so `foo.capex`, `foo.apex.bak` and `foo_apex` all
    /// qualify while a bare `apex` does not.
    pub fn matches(name: &str) -> bool {
        CONTAINER_PATTERN.is_match(name)
    }

    /// Kind of a matching name: `Capex` for a `.capex` suffix, `Apex` otherwise.
    pub fn from_file_name(name: &str) -> Option<Self> {
        if !Self::matches(name) {
            return None;
        }
        if name.ends_with(Self::CAPEX_SUFFIX) {
            Some(Self::Capex)
        } else {
            Some(Self::Apex)
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Apex => "apex",
            Self::Capex => "capex",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
