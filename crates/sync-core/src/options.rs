//! Per-pass options

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How symbolic links found in the source tree are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymlinkPolicy {
    /// Symlinks in the source are ignored; a replica entry at the same path
    /// is removed like any other extraneous entry.
    #[default]
    Skip,
    /// Symlinks are resolved and their targets mirrored as regular files
    /// and directories.
    Follow,
}

impl SymlinkPolicy {
    pub fn follows(self) -> bool {
        self == Self::Follow
    }
}

impl fmt::Display for SymlinkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Follow => write!(f, "follow"),
        }
    }
}

impl FromStr for SymlinkPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "follow" => Ok(Self::Follow),
            other => Err(format!(
                "invalid symlink policy '{}': expected 'skip' or 'follow'",
                other
            )),
        }
    }
}

/// Options for a synchronization pass
#[derive(Debug, Clone, Copy, Default)]
pub struct PassOptions {
    /// If true, plan and report actions without touching the replica.
    pub dry_run: bool,
    /// Treatment of symlinks in the source tree
    pub symlinks: SymlinkPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Follow".parse::<SymlinkPolicy>(), Ok(SymlinkPolicy::Follow));
        assert_eq!("skip".parse::<SymlinkPolicy>(), Ok(SymlinkPolicy::Skip));
        assert!("copy".parse::<SymlinkPolicy>().is_err());
    }

    #[test]
    fn default_skips() {
        assert_eq!(PassOptions::default().symlinks, SymlinkPolicy::Skip);
        assert!(!PassOptions::default().dry_run);
    }
}
