//! Ban manager configuration.

use std::path::PathBuf;

/// Default ban duration: 24 hours.
pub const DEFAULT_BAN_TIME_SECS: u64 = 86_400;

/// Default ban file name, relative to the node data directory.
pub const DEFAULT_BAN_FILE: &str = "banlist.dat";

/// Ban manager configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanManagerConfig {
    /// Duration applied when a ban request carries no positive offset.
    pub default_ban_time_secs: u64,
    /// Where the ban list is persisted.
    pub ban_file: PathBuf,
}

impl Default for BanManagerConfig {
    fn default() -> Self {
        Self {
            default_ban_time_secs: DEFAULT_BAN_TIME_SECS,
            ban_file: PathBuf::from(DEFAULT_BAN_FILE),
        }
    }
}

impl BanManagerConfig {
    /// Testing config with a short default ban.
    pub fn for_testing() -> Self {
        Self {
            default_ban_time_secs: 60,
            ban_file: PathBuf::from(DEFAULT_BAN_FILE),
        }
    }

    /// Builder: set the default ban duration.
    #[must_use]
    pub fn with_default_ban_time(mut self, secs: u64) -> Self {
        self.default_ban_time_secs = secs;
        self
    }

    /// Builder: set the ban file location.
    #[must_use]
    pub fn with_ban_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ban_file = path.into();
        self
    }
}
