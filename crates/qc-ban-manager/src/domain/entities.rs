//! Core Domain Entities for the Ban Manager

use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Unix timestamp in seconds.
///
/// # Security (Timestamp Bounds)
///
/// Values are clamped to a reasonable maximum so that an absolute ban
/// time supplied by an operator can never overflow expiry arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Maximum reasonable timestamp (year 9999).
    pub const MAX_REASONABLE: u64 = 253_402_300_799;

    /// Create a new timestamp, clamping to MAX_REASONABLE.
    pub fn new(secs: u64) -> Self {
        Self(secs.min(Self::MAX_REASONABLE))
    }

    /// Get the raw seconds value.
    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Add seconds, saturating at MAX_REASONABLE.
    pub fn saturating_add_secs(&self, secs: u64) -> Self {
        Self::new(self.0.saturating_add(secs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single recorded ban.
///
/// Immutable once stored: re-banning a subnet replaces the entry rather
/// than editing it. `banned_until` is always absolute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanEntry {
    /// When the ban was recorded.
    pub created_at: Timestamp,
    /// When the ban stops applying.
    pub banned_until: Timestamp,
}

impl BanEntry {
    /// Create an entry recorded at `now` that expires at `banned_until`.
    pub fn new(now: Timestamp, banned_until: Timestamp) -> Self {
        Self {
            created_at: now,
            banned_until,
        }
    }

    /// A ban is in force strictly before its expiry.
    pub fn is_active(&self, now: Timestamp) -> bool {
        now < self.banned_until
    }
}

/// Snapshot of the ban table, ordered by subnet.
pub type BanMap = BTreeMap<IpNet, BanEntry>;

/// Statistics about the ban manager state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BanManagerStats {
    /// Stored ban entries, including expired rows not yet swept
    pub banned_count: usize,
    /// Discouraged addresses
    pub discouraged_count: usize,
    /// Whether memory differs from the last successful write
    pub dirty: bool,
}
