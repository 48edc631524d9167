//! Subnet ban table with insert-time consolidation.

use crate::domain::subnet::{covers, is_superset, normalize, overlaps};
use crate::domain::{BanEntry, BanMap, Timestamp};
use ipnet::IpNet;
use std::net::IpAddr;

/// Mapping from subnet to ban entry, plus dirty bookkeeping.
///
/// # Invariant
///
/// Immediately after `insert(S, T)` returns `true`, no other entry inside
/// `S` expires before `T`. Expired rows may linger until the next `sweep`.
///
/// # Dirty tracking
///
/// `revision` increases on every mutation. A flush records the revision
/// it persisted and clears `dirty` only if nothing changed in between.
#[derive(Debug, Clone, Default)]
pub struct BanTable {
    entries: BanMap,
    dirty: bool,
    revision: u64,
}

impl BanTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a ban on `subnet` until `banned_until`, consolidating
    /// overlapping ranges.
    ///
    /// Returns `false` without touching the table when a different,
    /// broader-or-equal subnet is already banned for at least as long.
    /// An exact-key match is always overwritten, even with an earlier
    /// expiry.
    pub fn insert(&mut self, subnet: IpNet, banned_until: Timestamp, now: Timestamp) -> bool {
        let subnet = normalize(subnet);
        let mut subsumed = Vec::new();

        for (existing, entry) in &self.entries {
            if *existing == subnet {
                continue;
            }
            if is_superset(&subnet, existing) && banned_until > entry.banned_until {
                subsumed.push(*existing);
            } else if is_superset(existing, &subnet) && banned_until <= entry.banned_until {
                return false;
            }
        }

        for existing in &subsumed {
            self.entries.remove(existing);
            tracing::debug!(
                subnet = %existing,
                by = %subnet,
                "[qc-ban] Consolidated ban into broader entry"
            );
        }

        self.entries.insert(subnet, BanEntry::new(now, banned_until));
        self.touch();
        true
    }

    /// Remove the entry with exactly this key.
    pub fn remove(&mut self, subnet: &IpNet) -> bool {
        if self.entries.remove(&normalize(*subnet)).is_none() {
            return false;
        }
        self.touch();
        true
    }

    /// Remove every entry whose subnet covers `addr`. Returns how many.
    pub fn remove_covering(&mut self, addr: &IpAddr) -> usize {
        let before = self.entries.len();
        self.entries.retain(|subnet, _| !covers(subnet, addr));
        let removed = before - self.entries.len();
        if removed > 0 {
            self.touch();
        }
        removed
    }

    /// Drop every entry.
    ///
    /// Always marks the table dirty, even if it was already empty.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.touch();
    }

    /// Remove every entry with `banned_until <= now`. Returns how many.
    ///
    /// Only deletes; remaining entries are never consolidated here.
    pub fn sweep(&mut self, now: Timestamp) -> usize {
        let expired: Vec<IpNet> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_active(now))
            .map(|(subnet, _)| *subnet)
            .collect();

        for subnet in &expired {
            self.entries.remove(subnet);
            tracing::debug!(subnet = %subnet, "[qc-ban] Removed expired ban");
        }
        if !expired.is_empty() {
            self.touch();
        }
        expired.len()
    }

    /// True iff an unexpired entry overlaps `subnet` in either direction.
    ///
    /// Expired rows are skipped by timestamp, so no prior sweep is needed.
    pub fn contains_overlap(&self, subnet: &IpNet, now: Timestamp) -> bool {
        let subnet = normalize(*subnet);
        self.entries
            .iter()
            .any(|(banned, entry)| entry.is_active(now) && overlaps(banned, &subnet))
    }

    /// True iff an unexpired entry covers `addr`.
    pub fn covers_address(&self, addr: &IpAddr, now: Timestamp) -> bool {
        self.entries
            .iter()
            .any(|(banned, entry)| entry.is_active(now) && covers(banned, addr))
    }

    /// True iff an unexpired entry exists with exactly this key.
    pub fn contains_exact(&self, subnet: &IpNet, now: Timestamp) -> bool {
        self.entries
            .get(&normalize(*subnet))
            .is_some_and(|entry| entry.is_active(now))
    }

    /// Sweep, then return an independent copy of what remains.
    ///
    /// Returns the copy and the number of entries the sweep removed.
    pub fn snapshot(&mut self, now: Timestamp) -> (BanMap, usize) {
        let swept = self.sweep(now);
        (self.entries.clone(), swept)
    }

    /// Replace the whole table. Marks dirty.
    pub fn load(&mut self, entries: BanMap) {
        self.entries = entries
            .into_iter()
            .map(|(subnet, entry)| (normalize(subnet), entry))
            .collect();
        self.touch();
    }

    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the stored entry for an exact key.
    pub fn get(&self, subnet: &IpNet) -> Option<&BanEntry> {
        self.entries.get(&normalize(*subnet))
    }

    /// Whether memory differs from the last successful write.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Current mutation revision.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Force the dirty flag (used at startup).
    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Clear the dirty flag if no mutation happened since `revision`.
    pub fn mark_clean(&mut self, revision: u64) -> bool {
        if self.revision != revision {
            return false;
        }
        self.dirty = false;
        true
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.revision = self.revision.wrapping_add(1);
    }
}
