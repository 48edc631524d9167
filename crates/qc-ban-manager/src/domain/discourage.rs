//! Discouraged address set.
//!
//! A softer signal than a ban: discouraged peers are deprioritized for
//! connection slots but not refused. Exact-address membership only, no
//! expiry, never persisted.

use super::subnet::address_key;
use std::collections::HashSet;
use std::net::IpAddr;

/// Set of raw address identity bytes.
#[derive(Debug, Clone, Default)]
pub struct DiscourageSet {
    keys: HashSet<Vec<u8>>,
}

impl DiscourageSet {
    /// Create a new empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an address as discouraged. Idempotent.
    pub fn discourage(&mut self, addr: &IpAddr) {
        self.keys.insert(address_key(addr));
    }

    /// Exact-match membership test.
    pub fn is_discouraged(&self, addr: &IpAddr) -> bool {
        self.keys.contains(&address_key(addr))
    }

    /// Number of discouraged addresses.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True if no address is discouraged.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
