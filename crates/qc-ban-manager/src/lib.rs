//! # Peer Ban Manager
//!
//! Authoritative, thread-safe registry of the peer addresses and subnets
//! this node refuses to connect to, plus a softer "discouraged" set used
//! to deprioritize peers without refusing them.
//!
//! Connection admission and RPC query the registry; misbehavior detection
//! elsewhere decides when to ban. This crate performs no network I/O.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** ban table consolidation and sweep, discourage set
//! - **Ports Layer:** `BanManagerApi` in; `BanStore`, `BanListListener`,
//!   `TimeSource` out
//! - **Service Layer:** `BanRegistry`, one lock over all state
//! - **Adapters Layer:** file/in-memory stores, listeners, system clock,
//!   TOML config (feature `config`), broadcast listener (feature `channel`)
//!
//! ## Consolidation
//!
//! Inserting a ban on subnet `S` until `T`:
//! - removes every narrower-or-equal entry that expires before `T`
//! - is a no-op if a different broader-or-equal entry lasts until `T` or later
//! - always overwrites an entry with exactly the key `S`
//!
//! ## Example
//!
//! ```rust
//! use qc_ban_manager::{
//!     BanManagerApi, BanManagerConfig, BanRegistry, InMemoryBanStore, NoOpListener,
//!     SystemTimeSource,
//! };
//! use std::sync::Arc;
//!
//! let registry = BanRegistry::open(
//!     &BanManagerConfig::default(),
//!     Arc::new(InMemoryBanStore::new()),
//!     Arc::new(NoOpListener),
//!     Arc::new(SystemTimeSource::new()),
//! );
//!
//! assert!(registry.ban("203.0.113.0/24".parse().unwrap(), 0, false));
//! assert!(registry.is_banned("203.0.113.9".parse().unwrap()));
//! assert!(registry.has_banned_overlap("203.0.0.0/16".parse().unwrap()));
//! ```

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Test utilities (ManualTimeSource, RecordingListener, FailingBanStore)
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// =============================================================================
// RE-EXPORTS
// =============================================================================

// Domain
pub use domain::{
    parse_address, parse_subnet, BanEntry, BanError, BanManagerConfig, BanManagerStats, BanMap,
    BanStoreError, BanTable, DiscourageSet, Timestamp, DEFAULT_BAN_FILE, DEFAULT_BAN_TIME_SECS,
};

// Port traits
pub use ports::{BanListListener, BanManagerApi, BanStore, TimeSource};

// Service
pub use service::BanRegistry;

// Adapters
pub use adapters::{FileBanStore, InMemoryBanStore, NoOpListener, SystemTimeSource};

#[cfg(feature = "config")]
pub use adapters::ConfigError;

#[cfg(feature = "channel")]
pub use adapters::{BanListChanged, BroadcastListener};

#[cfg(feature = "test-utils")]
pub use test_utils::{FailingBanStore, ManualTimeSource, RecordingListener};

pub use ipnet::IpNet;
