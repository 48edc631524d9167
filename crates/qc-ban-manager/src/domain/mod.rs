//! Domain Layer - Pure ban bookkeeping with no I/O
//!
//! This module contains:
//! - Ban entries and timestamps
//! - Subnet normalization and containment helpers
//! - Ban table (insert-time consolidation, expiry sweep)
//! - Discourage set
//! - Configuration and error types

pub mod ban_table;
pub mod config;
pub mod discourage;
pub mod entities;
pub mod errors;
pub mod subnet;

pub use ban_table::BanTable;
pub use config::{BanManagerConfig, DEFAULT_BAN_FILE, DEFAULT_BAN_TIME_SECS};
pub use discourage::DiscourageSet;
pub use entities::{BanEntry, BanManagerStats, BanMap, Timestamp};
pub use errors::{BanError, BanStoreError};
pub use subnet::{parse_address, parse_subnet};
