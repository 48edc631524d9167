//! # Adapters
//!
//! Concrete implementations of the driven ports.
//!
//! - `FileBanStore` / `InMemoryBanStore` - ban list persistence
//! - `SystemTimeSource` - production clock
//! - `NoOpListener` / `BroadcastListener` - change notification
//! - TOML config loading (requires "config" feature)

// Semantic submodules
/// Configuration loading
#[cfg(feature = "config")]
pub mod config;
/// Change notification
pub mod notify;
/// Ban list persistence
pub mod store;
/// Time source adapters
pub mod time;

// Re-export public API
pub use notify::NoOpListener;
pub use store::{FileBanStore, InMemoryBanStore, BAN_FILE_MAGIC, BAN_FILE_VERSION};
pub use time::SystemTimeSource;

#[cfg(feature = "config")]
pub use config::ConfigError;

#[cfg(feature = "channel")]
pub use notify::{BanListChanged, BroadcastListener};
