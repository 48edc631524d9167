//! # Driven Ports (Outbound SPI)
//!
//! These are the interfaces the ban manager **requires** the host
//! application to provide: durable storage, change notification and time.

use crate::domain::{BanMap, BanStoreError, Timestamp};

/// Durable storage for the ban table.
///
/// # Contract
///
/// - `read` returns the whole table or an error, never partial state.
/// - `write` replaces the previous contents atomically: a crash mid-write
///   must not leave a file that later reads back as valid but wrong.
///
/// Implementations log their own failures; the registry only decides
/// whether to keep the table dirty.
pub trait BanStore: Send + Sync {
    /// Load the persisted table.
    fn read(&self) -> Result<BanMap, BanStoreError>;

    /// Persist the full table.
    fn write(&self, bans: &BanMap) -> Result<(), BanStoreError>;
}

/// Receiver of the "banned list changed" signal.
///
/// Invoked synchronously after the state lock is released, so an
/// implementation may call straight back into the registry.
pub trait BanListListener: Send + Sync {
    /// The ban table changed (ban, unban, clear or expiry sweep).
    fn banned_list_changed(&self);
}

impl<F> BanListListener for F
where
    F: Fn() + Send + Sync,
{
    fn banned_list_changed(&self) {
        self()
    }
}

/// Abstract interface for time-related operations.
///
/// Enables deterministic testing by injecting controllable time sources.
pub trait TimeSource: Send + Sync {
    /// Get the current timestamp.
    fn now(&self) -> Timestamp;
}
