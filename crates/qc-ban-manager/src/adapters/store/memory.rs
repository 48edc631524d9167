use crate::domain::{BanMap, BanStoreError};
use crate::ports::BanStore;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory ban store for ephemeral nodes and tests.
///
/// Starts empty, in which case `read` reports a missing file just like a
/// fresh data directory would.
#[derive(Debug, Default)]
pub struct InMemoryBanStore {
    bans: Mutex<Option<BanMap>>,
    writes: AtomicUsize,
}

impl InMemoryBanStore {
    /// Create a store with nothing persisted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `bans`.
    pub fn with_bans(bans: BanMap) -> Self {
        Self {
            bans: Mutex::new(Some(bans)),
            writes: AtomicUsize::new(0),
        }
    }

    /// Currently persisted table, if any.
    pub fn persisted(&self) -> Option<BanMap> {
        self.bans.lock().clone()
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl BanStore for InMemoryBanStore {
    fn read(&self) -> Result<BanMap, BanStoreError> {
        self.bans.lock().clone().ok_or_else(|| {
            BanStoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no ban list persisted",
            ))
        })
    }

    fn write(&self, bans: &BanMap) -> Result<(), BanStoreError> {
        *self.bans.lock() = Some(bans.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
