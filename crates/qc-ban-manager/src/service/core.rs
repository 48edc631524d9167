use crate::adapters::{FileBanStore, SystemTimeSource};
use crate::domain::{BanManagerConfig, BanTable, DiscourageSet, Timestamp};
use crate::ports::{BanListListener, BanStore, TimeSource};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;

/// Everything guarded by the registry's single state lock.
#[derive(Debug, Default)]
pub(crate) struct BanState {
    /// Ban entries plus the dirty flag
    pub(crate) table: BanTable,
    /// Soft deprioritization set
    pub(crate) discouraged: DiscourageSet,
}

/// Process-wide ban registry.
///
/// Composes the ban table and discourage set behind one mutex, loads the
/// persisted table on construction, writes through on every mutation and
/// flushes once more on drop.
///
/// ## Thread Safety
///
/// Share via `Arc<BanRegistry>`. Every operation takes the state lock for
/// its in-memory work only; listener calls and store writes happen after
/// the lock is released, so a listener may call back into the registry.
///
/// A second mutex serializes writers so that an older snapshot never lands
/// on disk after a newer one. It guards no ban state and is never acquired
/// while the state lock is held.
///
/// # Example
///
/// ```rust,ignore
/// use qc_ban_manager::{BanManagerApi, BanManagerConfig, BanRegistry, NoOpListener};
///
/// let registry = BanRegistry::from_config(&BanManagerConfig::default(), Arc::new(NoOpListener));
/// registry.ban("203.0.113.0/24".parse()?, 0, false);
/// assert!(registry.is_banned("203.0.113.9".parse()?));
/// ```
pub struct BanRegistry {
    pub(crate) state: Mutex<BanState>,
    pub(crate) flush_guard: Mutex<()>,
    pub(crate) default_ban_time_secs: u64,
    pub(crate) store: Arc<dyn BanStore>,
    pub(crate) listener: Arc<dyn BanListListener>,
    pub(crate) time_source: Arc<dyn TimeSource>,
}

impl BanRegistry {
    /// Create the registry and load the persisted ban list.
    ///
    /// On a successful read the loaded table is taken as matching disk,
    /// then swept; if the sweep removed anything the cleaned table is
    /// written back immediately. On a failed read (missing, corrupt or
    /// version mismatch) the registry starts empty and writes a fresh file.
    pub fn open(
        config: &BanManagerConfig,
        store: Arc<dyn BanStore>,
        listener: Arc<dyn BanListListener>,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        let registry = Self {
            state: Mutex::new(BanState::default()),
            flush_guard: Mutex::new(()),
            default_ban_time_secs: config.default_ban_time_secs,
            store,
            listener,
            time_source,
        };
        registry.startup();
        registry
    }

    /// Create a registry persisting to `config.ban_file` on the system clock.
    pub fn from_config(config: &BanManagerConfig, listener: Arc<dyn BanListListener>) -> Self {
        Self::open(
            config,
            Arc::new(FileBanStore::new(&config.ban_file)),
            listener,
            Arc::new(SystemTimeSource::new()),
        )
    }

    fn startup(&self) {
        let started = Instant::now();

        match self.store.read() {
            Ok(bans) => {
                {
                    let mut state = self.state.lock();
                    state.table.load(bans);
                    state.table.set_dirty(false);
                }
                let swept = self.sweep();
                let loaded = self.state.lock().table.len();
                tracing::info!(
                    loaded,
                    expired = swept,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "[qc-ban] Loaded banned subnets from ban file"
                );
            }
            Err(e) => {
                tracing::info!(error = %e, "[qc-ban] Invalid or missing ban file; recreating");
                self.state.lock().table.set_dirty(true);
            }
        }

        self.flush_logged();
    }

    /// Get the current timestamp from the time source.
    pub(crate) fn now(&self) -> Timestamp {
        self.time_source.now()
    }

    /// Configured default ban duration in seconds.
    pub fn default_ban_time_secs(&self) -> u64 {
        self.default_ban_time_secs
    }

    /// Resolve a caller's ban offset into an absolute expiry.
    pub(crate) fn resolve_expiry(&self, offset_secs: i64, since_epoch: bool, now: Timestamp) -> Timestamp {
        if offset_secs <= 0 {
            return now.saturating_add_secs(self.default_ban_time_secs);
        }
        let offset = offset_secs as u64;
        if since_epoch {
            Timestamp::new(offset)
        } else {
            now.saturating_add_secs(offset)
        }
    }

    /// Signal the listener. Never call with the state lock held.
    pub(crate) fn notify(&self) {
        self.listener.banned_list_changed();
    }
}

impl std::fmt::Debug for BanRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("BanRegistry")
            .field("banned", &state.table.len())
            .field("discouraged", &state.discouraged.len())
            .field("dirty", &state.table.is_dirty())
            .field("default_ban_time_secs", &self.default_ban_time_secs)
            .finish()
    }
}
