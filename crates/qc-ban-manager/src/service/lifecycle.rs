use crate::domain::{BanManagerStats, BanMap, BanStoreError};
use crate::service::BanRegistry;
use std::time::Instant;

impl BanRegistry {
    /// Write the table to the store if it is dirty.
    ///
    /// Always sweeps first so expired bans are never persisted. On success
    /// the dirty flag is cleared unless another mutation landed while the
    /// write was in flight; on failure it stays set and the next flush
    /// retries.
    pub fn flush(&self) -> Result<(), BanStoreError> {
        let (result, swept) = self.write_if_dirty();
        if swept > 0 {
            self.notify();
        }
        result
    }

    fn write_if_dirty(&self) -> (Result<(), BanStoreError>, usize) {
        let _writer = self.flush_guard.lock();
        let now = self.now();

        let (bans, revision, swept) = {
            let mut state = self.state.lock();
            let swept = state.table.sweep(now);
            if !state.table.is_dirty() {
                return (Ok(()), swept);
            }
            let (bans, _) = state.table.snapshot(now);
            (bans, state.table.revision(), swept)
        };

        let started = Instant::now();
        if let Err(e) = self.store.write(&bans) {
            return (Err(e), swept);
        }
        self.state.lock().table.mark_clean(revision);

        tracing::debug!(
            count = bans.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "[qc-ban] Flushed banned subnets to ban file"
        );
        (Ok(()), swept)
    }

    /// Flush on behalf of a mutating call; failures stay local.
    pub(crate) fn flush_logged(&self) {
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "[qc-ban] Ban list write failed; will retry on next flush");
        }
    }

    /// Remove expired bans. Notifies iff something was removed.
    pub fn sweep(&self) -> usize {
        let now = self.now();
        let swept = self.state.lock().table.sweep(now);
        if swept > 0 {
            self.notify();
        }
        swept
    }

    /// Replace the whole table (startup restore or operator import).
    ///
    /// Marks the table dirty; the caller decides whether to flush.
    pub fn load(&self, bans: BanMap) {
        self.state.lock().table.load(bans);
    }

    /// Whether memory differs from the last successful write.
    pub fn is_dirty(&self) -> bool {
        self.state.lock().table.is_dirty()
    }

    /// Current counters.
    pub fn stats(&self) -> BanManagerStats {
        let state = self.state.lock();
        BanManagerStats {
            banned_count: state.table.len(),
            discouraged_count: state.discouraged.len(),
            dirty: state.table.is_dirty(),
        }
    }

    /// Sweep and write out any pending changes.
    ///
    /// Runs automatically on drop. A failed write here is logged and
    /// otherwise dropped.
    pub fn shutdown(&self) {
        self.flush_logged();
    }
}

impl Drop for BanRegistry {
    fn drop(&mut self) {
        self.shutdown();
    }
}
