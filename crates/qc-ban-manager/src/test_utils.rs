//! Test utilities for the ban manager.
//!
//! Controllable implementations of the driven ports for deterministic
//! testing. Enable with the `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust,ignore
//! use qc_ban_manager::test_utils::ManualTimeSource;
//! use qc_ban_manager::TimeSource;
//!
//! let time = ManualTimeSource::new(1000);
//! time.advance(5);
//! assert_eq!(time.now().as_secs(), 1005);
//! ```

use crate::domain::{BanMap, BanStoreError, Timestamp};
use crate::ports::{BanListListener, BanStore, TimeSource};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

/// Thread-safe time source that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    time: AtomicU64,
}

impl ManualTimeSource {
    /// Create a time source fixed at `initial` seconds.
    pub fn new(initial: u64) -> Self {
        Self {
            time: AtomicU64::new(initial),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, secs: u64) {
        self.time.fetch_add(secs, Ordering::SeqCst);
    }

    /// Jump the clock to an absolute value.
    pub fn set(&self, secs: u64) {
        self.time.store(secs, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.time.load(Ordering::SeqCst))
    }
}

/// Listener that counts change signals.
#[derive(Debug, Default)]
pub struct RecordingListener {
    calls: AtomicUsize,
}

impl RecordingListener {
    /// Create a listener with a zero count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of signals received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }
}

impl BanListListener for RecordingListener {
    fn banned_list_changed(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Store whose reads always fail and whose writes fail on demand.
///
/// Successful writes are kept so tests can inspect what was persisted.
#[derive(Debug, Default)]
pub struct FailingBanStore {
    fail_writes: AtomicBool,
    attempts: AtomicUsize,
    last_written: parking_lot::Mutex<Option<BanMap>>,
}

impl FailingBanStore {
    /// Create a store that fails reads and, if `fail_writes`, writes too.
    pub fn new(fail_writes: bool) -> Self {
        Self {
            fail_writes: AtomicBool::new(fail_writes),
            ..Self::default()
        }
    }

    /// Toggle write failures.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of write attempts, successful or not.
    pub fn write_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Last table that was written successfully.
    pub fn last_written(&self) -> Option<BanMap> {
        self.last_written.lock().clone()
    }
}

impl BanStore for FailingBanStore {
    fn read(&self) -> Result<BanMap, BanStoreError> {
        Err(BanStoreError::Corrupt("simulated read failure".into()))
    }

    fn write(&self, bans: &BanMap) -> Result<(), BanStoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BanStoreError::Io(std::io::Error::other("simulated write failure")));
        }
        *self.last_written.lock() = Some(bans.clone());
        Ok(())
    }
}
