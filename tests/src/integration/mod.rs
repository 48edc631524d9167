//! # Integration Scenarios
//!
//! Exercise `BanRegistry` through its public surface only, wired to the
//! real file store or to the feature-gated adapters.

pub mod concurrency;
pub mod listeners;
pub mod restart;

use qc_ban_manager::IpNet;
use std::net::IpAddr;

/// Install a test subscriber once so `[qc-ban]` logs show up with `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn net(s: &str) -> IpNet {
    s.parse().unwrap()
}

pub fn addr(s: &str) -> IpAddr {
    s.parse().unwrap()
}
