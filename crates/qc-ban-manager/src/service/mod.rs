//! # Ban Registry Service
//!
//! Orchestrates the ban table and discourage set behind a single lock,
//! drives load-on-start, write-through persistence and change
//! notification, and implements the `BanManagerApi` driving port.
//!
//! Ordering on every mutating call: mutate under the lock, release it,
//! then notify and flush.

// Semantic submodules
mod api;
mod core;
mod lifecycle;

// Re-export public API
pub use core::BanRegistry;
