//! # Quantum-Chain Ban Manager Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── ban_benchmarks.rs  # Large-table lookup and insert cost
//! │
//! └── src/integration/       # Cross-component scenarios
//!     ├── restart.rs         # Persistence across registry restarts
//!     ├── concurrency.rs     # Many threads against one registry
//!     └── listeners.rs       # Reentrant and channel listeners
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p qc-tests
//!
//! # By category
//! cargo test -p qc-tests integration::restart::
//!
//! # Benchmarks
//! cargo bench -p qc-tests
//! ```

#![allow(dead_code)]

pub mod integration;
