//! Domain Errors for the Ban Manager
//!
//! Redundant bans and unbans of unknown subnets are not errors: they are
//! reported as `false` by the registry. These types cover malformed input
//! and the persistence boundary.

use thiserror::Error;

/// Errors from parsing caller-supplied addresses and subnets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BanError {
    /// Not a valid IP address or CIDR subnet.
    #[error("Invalid IP/Subnet: {0}")]
    InvalidSubnet(String),

    /// A single address was required but a range was given.
    #[error("Expected a single IP address, got: {0}")]
    NotSingleAddress(String),
}

/// Errors from the ban list persistence collaborator.
#[derive(Debug, Error)]
pub enum BanStoreError {
    /// Underlying file I/O failed (including a missing ban file).
    #[error("Ban file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File does not start with the ban file magic.
    #[error("Not a ban file (bad magic)")]
    BadMagic,

    /// File was written by an incompatible format version.
    #[error("Unsupported ban file version {found} (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },

    /// Trailing checksum does not match the file contents.
    #[error("Ban file checksum mismatch")]
    ChecksumMismatch,

    /// Body could not be encoded or decoded.
    #[error("Corrupt ban file: {0}")]
    Corrupt(String),
}
