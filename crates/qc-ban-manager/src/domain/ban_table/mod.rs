//! Ban Table Implementation
//!
//! Subnet → ban entry mapping that consolidates overlapping ranges at
//! insertion time and sweeps expired rows on demand.

mod table;

pub use table::BanTable;
