//! Ban list persistence adapters.

mod file;
mod memory;

pub use file::{FileBanStore, BAN_FILE_MAGIC, BAN_FILE_VERSION};
pub use memory::InMemoryBanStore;
