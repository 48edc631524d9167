use crate::domain::{BanEntry, BanMap, BanStoreError};
use crate::ports::BanStore;
use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Leading bytes of every ban file.
pub const BAN_FILE_MAGIC: [u8; 4] = *b"QCBN";

/// Current on-disk format version.
pub const BAN_FILE_VERSION: u32 = 1;

const HEADER_LEN: usize = 8;
const CHECKSUM_LEN: usize = 32;

#[derive(Serialize, Deserialize)]
struct BanFileBody {
    entries: Vec<(IpNet, BanEntry)>,
}

/// File-backed ban store.
///
/// # File Format
///
/// ```text
/// [magic: "QCBN"][version: u32 LE][bincode body][sha256 of everything before]
/// ```
///
/// Writes go to a temp file that is synced and then renamed over the
/// target, so a crash mid-write leaves the previous file intact.
#[derive(Debug, Clone)]
pub struct FileBanStore {
    path: PathBuf,
}

impl FileBanStore {
    /// Create a store for the given ban file path. Nothing is touched yet.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the ban file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize a table into the ban file format.
    pub fn encode(bans: &BanMap) -> Result<Vec<u8>, BanStoreError> {
        let body = BanFileBody {
            entries: bans.iter().map(|(subnet, entry)| (*subnet, *entry)).collect(),
        };
        let body = bincode::serialize(&body).map_err(|e| BanStoreError::Corrupt(e.to_string()))?;

        let mut bytes = Vec::with_capacity(HEADER_LEN + body.len() + CHECKSUM_LEN);
        bytes.extend_from_slice(&BAN_FILE_MAGIC);
        bytes.extend_from_slice(&BAN_FILE_VERSION.to_le_bytes());
        bytes.extend_from_slice(&body);
        let checksum = Sha256::digest(&bytes);
        bytes.extend_from_slice(&checksum);
        Ok(bytes)
    }

    /// Parse the ban file format. Never returns partial state.
    pub fn decode(bytes: &[u8]) -> Result<BanMap, BanStoreError> {
        if bytes.len() < HEADER_LEN + CHECKSUM_LEN {
            return Err(BanStoreError::Corrupt(format!(
                "truncated ban file ({} bytes)",
                bytes.len()
            )));
        }
        if bytes[..4] != BAN_FILE_MAGIC {
            return Err(BanStoreError::BadMagic);
        }

        let version = u32::from_le_bytes(
            bytes[4..HEADER_LEN]
                .try_into()
                .map_err(|_| BanStoreError::Corrupt("short version field".into()))?,
        );
        if version != BAN_FILE_VERSION {
            return Err(BanStoreError::VersionMismatch {
                found: version,
                expected: BAN_FILE_VERSION,
            });
        }

        let (content, checksum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
        if Sha256::digest(content).as_slice() != checksum {
            return Err(BanStoreError::ChecksumMismatch);
        }

        let body: BanFileBody = bincode::deserialize(&content[HEADER_LEN..])
            .map_err(|e| BanStoreError::Corrupt(e.to_string()))?;
        Ok(body.entries.into_iter().collect())
    }

    /// Directory holding the ban file; `.` for a bare file name.
    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn write_atomic(&self, bytes: &[u8]) -> Result<(), BanStoreError> {
        let parent = self.parent_dir();
        std::fs::create_dir_all(parent)?;

        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        std::fs::rename(&temp_path, &self.path)?;
        sync_dir(parent)?;
        Ok(())
    }
}

/// Flush a directory entry so a completed rename survives power loss.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::File::open(dir)?.sync_all()
}

/// Directory handles cannot be opened for syncing here.
#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

impl BanStore for FileBanStore {
    fn read(&self) -> Result<BanMap, BanStoreError> {
        let bytes = std::fs::read(&self.path)?;
        Self::decode(&bytes).inspect_err(|e| {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "[qc-ban] Rejected ban file"
            );
        })
    }

    fn write(&self, bans: &BanMap) -> Result<(), BanStoreError> {
        let bytes = Self::encode(bans)?;
        self.write_atomic(&bytes).inspect_err(|e| {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "[qc-ban] Failed to write ban file"
            );
        })
    }
}
