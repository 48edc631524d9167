//! # Restart Persistence
//!
//! A registry backed by `FileBanStore` must come back with the same
//! unexpired bans after a restart, drop what expired while it was down,
//! and recover from a damaged ban file by starting empty.

#[cfg(test)]
mod tests {
    use super::super::{addr, init_tracing, net};
    use qc_ban_manager::{
        BanEntry, BanManagerApi, BanManagerConfig, BanMap, BanRegistry, BanStore, FileBanStore,
        ManualTimeSource, NoOpListener, RecordingListener, Timestamp,
    };
    use std::path::Path;
    use std::sync::Arc;

    fn open_at(path: &Path, now: u64, listener: Arc<RecordingListener>) -> BanRegistry {
        BanRegistry::open(
            &BanManagerConfig::default(),
            Arc::new(FileBanStore::new(path)),
            listener,
            Arc::new(ManualTimeSource::new(now)),
        )
    }

    #[test]
    fn test_bans_survive_restart() {
        init_tracing();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banlist.dat");

        let before = {
            let registry = open_at(&path, 1000, Arc::new(RecordingListener::new()));
            registry.ban(net("203.0.113.0/24"), 0, false);
            registry.ban(net("2001:db8::/32"), 3600, false);
            registry.export_snapshot()
        };

        let listener = Arc::new(RecordingListener::new());
        let registry = open_at(&path, 1500, listener.clone());

        assert_eq!(registry.export_snapshot(), before);
        assert!(registry.is_banned(addr("203.0.113.77")));
        assert!(!registry.is_dirty());
        assert_eq!(listener.calls(), 0);
    }

    #[test]
    fn test_bans_expired_while_down_are_dropped_and_rewritten() {
        init_tracing();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banlist.dat");

        {
            let registry = open_at(&path, 1000, Arc::new(RecordingListener::new()));
            registry.ban(net("10.0.0.0/8"), 100, false);
            registry.ban(net("192.168.1.0/24"), 10_000, false);
        }

        let listener = Arc::new(RecordingListener::new());
        let registry = open_at(&path, 2000, listener.clone());

        assert_eq!(listener.calls(), 1);
        assert!(!registry.has_banned_overlap(net("10.0.0.0/8")));
        let on_disk = FileBanStore::new(&path).read().unwrap();
        assert_eq!(on_disk.keys().copied().collect::<Vec<_>>(), vec![net("192.168.1.0/24")]);
    }

    #[test]
    fn test_corrupt_file_is_replaced_with_empty_table() {
        init_tracing();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banlist.dat");
        std::fs::write(&path, [0xABu8; 64]).unwrap();

        let registry = open_at(&path, 1000, Arc::new(RecordingListener::new()));

        assert!(registry.export_snapshot().is_empty());
        assert!(!registry.is_dirty());
        assert_eq!(FileBanStore::new(&path).read().unwrap(), BanMap::new());
    }

    #[test]
    fn test_unnormalized_keys_on_disk_load_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banlist.dat");
        let store = FileBanStore::new(&path);

        let mut bans = BanMap::new();
        bans.insert(
            net("172.16.5.9/12"),
            BanEntry::new(Timestamp::new(1000), Timestamp::new(9000)),
        );
        store.write(&bans).unwrap();

        let registry = open_at(&path, 1000, Arc::new(RecordingListener::new()));

        assert!(registry.is_subnet_banned(net("172.16.0.0/12")));
    }

    #[test]
    fn test_from_config_uses_configured_file() {
        init_tracing();
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("node.toml");
        let ban_file = dir.path().join("state").join("bans.dat");
        std::fs::write(
            &config_path,
            format!(
                "[ban_manager]\ndefault_ban_time_secs = 600\nban_file = {:?}\n",
                ban_file.display().to_string()
            ),
        )
        .unwrap();

        let config = BanManagerConfig::load(&config_path).unwrap();
        {
            let registry = BanRegistry::from_config(&config, Arc::new(NoOpListener));
            assert_eq!(registry.default_ban_time_secs(), 600);
            registry.ban(net("198.51.100.0/24"), 0, false);
        }

        assert!(ban_file.exists());
        let registry = BanRegistry::from_config(&config, Arc::new(NoOpListener));
        assert!(registry.is_banned(addr("198.51.100.1")));
    }
}
