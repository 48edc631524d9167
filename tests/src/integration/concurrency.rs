//! # Concurrent Access
//!
//! Many threads ban, unban and query one shared registry. Every operation
//! must behave as if serialized and the file on disk must end up matching
//! memory once the last flush lands.

#[cfg(test)]
mod tests {
    use super::super::{addr, init_tracing, net};
    use qc_ban_manager::{
        BanManagerApi, BanManagerConfig, BanRegistry, BanStore, FileBanStore, IpNet,
        ManualTimeSource, RecordingListener,
    };
    use rand::Rng;
    use std::sync::Arc;
    use std::thread;

    const WORKERS: u8 = 8;
    const BANS_PER_WORKER: u8 = 64;

    fn shared_registry(path: &std::path::Path) -> (Arc<BanRegistry>, Arc<RecordingListener>) {
        let listener = Arc::new(RecordingListener::new());
        let registry = BanRegistry::open(
            &BanManagerConfig::default(),
            Arc::new(FileBanStore::new(path)),
            listener.clone(),
            Arc::new(ManualTimeSource::new(10_000)),
        );
        (Arc::new(registry), listener)
    }

    #[test]
    fn test_parallel_bans_all_land_on_disk() {
        init_tracing();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banlist.dat");
        let (registry, listener) = shared_registry(&path);

        let handles: Vec<_> = (0..WORKERS)
            .map(|worker| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for host in 0..BANS_PER_WORKER {
                        let subnet: IpNet = format!("10.{worker}.{host}.0/24").parse().unwrap();
                        assert!(registry.ban(subnet, 0, false));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let expected = usize::from(WORKERS) * usize::from(BANS_PER_WORKER);
        assert_eq!(listener.calls(), expected);
        assert_eq!(registry.export_snapshot().len(), expected);
        assert!(!registry.is_dirty());
        assert_eq!(FileBanStore::new(&path).read().unwrap(), registry.export_snapshot());
    }

    #[test]
    fn test_readers_never_see_half_consolidated_table() {
        let dir = tempfile::tempdir().unwrap();
        let (registry, _) = shared_registry(&dir.path().join("banlist.dat"));
        for host in 0..=255u8 {
            registry.ban(net(&format!("172.16.0.{host}/32")), 100, false);
        }

        let reader = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..500 {
                    // The /24 replaces the /32s in one step, so a covered
                    // address is banned before, during and after.
                    assert!(registry.is_banned(addr("172.16.0.42")));
                }
            })
        };
        registry.ban(net("172.16.0.0/24"), 1000, false);
        reader.join().unwrap();

        assert_eq!(registry.export_snapshot().len(), 1);
    }

    #[test]
    fn test_mixed_random_workload_keeps_invariants() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banlist.dat");
        let (registry, _) = shared_registry(&path);

        thread::scope(|scope| {
            for _ in 0..WORKERS {
                let registry = &registry;
                scope.spawn(move || {
                    let mut rng = rand::thread_rng();
                    for _ in 0..200 {
                        let octet: u8 = rng.gen_range(0..16);
                        let prefix: u8 = [8, 16, 24, 32][rng.gen_range(0..4)];
                        let subnet: IpNet = format!("10.{octet}.{octet}.{octet}/{prefix}")
                            .parse::<IpNet>()
                            .unwrap()
                            .trunc();
                        match rng.gen_range(0..4) {
                            0 => {
                                registry.unban(subnet);
                            }
                            1 => {
                                registry.discourage(subnet.addr());
                            }
                            2 => {
                                let _ = registry.has_banned_overlap(subnet);
                            }
                            _ => {
                                registry.ban(subnet, rng.gen_range(1..5000), false);
                            }
                        }
                    }
                });
            }
        });

        let snapshot = registry.export_snapshot();
        for (subnet, entry) in &snapshot {
            assert_eq!(*subnet, subnet.trunc());
            assert!(entry.banned_until.as_secs() > 10_000);
        }
        registry.flush().unwrap();
        assert_eq!(FileBanStore::new(&path).read().unwrap(), snapshot);
    }
}
