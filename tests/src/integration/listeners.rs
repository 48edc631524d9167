//! # Listener Integration
//!
//! The change signal is delivered after the state lock is released, so a
//! listener can read the registry it is attached to. The broadcast adapter
//! carries the same signal to async consumers such as an RPC layer.

#[cfg(test)]
mod tests {
    use super::super::{addr, net};
    use qc_ban_manager::{
        BanListListener, BanManagerApi, BanManagerConfig, BanRegistry, BroadcastListener,
        InMemoryBanStore, ManualTimeSource,
    };
    use parking_lot::Mutex;
    use std::sync::{Arc, OnceLock, Weak};
    use std::time::Duration;

    /// Listener that snapshots the registry it observes on every change.
    struct SnapshottingListener {
        registry: OnceLock<Weak<BanRegistry>>,
        sizes: Mutex<Vec<usize>>,
    }

    impl BanListListener for SnapshottingListener {
        fn banned_list_changed(&self) {
            if let Some(registry) = self.registry.get().and_then(Weak::upgrade) {
                let size = registry.export_snapshot().len();
                // Writes from inside the callback must not deadlock either.
                registry.discourage(addr("192.0.2.1"));
                self.sizes.lock().push(size);
            }
        }
    }

    #[test]
    fn test_listener_reads_registry_during_callback() {
        let listener = Arc::new(SnapshottingListener {
            registry: OnceLock::new(),
            sizes: Mutex::new(Vec::new()),
        });
        let time = Arc::new(ManualTimeSource::new(1000));
        let registry = Arc::new(BanRegistry::open(
            &BanManagerConfig::default(),
            Arc::new(InMemoryBanStore::new()),
            listener.clone(),
            time.clone(),
        ));
        let _ = listener.registry.set(Arc::downgrade(&registry));

        registry.ban(net("10.0.0.0/8"), 50, false);
        registry.ban(net("2001:db8::/32"), 500, false);
        time.advance(50);
        // Sweeping inside export_snapshot notifies; the callback's own
        // export_snapshot then finds nothing left to sweep.
        registry.export_snapshot();
        registry.unban(net("2001:db8::/32"));

        assert_eq!(*listener.sizes.lock(), vec![1, 2, 1, 0]);
        assert!(registry.is_discouraged(addr("192.0.2.1")));
    }

    #[tokio::test]
    async fn test_broadcast_listener_wakes_async_consumer() {
        let (listener, mut receiver) = BroadcastListener::new(16);
        let registry = Arc::new(BanRegistry::open(
            &BanManagerConfig::default(),
            Arc::new(InMemoryBanStore::new()),
            Arc::new(listener),
            Arc::new(ManualTimeSource::new(1000)),
        ));

        let worker = {
            let registry = Arc::clone(&registry);
            tokio::task::spawn_blocking(move || {
                registry.ban(net("203.0.113.0/24"), 0, false);
                registry.clear();
            })
        };
        worker.await.unwrap();

        for _ in 0..2 {
            tokio::time::timeout(Duration::from_secs(1), receiver.recv())
                .await
                .unwrap()
                .unwrap();
        }
        assert!(registry.export_snapshot().is_empty());
    }

    #[test]
    fn test_broadcast_listener_without_receivers_is_harmless() {
        let (listener, receiver) = BroadcastListener::new(1);
        drop(receiver);
        let registry = BanRegistry::open(
            &BanManagerConfig::default(),
            Arc::new(InMemoryBanStore::new()),
            Arc::new(listener),
            Arc::new(ManualTimeSource::new(1000)),
        );

        assert!(registry.ban(net("203.0.113.0/24"), 0, false));
        assert!(registry.unban(net("203.0.113.0/24")));
    }
}
