//! Notification adapters for the "banned list changed" signal.

use crate::ports::BanListListener;

/// Listener for nodes with no UI or RPC consumer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpListener;

impl BanListListener for NoOpListener {
    fn banned_list_changed(&self) {}
}

#[cfg(feature = "channel")]
mod broadcast {
    use super::BanListListener;
    use tokio::sync::broadcast;

    /// Event carried on the broadcast channel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BanListChanged;

    /// Fans the change signal out to async subscribers.
    ///
    /// Sending never blocks; with no live receivers the signal is dropped.
    #[derive(Debug, Clone)]
    pub struct BroadcastListener {
        sender: broadcast::Sender<BanListChanged>,
    }

    impl BroadcastListener {
        /// Create a listener and its first receiver.
        pub fn new(capacity: usize) -> (Self, broadcast::Receiver<BanListChanged>) {
            let (sender, receiver) = broadcast::channel(capacity.max(1));
            (Self { sender }, receiver)
        }

        /// Add another receiver.
        pub fn subscribe(&self) -> broadcast::Receiver<BanListChanged> {
            self.sender.subscribe()
        }
    }

    impl BanListListener for BroadcastListener {
        fn banned_list_changed(&self) {
            let _ = self.sender.send(BanListChanged);
        }
    }
}

#[cfg(feature = "channel")]
pub use broadcast::{BanListChanged, BroadcastListener};
