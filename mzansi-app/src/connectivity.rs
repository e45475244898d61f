//! Connectivity monitor
//!
//! Event-fed online/offline state. The platform layer pushes transitions
//! via [`ConnectivityMonitor::set_online`]; there is no polling and no
//! failure mode. State may be stale until the next event arrives.

use tokio::sync::watch;

/// Shared online/offline flag with change notifications
#[derive(Debug, Clone)]
pub struct ConnectivityMonitor {
    tx: watch::Sender<bool>,
}

impl ConnectivityMonitor {
    /// Create a monitor with the given initial state
    pub fn new(online: bool) -> Self {
        let (tx, _rx) = watch::channel(online);
        Self { tx }
    }

    /// Current state as of the last platform event
    pub fn is_online(&self) -> bool {
        *self.tx.borrow()
    }

    /// Feed a platform connectivity event
    pub fn set_online(&self, online: bool) {
        let changed = self.tx.send_replace(online) != online;
        if changed {
            tracing::info!(online, "connectivity changed");
        }
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflects_last_event() {
        let monitor = ConnectivityMonitor::new(true);
        assert!(monitor.is_online());

        monitor.set_online(false);
        assert!(!monitor.is_online());

        monitor.set_online(true);
        assert!(monitor.is_online());
    }

    #[tokio::test]
    async fn subscribers_see_transitions() {
        let monitor = ConnectivityMonitor::new(true);
        let mut rx = monitor.subscribe();

        monitor.set_online(false);
        rx.changed().await.unwrap();
        assert!(!*rx.borrow());
    }
}
