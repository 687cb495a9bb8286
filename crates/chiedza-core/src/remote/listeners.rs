//! Auth-change listener registry.
//!
//! Every listener gets its own unbounded channel. A [`Subscription`]
//! unregisters itself when dropped.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::mpsc;

use super::RemoteSession;

/// `Some` when a session was established or refreshed, `None` on sign-out.
pub type SessionChange = Option<RemoteSession>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    senders: HashMap<u64, mpsc::UnboundedSender<SessionChange>>,
}

#[derive(Clone, Default)]
pub struct ListenerRegistry {
    inner: Arc<Mutex<Listeners>>,
}

fn lock(listeners: &Mutex<Listeners>) -> MutexGuard<'_, Listeners> {
    listeners.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ListenerRegistry {
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut listeners = lock(&self.inner);
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.senders.insert(id, tx);

        Subscription {
            id,
            rx,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Delivers `change` to every live listener, pruning closed ones.
    pub fn notify(&self, change: &SessionChange) {
        let mut listeners = lock(&self.inner);
        listeners
            .senders
            .retain(|_, tx| tx.send(change.clone()).is_ok());
        tracing::debug!(
            listeners = listeners.senders.len(),
            signed_in = change.is_some(),
            "Session change delivered"
        );
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.len())
            .finish()
    }
}

/// Handle returned by `on_session_change`.
pub struct Subscription {
    id: u64,
    rx: mpsc::UnboundedReceiver<SessionChange>,
    registry: Weak<Mutex<Listeners>>,
}

impl Subscription {
    /// Waits for the next change. Returns `None` once the client is gone.
    pub async fn recv(&mut self) -> Option<SessionChange> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<SessionChange> {
        self.rx.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).senders.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::session::sample_session;

    #[test]
    fn test_notify_reaches_every_listener() {
        let registry = ListenerRegistry::default();
        let mut a = registry.subscribe();
        let mut b = registry.subscribe();

        let session = sample_session("a@b.org", None, 1);
        registry.notify(&Some(session.clone()));
        registry.notify(&None);

        assert_eq!(a.try_recv(), Some(Some(session.clone())));
        assert_eq!(a.try_recv(), Some(None));
        assert_eq!(b.try_recv(), Some(Some(session)));
        assert_eq!(b.try_recv(), Some(None));
        assert_eq!(a.try_recv(), None);
    }

    #[test]
    fn test_drop_unregisters() {
        let registry = ListenerRegistry::default();
        let first = registry.subscribe();
        let mut second = registry.subscribe();
        assert_eq!(registry.len(), 2);

        drop(first);
        assert_eq!(registry.len(), 1);

        registry.notify(&None);
        assert_eq!(second.try_recv(), Some(None));

        drop(second);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_subscription_outliving_registry() {
        let registry = ListenerRegistry::default();
        let sub = registry.subscribe();
        drop(registry);
        drop(sub);
    }
}
