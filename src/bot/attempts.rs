//! Routing of component interactions to in-flight mission attempts.
//!
//! One mission attempt runs per user at a time. While an attempt is waiting
//! for a confirmation-menu selection or a disambiguation choice, its event
//! sender is registered here keyed by the user's Discord ID; the interaction
//! handler forwards matching component events into it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::mpsc;

use crate::service::mission::confirm::AttemptEvent;

/// Shared registry of live attempt event senders.
#[derive(Clone)]
pub struct AttemptRouter {
    senders: Arc<StdMutex<HashMap<u64, mpsc::Sender<AttemptEvent>>>>,
}

impl AttemptRouter {
    pub fn new() -> Self {
        Self {
            senders: Arc::new(StdMutex::new(HashMap::new())),
        }
    }

    /// Registers the sender for a user's attempt, replacing any stale one.
    pub fn register(&self, user_id: u64, sender: mpsc::Sender<AttemptEvent>) {
        self.senders
            .lock()
            .expect("attempt router poisoned")
            .insert(user_id, sender);
    }

    /// Removes a user's attempt registration.
    pub fn unregister(&self, user_id: u64) {
        self.senders
            .lock()
            .expect("attempt router poisoned")
            .remove(&user_id);
    }

    /// Forwards an event to the user's attempt, if one is live.
    pub async fn dispatch(&self, user_id: u64, event: AttemptEvent) -> bool {
        let sender = {
            let senders = self.senders.lock().expect("attempt router poisoned");
            senders.get(&user_id).cloned()
        };
        match sender {
            Some(sender) => sender.send(event).await.is_ok(),
            None => false,
        }
    }
}

impl Default for AttemptRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dispatch_reaches_registered_attempt() {
        let router = AttemptRouter::new();
        let (tx, mut rx) = mpsc::channel(4);
        router.register(42, tx);

        assert!(router.dispatch(42, AttemptEvent::Choice(1)).await);
        assert!(matches!(rx.recv().await, Some(AttemptEvent::Choice(1))));
    }

    #[tokio::test]
    async fn dispatch_without_registration_is_dropped() {
        let router = AttemptRouter::new();
        assert!(!router.dispatch(42, AttemptEvent::Cancelled).await);
    }

    #[tokio::test]
    async fn unregister_stops_routing() {
        let router = AttemptRouter::new();
        let (tx, _rx) = mpsc::channel(4);
        router.register(42, tx);
        router.unregister(42);
        assert!(!router.dispatch(42, AttemptEvent::Cancelled).await);
    }
}
