//! Movement gate adapter.

use tokio::sync::watch;

/// The live "is moving" signal that gates all scanning.
///
/// Wraps a latest-value cell with a notify list: every subscriber
/// (the three device collectors and the location joiner) immediately
/// observes the current value on subscription and is woken on every
/// update, in both directions. The movement-detection algorithm itself
/// lives outside the core; whatever implements it calls
/// [`set_moving`](Self::set_moving).
#[derive(Debug)]
pub struct MovementGate {
    tx: watch::Sender<bool>,
}

impl MovementGate {
    /// Create a gate with the given initial state.
    pub fn new(moving: bool) -> Self {
        let (tx, _) = watch::channel(moving);
        Self { tx }
    }

    /// Push a new movement state to all subscribers.
    pub fn set_moving(&self, moving: bool) {
        self.tx.send_replace(moving);
    }

    /// The current movement state.
    pub fn is_moving(&self) -> bool {
        *self.tx.borrow()
    }

    /// Subscribe to the signal. The receiver replays the current value
    /// to its first `borrow` regardless of when it subscribed.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for MovementGate {
    fn default() -> Self {
        Self::new(false)
    }
}
