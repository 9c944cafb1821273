//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus distributes change events from the registry store to whoever
//! renders it. It makes minimal assumptions:
//!
//! - **Transport-agnostic**: in-memory channels today; nothing in the trait
//!   ties it to a process.
//! - **No persistence**: storage is the source of truth, the bus only tells
//!   subscribers that it changed.
//! - **Lossy for dead subscribers**: a dropped subscription is pruned on the
//!   next publish.

use std::sync::mpsc::Receiver;

/// A subscription to an event stream.
///
/// Each subscription gets a copy of every event published after it was
/// created (broadcast semantics).
///
/// ```ignore
/// let subscription = store.subscribe();
/// store.add_resident("Ani", "111", ResidencyStatus::Permanent)?;
///
/// while let Ok(event) = subscription.try_recv() {
///     redraw(&event);
/// }
/// ```
///
/// Subscriptions are meant for a single consumer thread.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain every message that is already queued.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// ```text
/// Command → Store (persist collection) → Event Bus (publish) → Subscribers
/// ```
///
/// Events are published only after the change has been written to storage,
/// so a subscriber never observes state that could be lost on restart.
///
/// `publish()` can fail (e.g. a poisoned lock). The change is already
/// persisted at that point; the store logs the failure and carries on.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}
