//! Viewport sizes and the resize notification feed.
//!
//! The feed stands in for the windowing collaborator: it remembers the
//! current size and pushes every published size to each live subscriber in
//! arrival order. Subscribers drain their queue synchronously, so no async
//! runtime is involved.

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Visible display area in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Builds a size from signed dimensions, clamping negatives to zero.
    pub fn clamped(width: i64, height: i64) -> Self {
        Self {
            width: clamp_dimension(width),
            height: clamp_dimension(height),
        }
    }
}

fn clamp_dimension(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

impl fmt::Display for ViewportSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Publishes viewport changes to subscribed renderers.
#[derive(Debug)]
pub struct ViewportFeed {
    current: ViewportSize,
    subscribers: Vec<UnboundedSender<ViewportSize>>,
}

impl ViewportFeed {
    pub fn new(initial: ViewportSize) -> Self {
        Self {
            current: initial,
            subscribers: Vec::new(),
        }
    }

    /// The most recently published size.
    pub fn current(&self) -> ViewportSize {
        self.current
    }

    /// Registers a new subscriber. The subscription starts at the current size.
    pub fn subscribe(&mut self) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.subscribers.push(sender);
        Subscription {
            initial: self.current,
            receiver,
        }
    }

    /// Records `size` as current and notifies every live subscriber.
    ///
    /// Subscriptions that have been dropped are pruned.
    pub fn publish(&mut self, size: ViewportSize) {
        self.current = size;
        self.subscribers.retain(|sender| sender.send(size).is_ok());
        tracing::trace!(%size, subscribers = self.subscribers.len(), "viewport published");
    }

    /// Number of subscriptions that are still alive.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .iter()
            .filter(|sender| !sender.is_closed())
            .count()
    }
}

/// Receiving half of a feed registration.
///
/// Dropping the subscription unsubscribes it.
#[derive(Debug)]
pub struct Subscription {
    initial: ViewportSize,
    receiver: UnboundedReceiver<ViewportSize>,
}

impl Subscription {
    /// The feed's size at the moment of subscribing.
    pub fn initial(&self) -> ViewportSize {
        self.initial
    }

    /// Takes the next pending notification without blocking.
    pub fn try_next(&mut self) -> Option<ViewportSize> {
        self.receiver.try_recv().ok()
    }
}
