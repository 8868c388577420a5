//! Published state with last-value replay.
//!
//! An [`Observable`] wraps a [`tokio::sync::watch`] channel: the sender side is
//! owned by the component that mutates the state, and every subscriber gets a
//! receiver that immediately yields the current value. Unsubscribing is
//! dropping the receiver.

use std::fmt;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// A single published property.
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T> Observable<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Clone of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Borrow the current value without cloning it.
    ///
    /// The closure runs while the channel's read lock is held; keep it short.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Publish `value`, notifying subscribers even when it equals the current
    /// one. Works with zero subscribers.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Mutate in place; subscribers are notified only when `f` returns `true`.
    pub fn update(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }

    /// Receiver that replays the current value and then sees every later
    /// publication (intermediate values may be coalesced).
    ///
    /// Owners publish while holding their own state lock, so a `borrow()` on
    /// the receiver must not be held across a call back into the owner (for
    /// example `SearchOrchestrator::search`); clone the value out first.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Stream adapter over [`Observable::subscribe`]; the first item is the
    /// current value.
    pub fn stream(&self) -> WatchStream<T> {
        WatchStream::new(self.tx.subscribe())
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T> Observable<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Publish `value` only if it differs from the current one.
    pub fn set_if_changed(&self, value: T) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }
}

impl<T> Default for Observable<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.tx.borrow())
            .field("subscribers", &self.tx.receiver_count())
            .finish()
    }
}
