//! Hot observable value holder
//!
//! Holds a current value and notifies subscribers synchronously on every
//! mutation. This is the primitive every piece of observable playback state
//! (play state, current song, favorites, selections) is built on.

use crate::observer::{FnObserver, Observer};

/// Handle returned by [`ObservableValue::subscribe`].
///
/// Pass it back to [`ObservableValue::unsubscribe`] to stop receiving
/// values. Dropping the handle without unsubscribing leaves the observer
/// registered; cleaning up before the subscribing side goes away is the
/// caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Reactive container with replay-latest subscription semantics.
///
/// - [`get`](Self::get) returns the current value with no side effect.
/// - [`set`](Self::set) replaces the value and synchronously invokes every
///   registered observer with the new value, in subscription order.
/// - [`subscribe`](Self::subscribe) delivers the current value once,
///   immediately, then all future changes (replay-latest).
///
/// Observers cannot call `set` on the value they observe during a
/// notification: `set` holds `&mut self` for the whole dispatch, so such a
/// recursive write does not compile in safe code.
pub struct ObservableValue<T> {
    value: T,
    subscribers: Vec<(SubscriptionId, Box<dyn Observer<T>>)>,
    next_id: u64,
}

impl<T> ObservableValue<T> {
    /// Create a holder with its initial value.
    pub fn new(initial: T) -> Self {
        Self {
            value: initial,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Current value, no side effects.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and notify all subscribers in subscription order.
    pub fn set(&mut self, value: T) {
        self.value = value;
        for (_, observer) in &mut self.subscribers {
            observer.on_next(&self.value);
        }
    }

    /// Register an observer (replay-latest: it sees the current value once,
    /// immediately, then every future `set`).
    pub fn subscribe(&mut self, mut observer: Box<dyn Observer<T>>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        observer.on_next(&self.value);
        self.subscribers.push((id, observer));
        id
    }

    /// Register a plain closure as an observer.
    pub fn subscribe_fn<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&T) + 'static,
        T: 'static,
    {
        self.subscribe(Box::new(FnObserver::new(callback)))
    }

    /// Remove a registered observer.
    ///
    /// Returns false if the handle was already unsubscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Number of registered observers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: Clone> ObservableValue<T> {
    /// Owned copy of the current value.
    pub fn snapshot(&self) -> T {
        self.value.clone()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ObservableValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableValue")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<T: Default> Default for ObservableValue<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
