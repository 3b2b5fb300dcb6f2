//! Cold, single-shot observable
//!
//! Used for one-shot asynchronous operations (engine load, store reads)
//! where failures must surface through an error channel rather than a panic
//! or a sentinel value.

use crate::observer::Observer;

/// Event sink handed to a [`ColdObservable`] behavior.
///
/// Enforces the terminal-event contract: at most one `complete` or `error`
/// per subscription, and nothing after it. Events emitted past the terminal
/// are silently dropped.
pub struct Emitter<'a, T, E> {
    observer: &'a mut dyn Observer<T, E>,
    terminated: bool,
}

impl<T, E> Emitter<'_, T, E> {
    /// Publish a value. Ignored after a terminal event.
    pub fn next(&mut self, value: T) {
        if self.terminated {
            return;
        }
        self.observer.on_next(&value);
    }

    /// Terminate the sequence with an error.
    pub fn error(&mut self, error: E) {
        if self.terminated {
            return;
        }
        self.terminated = true;
        self.observer.on_error(&error);
    }

    /// Terminate the sequence normally.
    pub fn complete(&mut self) {
        if self.terminated {
            return;
        }
        self.terminated = true;
        self.observer.on_complete();
    }

    /// Whether a terminal event has been delivered.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }
}

/// Cold producer: the behavior runs from scratch for every subscriber.
///
/// No multicast and no shared execution; two subscriptions are two fully
/// independent runs. Deliberately a separate type from
/// [`ObservableValue`](crate::ObservableValue), which holds state and
/// replays it — this one holds only a recipe.
///
/// ```rust
/// use lyra_observe::{ColdObservable, FnObserver};
///
/// let countdown: ColdObservable<i32> = ColdObservable::new(|emitter| {
///     for n in (1..=3).rev() {
///         emitter.next(n);
///     }
///     emitter.complete();
/// });
///
/// let mut seen = Vec::new();
/// countdown.subscribe(&mut FnObserver::new(|n: &i32| seen.push(*n)));
/// assert_eq!(seen, vec![3, 2, 1]);
/// ```
pub struct ColdObservable<T, E = ()> {
    behavior: Box<dyn Fn(&mut Emitter<'_, T, E>)>,
}

impl<T, E> ColdObservable<T, E> {
    /// Wrap a behavior. Nothing runs until [`subscribe`](Self::subscribe).
    pub fn new<F>(behavior: F) -> Self
    where
        F: Fn(&mut Emitter<'_, T, E>) + 'static,
    {
        Self {
            behavior: Box::new(behavior),
        }
    }

    /// Execute the behavior against this observer.
    ///
    /// Synchronous: returns once the behavior returns. The observer receives
    /// zero or more `on_next` calls followed by at most one terminal event.
    pub fn subscribe(&self, observer: &mut dyn Observer<T, E>) {
        let mut emitter = Emitter {
            observer,
            terminated: false,
        };
        (self.behavior)(&mut emitter);
    }
}
