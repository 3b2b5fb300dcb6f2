//! Observer trait shared by the hot and cold containers

/// Receiver half of a subscription.
///
/// `on_next` is the only required method. The terminal callbacks default to
/// no-ops because [`ObservableValue`](crate::ObservableValue) never
/// terminates; only [`ColdObservable`](crate::ColdObservable) delivers
/// `on_error` / `on_complete`.
pub trait Observer<T, E = ()> {
    /// A new value was published.
    fn on_next(&mut self, value: &T);

    /// The producer failed. Terminal: no further events follow.
    fn on_error(&mut self, _error: &E) {}

    /// The producer finished normally. Terminal: no further events follow.
    fn on_complete(&mut self) {}
}

/// Closure adapter for observers that only care about values.
pub struct FnObserver<F> {
    callback: F,
}

impl<F> FnObserver<F> {
    /// Wrap a closure as an [`Observer`].
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<T, E, F> Observer<T, E> for FnObserver<F>
where
    F: FnMut(&T),
{
    fn on_next(&mut self, value: &T) {
        (self.callback)(value);
    }
}
