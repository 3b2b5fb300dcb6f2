//! Lyra Player - Reactive Primitives
//!
//! Minimal synchronous reactive containers used by the playback session
//! controller to expose observable state to presentation layers.
//!
//! This crate provides two deliberately distinct constructs:
//! - [`ObservableValue`]: a hot value holder with replay-latest subscription
//!   semantics. Always has a current value; every `set` notifies all
//!   registered observers synchronously, in subscription order.
//! - [`ColdObservable`]: a cold, single-shot producer. Each subscription
//!   re-executes the behavior from scratch and receives its own sequence of
//!   `next` events terminated by exactly one `complete` or `error`.
//!
//! # Concurrency
//!
//! Nothing here is thread-safe, on purpose. All mutation goes through
//! `&mut self`, so the borrow checker enforces the single-owner rule the
//! playback core is built around. Notifications run synchronously on the
//! calling thread.
//!
//! # Example
//!
//! ```rust
//! use lyra_observe::ObservableValue;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let mut volume = ObservableValue::new(80u8);
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! let sub = volume.subscribe_fn(move |v| sink.borrow_mut().push(*v));
//!
//! volume.set(55);
//!
//! // Replay-latest: the subscriber saw 80 immediately, then 55.
//! assert_eq!(*seen.borrow(), vec![80, 55]);
//! volume.unsubscribe(sub);
//! ```

mod cold;
mod observer;
mod value;

pub use cold::{ColdObservable, Emitter};
pub use observer::{FnObserver, Observer};
pub use value::{ObservableValue, SubscriptionId};
