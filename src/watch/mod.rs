// src/watch/mod.rs

//! A single-producer, multi-consumer channel that retains only the most
//! recently sent value.
//!
//! The [`Sender`] publishes updates with [`Sender::broadcast`]; each
//! [`Receiver`] observes the latest value either by taking a cheap
//! read-locked reference ([`Receiver::borrow`]) or by waiting for a
//! version it has not seen yet ([`Receiver::recv`]). Updates are
//! coalesced: a receiver that falls behind skips intermediate values and
//! observes the newest one.
//!
//! Ownership is asymmetric. Receivers keep the channel alive; the
//! sender only holds a weak reference. When the last receiver drops,
//! the channel core is freed and the sender observes closure. When the
//! sender drops, a closed flag is folded into the version word and
//! every waiting receiver is woken.
//!
//! # Examples
//!
//! ```
//! use strand::watch;
//!
//! let (tx, rx) = watch::channel::<u32>(0);
//!
//! // The initial value counts as the first update.
//! assert_eq!(rx.recv(), Some(0));
//!
//! tx.broadcast(7).unwrap();
//! assert_eq!(rx.recv(), Some(7));
//! assert_eq!(*rx.borrow(), 7);
//!
//! drop(tx);
//! // Nothing unseen remains and the sender is gone.
//! assert_eq!(rx.recv(), None);
//! ```

mod core;

#[cfg(test)]
mod tests;

use self::core::{WatchCore, CLOSED_BIT};

// Re-export relevant errors.
pub use crate::error::BroadcastError;

use parking_lot::RwLockReadGuard;
use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Creates a new watch channel seeded with `init`, returning a
/// `Sender` / `Receiver` pair.
///
/// The initial value is immediately observable: the returned receiver's
/// first [`recv`](Receiver::recv) yields `init` without waiting.
pub fn channel<T: Send>(init: T) -> (Sender<T>, Receiver<T>) {
  let core = Arc::new(WatchCore::new(init));
  let sender = Sender {
    core: Arc::downgrade(&core),
  };
  let receiver = Receiver {
    core,
    seen: AtomicU64::new(0),
  };
  (sender, receiver)
}

/// The sending side of a watch channel.
///
/// The handle is movable but not cloneable; there is exactly one sender
/// per channel. It holds only a weak reference to the channel core, so
/// the channel lives exactly as long as its receivers.
pub struct Sender<T> {
  core: Weak<WatchCore<T>>,
}

impl<T> fmt::Debug for Sender<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Sender")
      .field("core", &self.core.upgrade())
      .finish()
  }
}

impl<T> Sender<T> {
  /// Publishes `value` to every receiver, replacing the previous value.
  ///
  /// Receivers blocked in [`Receiver::recv`] are woken. Receivers that
  /// are not currently waiting will observe this update (or a newer
  /// one) on their next call.
  ///
  /// # Errors
  ///
  /// [`BroadcastError::Closed`] with the item handed back if every
  /// receiver has been dropped.
  pub fn broadcast(&self, value: T) -> Result<(), BroadcastError<T>> {
    match self.core.upgrade() {
      Some(core) => {
        core.publish(value);
        Ok(())
      }
      None => Err(BroadcastError::Closed(value)),
    }
  }

  /// Returns `true` iff no receiver handle still exists.
  pub fn is_closed(&self) -> bool {
    self.core.upgrade().is_none()
  }
}

impl<T> Drop for Sender<T> {
  fn drop(&mut self) {
    if let Some(core) = self.core.upgrade() {
      core.set_closed();
    }
  }
}

/// The receiving side of a watch channel.
///
/// Receivers are multiplied by explicit [`Clone`]; each clone starts
/// from its parent's seen version, so it does not re-observe a value
/// the parent already consumed.
pub struct Receiver<T> {
  core: Arc<WatchCore<T>>,
  /// Version of the last value this handle returned from `recv`.
  /// Per-handle only, hence the relaxed ordering throughout.
  seen: AtomicU64,
}

impl<T> fmt::Debug for Receiver<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Receiver")
      .field("core", &self.core)
      .field("seen", &self.seen.load(Ordering::Relaxed))
      .finish()
  }
}

impl<T> Clone for Receiver<T> {
  fn clone(&self) -> Self {
    Receiver {
      core: Arc::clone(&self.core),
      seen: AtomicU64::new(self.seen.load(Ordering::Relaxed)),
    }
  }
}

impl<T> Receiver<T> {
  /// Returns a read-locked reference to the current value.
  ///
  /// The borrow does not count as observing an update: a later
  /// [`recv`](Receiver::recv) still reports the version. Outstanding
  /// borrows hold the shared lock and therefore block the sender's next
  /// [`broadcast`](Sender::broadcast); keep them short-lived.
  pub fn borrow(&self) -> WatchRef<'_, T> {
    WatchRef {
      guard: self.core.value.read(),
    }
  }

  /// Waits for a value this handle has not observed and returns a copy
  /// of it.
  ///
  /// Returns immediately when an unobserved update (or the initial
  /// value) is pending, otherwise parks until the sender publishes or
  /// drops. Intermediate updates may be skipped; the copy is always the
  /// newest value. Returns `None` only when the sender is gone *and*
  /// everything published has already been observed — a final update is
  /// never lost to closure.
  pub fn recv(&self) -> Option<T>
  where
    T: Clone,
  {
    self.core.next_value(&self.seen)
  }

  /// Returns `true` once the sender has been dropped.
  pub fn is_closed(&self) -> bool {
    self.core.published() & CLOSED_BIT != 0
  }
}

/// A read-locked reference to a watch channel's current value, returned
/// by [`Receiver::borrow`].
///
/// Releases the shared lock when dropped.
pub struct WatchRef<'a, T> {
  guard: RwLockReadGuard<'a, T>,
}

impl<T: fmt::Debug> fmt::Debug for WatchRef<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(&*self.guard, f)
  }
}

impl<T> Deref for WatchRef<'_, T> {
  type Target = T;

  fn deref(&self) -> &T {
    &self.guard
  }
}
