// src/mpsc/mod.rs

//! A bounded multi-producer, single-consumer (MPSC) channel.
//!
//! Values travel from any number of [`Sender`] clones to a single
//! [`Receiver`] through a FIFO queue of fixed capacity. Senders block
//! when the queue is full, the receiver blocks when it is empty; both
//! sides also offer timed and non-blocking variants.
//!
//! Values enqueued by a given sender are received in that sender's
//! submission order. No ordering is promised between distinct senders
//! beyond a legal interleaving of their individual orders, and no
//! fairness is promised among senders contending for room.
//!
//! This channel has no disconnect signal: dropping every sender does not
//! wake the receiver, and a `recv` on an empty queue with no senders
//! left blocks until its timeout (or forever). Pair it with an
//! [`oneshot`](crate::oneshot) or [`watch`](crate::watch) channel when
//! shutdown needs to be observed.
//!
//! # Examples
//!
//! ```
//! use strand::mpsc;
//! use std::thread;
//!
//! let (tx, rx) = mpsc::bounded::<u32>(8);
//!
//! let tx2 = tx.clone();
//! let producer = thread::spawn(move || {
//!     for i in 0..4 {
//!         tx2.send(i);
//!     }
//! });
//!
//! let mut sum = 0;
//! for _ in 0..4 {
//!     sum += rx.recv();
//! }
//! assert_eq!(sum, 6);
//! producer.join().unwrap();
//! ```

mod core;

#[cfg(test)]
mod tests;

use self::core::MpscCore;

// Re-export relevant errors.
pub use crate::error::{SendTimeoutError, TrySendError};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Creates a new bounded MPSC channel with the given capacity, returning
/// a `Sender` / `Receiver` pair.
///
/// # Panics
///
/// Panics if `capacity` is zero.
pub fn bounded<T: Send>(capacity: usize) -> (Sender<T>, Receiver<T>) {
  let core = Arc::new(MpscCore::new(capacity));
  (
    Sender {
      core: Arc::clone(&core),
    },
    Receiver { core },
  )
}

/// The sending side of a bounded MPSC channel.
///
/// Senders are created by [`bounded`] and multiplied by explicit
/// [`Clone`]; each clone is an independent handle onto the same queue.
pub struct Sender<T> {
  core: Arc<MpscCore<T>>,
}

impl<T> fmt::Debug for Sender<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Sender").field("core", &self.core).finish()
  }
}

impl<T> Clone for Sender<T> {
  fn clone(&self) -> Self {
    Sender {
      core: Arc::clone(&self.core),
    }
  }
}

impl<T> Sender<T> {
  /// Appends `value` to the queue, blocking while the queue is full.
  pub fn send(&self, value: T) {
    self.core.send(value);
  }

  /// Appends `value` to the queue, blocking at most `timeout` for room.
  ///
  /// On timeout the item is handed back in
  /// [`SendTimeoutError::Timeout`]; success guarantees the item was
  /// enqueued.
  pub fn send_timeout(&self, value: T, timeout: Duration) -> Result<(), SendTimeoutError<T>> {
    self.core.send_timeout(value, timeout)
  }

  /// Appends `value` if the queue has room, without blocking.
  pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
    self.core.try_send(value)
  }

  /// Returns the fixed capacity of the channel.
  pub fn capacity(&self) -> usize {
    self.core.capacity
  }

  /// Returns the number of items currently queued.
  pub fn len(&self) -> usize {
    self.core.len()
  }

  /// Returns `true` if the queue holds no items.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns `true` if the queue is at capacity.
  pub fn is_full(&self) -> bool {
    self.len() >= self.core.capacity
  }
}

/// The receiving side of a bounded MPSC channel.
///
/// There is exactly one receiver per channel; the handle is movable but
/// not cloneable.
pub struct Receiver<T> {
  core: Arc<MpscCore<T>>,
}

impl<T> fmt::Debug for Receiver<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Receiver").field("core", &self.core).finish()
  }
}

impl<T> Receiver<T> {
  /// Removes and returns the front item, blocking while the queue is
  /// empty.
  pub fn recv(&self) -> T {
    self.core.recv()
  }

  /// Removes and returns the front item, blocking at most `timeout`.
  ///
  /// Returns `None` if the timeout elapsed with the queue still empty.
  pub fn recv_timeout(&self, timeout: Duration) -> Option<T> {
    self.core.recv_timeout(timeout)
  }

  /// Removes and returns the front item if one is present, without
  /// blocking.
  pub fn try_recv(&self) -> Option<T> {
    self.core.try_recv()
  }

  /// Returns the fixed capacity of the channel.
  pub fn capacity(&self) -> usize {
    self.core.capacity
  }

  /// Returns the number of items currently queued.
  pub fn len(&self) -> usize {
    self.core.len()
  }

  /// Returns `true` if the queue holds no items.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns `true` if the queue is at capacity.
  pub fn is_full(&self) -> bool {
    self.len() >= self.core.capacity
  }
}
