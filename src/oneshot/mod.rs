// src/oneshot/mod.rs

//! A oneshot channel for passing a single value between two threads.
//!
//! The channel carries exactly one value from one [`Sender`] to one
//! [`Receiver`]. The sender chooses between a fire-and-forget deposit
//! ([`Sender::send_async`]) and a rendezvous ([`Sender::send_sync`])
//! that blocks until the receiver has consumed the value or the channel
//! closed under it. Either side may close the channel explicitly;
//! dropping a handle closes its side implicitly.
//!
//! # Examples
//!
//! ```
//! use strand::oneshot;
//! use std::thread;
//!
//! let (tx, rx) = oneshot::channel::<u8>();
//!
//! let sender = thread::spawn(move || {
//!     tx.send_async(42).unwrap();
//! });
//!
//! assert_eq!(rx.recv(), Some(42));
//! sender.join().unwrap();
//! ```
//!
//! ```
//! // Closing the sender leaves the receiver empty-handed.
//! use strand::oneshot;
//!
//! let (tx, rx) = oneshot::channel::<u8>();
//! tx.close().unwrap();
//!
//! assert_eq!(rx.recv(), None);
//! ```

mod core;


use self::core::OneshotCore;

// Re-export relevant errors.
pub use crate::error::{CloseError, SendError};

use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Creates a new oneshot channel, returning a `Sender` / `Receiver`
/// pair.
pub fn channel<T: Send>() -> (Sender<T>, Receiver<T>) {
  let core = Arc::new(OneshotCore::new());
  (
    Sender {
      core: Arc::clone(&core),
      closed: AtomicBool::new(false),
    },
    Receiver {
      core,
      closed: AtomicBool::new(false),
      // recv() mutates per-channel wait state; keep the handle on one
      // thread at a time.
      _not_sync: PhantomData,
    },
  )
}

/// The sending side of a oneshot channel.
///
/// The handle is movable but not cloneable; there is exactly one sender
/// per channel.
pub struct Sender<T> {
  core: Arc<OneshotCore<T>>,
  closed: AtomicBool,
}

impl<T> fmt::Debug for Sender<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Sender")
      .field("core", &self.core)
      .field("closed", &self.closed.load(Ordering::Relaxed))
      .finish()
  }
}

impl<T> Sender<T> {
  /// Deposits `value` without waiting for the receiver.
  ///
  /// The value is parked in the channel for the receiver to pick up at
  /// its leisure; if the receiver is already blocked in
  /// [`Receiver::recv`], it is woken.
  ///
  /// # Errors
  ///
  /// [`SendError::Closed`] if the channel was closed from either side;
  /// [`SendError::Sent`] if a value is already pending. The undelivered
  /// value rides back in the error.
  pub fn send_async(&self, value: T) -> Result<(), SendError<T>> {
    if self.closed.load(Ordering::Relaxed) {
      return Err(SendError::Closed(value));
    }
    self.core.send_async(value)
  }

  /// Deposits `value` and blocks until the receive completes.
  ///
  /// Returns `Ok` only if the receiver actually consumed the value; at
  /// the moment this call returns success, the receiver has it. If the
  /// receiver closed (or dropped) without consuming, the value is
  /// handed back in [`SendError::Closed`].
  pub fn send_sync(&self, value: T) -> Result<(), SendError<T>> {
    if self.closed.load(Ordering::Relaxed) {
      return Err(SendError::Closed(value));
    }
    self.core.send_sync(value)
  }

  /// Closes the channel from the sending side.
  ///
  /// A receiver blocked in [`Receiver::recv`] is woken and observes an
  /// empty channel. An already consumed value stays consumed; closing
  /// never un-delivers.
  ///
  /// This is an explicit alternative to `drop`.
  ///
  /// # Errors
  ///
  /// Returns `Err(CloseError)` if this handle has already been closed.
  pub fn close(&self) -> Result<(), CloseError> {
    if self
      .closed
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Relaxed)
      .is_ok()
    {
      self.core.close();
      Ok(())
    } else {
      Err(CloseError)
    }
  }

  /// Returns `true` once the channel reached a terminal state, whether
  /// by consumption or by closure.
  pub fn is_closed(&self) -> bool {
    self.closed.load(Ordering::Relaxed) || self.core.state().is_closed()
  }
}

impl<T> Drop for Sender<T> {
  fn drop(&mut self) {
    if !self.closed.swap(true, Ordering::AcqRel) {
      self.core.close();
    }
  }
}

/// The receiving side of a oneshot channel.
///
/// The handle is movable but not cloneable; there is exactly one
/// receiver per channel.
pub struct Receiver<T> {
  core: Arc<OneshotCore<T>>,
  closed: AtomicBool,
  _not_sync: PhantomData<*mut ()>,
}

impl<T> fmt::Debug for Receiver<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Receiver")
      .field("core", &self.core)
      .field("closed", &self.closed.load(Ordering::Relaxed))
      .finish()
  }
}

impl<T> Receiver<T> {
  /// Waits for the value, consuming it.
  ///
  /// Returns `None` if the channel closed without delivering a value,
  /// or if a value was already consumed. At most one call per channel
  /// ever returns `Some`.
  pub fn recv(&self) -> Option<T> {
    if self.closed.load(Ordering::Relaxed) {
      return None;
    }
    self.core.recv()
  }

  /// Takes the value if one is currently pending, without blocking.
  pub fn try_recv(&self) -> Option<T> {
    if self.closed.load(Ordering::Relaxed) {
      return None;
    }
    self.core.try_recv()
  }

  /// Closes the channel from the receiving side.
  ///
  /// Subsequent sends fail; a sender blocked in [`Sender::send_sync`]
  /// is woken and reports failure, taking its value back. A value that
  /// was deposited asynchronously and never consumed is discarded.
  ///
  /// This is an explicit alternative to `drop`.
  ///
  /// # Errors
  ///
  /// Returns `Err(CloseError)` if this handle has already been closed.
  pub fn close(&self) -> Result<(), CloseError> {
    if self
      .closed
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Relaxed)
      .is_ok()
    {
      self.core.close();
      Ok(())
    } else {
      Err(CloseError)
    }
  }

  /// Returns `true` once the channel reached a terminal state, whether
  /// by consumption or by closure.
  pub fn is_closed(&self) -> bool {
    self.closed.load(Ordering::Relaxed) || self.core.state().is_closed()
  }
}

impl<T> Drop for Receiver<T> {
  fn drop(&mut self) {
    if !self.closed.swap(true, Ordering::AcqRel) {
      self.core.close();
    }
  }
}

// The PhantomData<*mut ()> field removes Send and Sync; a receiver is
// safe to hand to another thread wholesale, so reinstate Send.
unsafe impl<T: Send> Send for Receiver<T> {}
