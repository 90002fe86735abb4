// src/watch/core.rs

use crate::telemetry;

use parking_lot::{Condvar, Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

const LOC_WATCH: &str = "watch";

/// Low bit of the version word; sticky once set.
pub(super) const CLOSED_BIT: u64 = 0b1;

/// Version published for the initial value. Updates advance the word by
/// 2, so no update ever publishes version 0 or touches the closed bit;
/// version 0 stays reserved for "receiver has observed nothing yet".
pub(super) const INITIAL_VERSION: u64 = 2;

/// Shared state behind a watch channel.
///
/// The reader-writer lock guards the value cell; the version word pairs
/// a monotone update counter with the closed flag so that a receiver
/// can test both with a single atomic load. Receivers waiting for a
/// version change park on `update_cv` under `update_lock` — the sender
/// bumps the version first and passes through `update_lock` before
/// notifying, which closes the window between a receiver's version
/// check and its wait.
pub(super) struct WatchCore<T> {
  pub(super) value: RwLock<T>,
  pub(super) version: AtomicU64,
  pub(super) update_lock: Mutex<()>,
  pub(super) update_cv: Condvar,
}

impl<T> fmt::Debug for WatchCore<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let word = self.version.load(Ordering::Relaxed);
    f.debug_struct("WatchCore")
      .field("version", &(word & !CLOSED_BIT))
      .field("closed", &(word & CLOSED_BIT != 0))
      .finish_non_exhaustive()
  }
}

impl<T> WatchCore<T> {
  pub(super) fn new(init: T) -> Self {
    WatchCore {
      value: RwLock::new(init),
      version: AtomicU64::new(INITIAL_VERSION),
      update_lock: Mutex::new(()),
      update_cv: Condvar::new(),
    }
  }

  #[inline]
  pub(super) fn published(&self) -> u64 {
    self.version.load(Ordering::Acquire)
  }

  /// Replaces the value and advances the published version, then wakes
  /// every parked receiver.
  pub(super) fn publish(&self, value: T) {
    {
      let mut slot = self.value.write();
      *slot = value;
      // Incremented while the exclusive lock is held: a reader holding
      // the shared lock can never pair a value with a stale version.
      self.version.fetch_add(2, Ordering::Release);
    }
    drop(self.update_lock.lock());
    self.update_cv.notify_all();
    telemetry::increment_counter(LOC_WATCH, "broadcasts");
  }

  /// Sets the closed bit and wakes every parked receiver.
  pub(super) fn set_closed(&self) {
    self.version.fetch_or(CLOSED_BIT, Ordering::Release);
    drop(self.update_lock.lock());
    self.update_cv.notify_all();
    telemetry::log_event(LOC_WATCH, "SenderClosed", None);
  }

  /// Returns a copy of the value as soon as the published version
  /// differs from `seen`, recording the version that was actually read.
  ///
  /// Returns `None` only when the channel is closed and `seen` already
  /// matches the published version — a pending update is always
  /// delivered before closure is reported.
  pub(super) fn next_value(&self, seen: &AtomicU64) -> Option<T>
  where
    T: Clone,
  {
    loop {
      let published = self.published();
      if published & !CLOSED_BIT != seen.load(Ordering::Relaxed) {
        let slot = self.value.read();
        // Updates cannot advance while the shared lock is held, so this
        // load names exactly the version of the value being copied.
        let current = self.published() & !CLOSED_BIT;
        let value = slot.clone();
        drop(slot);
        seen.store(current, Ordering::Relaxed);
        return Some(value);
      }
      if published & CLOSED_BIT != 0 {
        return None;
      }

      telemetry::increment_counter(LOC_WATCH, "recv_parks");
      let mut parked = self.update_lock.lock();
      // Re-check now that the parking lock is held; a publish that beat
      // us to the lock would otherwise be missed.
      if self.published() == published {
        self.update_cv.wait(&mut parked);
      }
    }
  }
}
