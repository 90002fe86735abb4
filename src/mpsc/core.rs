// src/mpsc/core.rs

use crate::error::{SendTimeoutError, TrySendError};
use crate::telemetry;

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

const LOC_MPSC: &str = "mpsc";

/// Shared state behind a bounded MPSC channel.
///
/// Every handle reaches the queue through this core. The mutex serializes
/// all mutation; `nonfull` carries room-available signals to parked
/// senders and `nonempty` carries item-available signals to the parked
/// receiver. Waiters are signaled one at a time, after the lock has been
/// released.
pub(super) struct MpscCore<T> {
  pub(super) queue: Mutex<VecDeque<T>>,
  pub(super) nonfull: Condvar,
  pub(super) nonempty: Condvar,
  pub(super) capacity: usize,
}

impl<T> fmt::Debug for MpscCore<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MpscCore")
      .field("capacity", &self.capacity)
      .field("len", &self.queue.try_lock().map(|q| q.len()))
      .finish_non_exhaustive()
  }
}

impl<T> MpscCore<T> {
  pub(super) fn new(capacity: usize) -> Self {
    assert!(capacity > 0, "mpsc channel capacity must be greater than 0");
    MpscCore {
      queue: Mutex::new(VecDeque::with_capacity(capacity)),
      nonfull: Condvar::new(),
      nonempty: Condvar::new(),
      capacity,
    }
  }

  pub(super) fn send(&self, value: T) {
    let mut queue = self.queue.lock();
    while queue.len() >= self.capacity {
      telemetry::increment_counter(LOC_MPSC, "send_parks");
      self.nonfull.wait(&mut queue);
    }
    queue.push_back(value);
    drop(queue);
    self.nonempty.notify_one();
  }

  pub(super) fn send_timeout(
    &self,
    value: T,
    timeout: Duration,
  ) -> Result<(), SendTimeoutError<T>> {
    let deadline = Instant::now() + timeout;
    let mut queue = self.queue.lock();
    while queue.len() >= self.capacity {
      telemetry::increment_counter(LOC_MPSC, "send_parks");
      if self.nonfull.wait_until(&mut queue, deadline).timed_out()
        && queue.len() >= self.capacity
      {
        return Err(SendTimeoutError::Timeout(value));
      }
    }
    queue.push_back(value);
    drop(queue);
    self.nonempty.notify_one();
    Ok(())
  }

  pub(super) fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
    let mut queue = self.queue.lock();
    if queue.len() >= self.capacity {
      return Err(TrySendError::Full(value));
    }
    queue.push_back(value);
    drop(queue);
    self.nonempty.notify_one();
    Ok(())
  }

  pub(super) fn recv(&self) -> T {
    let mut queue = self.queue.lock();
    loop {
      if let Some(value) = queue.pop_front() {
        drop(queue);
        self.nonfull.notify_one();
        return value;
      }
      telemetry::increment_counter(LOC_MPSC, "recv_parks");
      self.nonempty.wait(&mut queue);
    }
  }

  pub(super) fn recv_timeout(&self, timeout: Duration) -> Option<T> {
    let deadline = Instant::now() + timeout;
    let mut queue = self.queue.lock();
    loop {
      if let Some(value) = queue.pop_front() {
        drop(queue);
        self.nonfull.notify_one();
        return Some(value);
      }
      telemetry::increment_counter(LOC_MPSC, "recv_parks");
      if self.nonempty.wait_until(&mut queue, deadline).timed_out() {
        let value = queue.pop_front();
        drop(queue);
        if value.is_some() {
          self.nonfull.notify_one();
        }
        return value;
      }
    }
  }

  pub(super) fn try_recv(&self) -> Option<T> {
    let mut queue = self.queue.lock();
    let value = queue.pop_front();
    drop(queue);
    if value.is_some() {
      self.nonfull.notify_one();
    }
    value
  }

  pub(super) fn len(&self) -> usize {
    self.queue.lock().len()
  }
}
