// src/oneshot/core.rs

use crate::error::SendError;
use crate::telemetry;

use parking_lot::{Condvar, Mutex};
use std::fmt;

const LOC_ONESHOT: &str = "oneshot";

/// Channel state. One variant for every combination of value presence,
/// parked party, and closure that the protocol can reach.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum State {
  /// Nothing sent, nobody waiting.
  Init,
  /// A value is in the slot; the receiver has not taken it yet.
  Sent,
  /// The receiver is parked waiting for a value.
  WaitSend,
  /// The sender left a value and is parked awaiting completion.
  WaitRecv,
  /// Closed without the value being consumed.
  Closed,
  /// The value was consumed by the receiver.
  ClosedRecv,
}

impl State {
  /// Both closed variants are terminal; no transition leaves them.
  pub(super) fn is_closed(self) -> bool {
    matches!(self, State::Closed | State::ClosedRecv)
  }
}

pub(super) struct Inner<T> {
  pub(super) state: State,
  pub(super) value: Option<T>,
}

/// Shared state behind a oneshot channel.
///
/// The mutex guards the state/value pair. `rx_cv` is signaled by the
/// sender side (deposit, sender close) and `tx_cv` by the receiver side
/// (consumption, receiver close); each party only ever parks on its own
/// condition variable.
pub(super) struct OneshotCore<T> {
  pub(super) inner: Mutex<Inner<T>>,
  pub(super) tx_cv: Condvar,
  pub(super) rx_cv: Condvar,
}

impl<T> fmt::Debug for OneshotCore<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let state = self.inner.try_lock().map(|inner| inner.state);
    f.debug_struct("OneshotCore")
      .field("state", &state)
      .finish_non_exhaustive()
  }
}

impl<T> OneshotCore<T> {
  pub(super) fn new() -> Self {
    OneshotCore {
      inner: Mutex::new(Inner {
        state: State::Init,
        value: None,
      }),
      tx_cv: Condvar::new(),
      rx_cv: Condvar::new(),
    }
  }

  pub(super) fn state(&self) -> State {
    self.inner.lock().state
  }

  pub(super) fn send_async(&self, value: T) -> Result<(), SendError<T>> {
    let mut inner = self.inner.lock();
    match inner.state {
      State::Closed | State::ClosedRecv => Err(SendError::Closed(value)),
      State::Sent | State::WaitRecv => Err(SendError::Sent(value)),
      State::Init => {
        inner.value = Some(value);
        inner.state = State::Sent;
        Ok(())
      }
      State::WaitSend => {
        inner.value = Some(value);
        inner.state = State::Sent;
        drop(inner);
        self.rx_cv.notify_one();
        Ok(())
      }
    }
  }

  pub(super) fn send_sync(&self, value: T) -> Result<(), SendError<T>> {
    let mut inner = self.inner.lock();
    match inner.state {
      State::Closed | State::ClosedRecv => return Err(SendError::Closed(value)),
      State::Sent | State::WaitRecv => return Err(SendError::Sent(value)),
      State::WaitSend => {
        // Receiver already parked in recv(); hand the value over and
        // wake it before parking ourselves.
        inner.value = Some(value);
        inner.state = State::Sent;
        self.rx_cv.notify_one();
      }
      State::Init => {
        inner.value = Some(value);
        inner.state = State::WaitRecv;
      }
    }

    telemetry::increment_counter(LOC_ONESHOT, "send_sync_parks");
    while !inner.state.is_closed() {
      self.tx_cv.wait(&mut inner);
    }

    // An empty slot means the receiver drained it (state ClosedRecv);
    // anything left behind is our own undelivered value.
    match inner.value.take() {
      None => Ok(()),
      Some(v) => Err(SendError::Closed(v)),
    }
  }

  pub(super) fn recv(&self) -> Option<T> {
    let mut inner = self.inner.lock();
    match inner.state {
      State::Closed | State::ClosedRecv => None,
      State::Sent | State::WaitRecv => {
        let value = inner.value.take();
        let prev = inner.state;
        inner.state = State::ClosedRecv;
        drop(inner);
        if prev == State::WaitRecv {
          self.tx_cv.notify_one();
        }
        value
      }
      State::Init | State::WaitSend => {
        inner.state = State::WaitSend;
        telemetry::increment_counter(LOC_ONESHOT, "recv_parks");
        while inner.state == State::WaitSend {
          self.rx_cv.wait(&mut inner);
        }
        if inner.state.is_closed() {
          return None;
        }
        // A value arrived; a synchronous sender may be parked on tx_cv.
        let value = inner.value.take();
        inner.state = State::ClosedRecv;
        drop(inner);
        self.tx_cv.notify_one();
        value
      }
    }
  }

  pub(super) fn try_recv(&self) -> Option<T> {
    let mut inner = self.inner.lock();
    match inner.state {
      State::Sent | State::WaitRecv => {
        let value = inner.value.take();
        let prev = inner.state;
        inner.state = State::ClosedRecv;
        drop(inner);
        if prev == State::WaitRecv {
          self.tx_cv.notify_one();
        }
        value
      }
      _ => None,
    }
  }

  /// Transitions to `Closed` and wakes whichever party is parked.
  /// Terminal states are preserved untouched.
  pub(super) fn close(&self) {
    let mut inner = self.inner.lock();
    if inner.state.is_closed() {
      return;
    }
    let prev = inner.state;
    inner.state = State::Closed;
    if prev != State::WaitRecv {
      // Nobody will reclaim the slot; drop any undelivered value now. A
      // parked synchronous sender (WaitRecv) takes its value back
      // instead.
      inner.value = None;
    }
    drop(inner);
    telemetry::log_event(LOC_ONESHOT, "Close", None);
    match prev {
      State::WaitSend => {
        self.rx_cv.notify_one();
      }
      State::WaitRecv => {
        self.tx_cv.notify_one();
      }
      _ => {}
    }
  }
}
