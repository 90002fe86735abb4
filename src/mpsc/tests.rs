use super::*;
use crate::error::{SendTimeoutError, TrySendError};

use std::thread;
use std::time::{Duration, Instant};

const TEST_TIMEOUT: Duration = Duration::from_secs(1);

#[test]
fn try_recv_empty_then_try_send_then_try_recv() {
  let (tx, rx) = bounded::<u8>(10);

  assert_eq!(rx.try_recv(), None);

  tx.try_send(42).unwrap();

  assert_eq!(rx.try_recv(), Some(42));
  assert_eq!(rx.try_recv(), None);
}

#[test]
fn try_send_on_full_queue_fails_without_enqueue() {
  let (tx, rx) = bounded::<u8>(1);

  tx.try_send(42).unwrap();
  assert_eq!(tx.try_send(43), Err(TrySendError::Full(43)));

  // The failed send must not have modified the queue.
  assert_eq!(rx.len(), 1);
  assert_eq!(rx.try_recv(), Some(42));
  assert_eq!(rx.try_recv(), None);
}

#[test]
fn cloned_senders_share_one_queue() {
  let (tx, rx) = bounded::<u8>(10);
  let tx2 = tx.clone();

  tx.try_send(42).unwrap();
  tx2.try_send(42).unwrap();

  assert_eq!(rx.try_recv(), Some(42));
  assert_eq!(rx.try_recv(), Some(42));
  assert_eq!(rx.try_recv(), None);
}

#[test]
fn len_never_exceeds_capacity() {
  let (tx, rx) = bounded::<usize>(4);

  for i in 0..4 {
    tx.try_send(i).unwrap();
    assert!(tx.len() <= tx.capacity());
  }
  assert!(tx.is_full());
  assert!(tx.try_send(99).is_err());
  assert_eq!(tx.len(), 4);

  rx.try_recv().unwrap();
  assert_eq!(rx.len(), 3);
  assert!(!rx.is_full());
}

#[test]
fn recv_blocks_until_send() {
  let (tx, rx) = bounded::<&str>(1);

  let handle = thread::spawn(move || rx.recv());

  thread::sleep(Duration::from_millis(50));
  tx.send("hello");

  assert_eq!(handle.join().unwrap(), "hello");
}

#[test]
fn send_blocks_until_room() {
  let (tx, rx) = bounded::<u32>(1);
  tx.send(1);

  let handle = thread::spawn(move || {
    // The queue is full; this parks until the receiver makes room.
    tx.send(2);
  });

  thread::sleep(Duration::from_millis(50));
  assert_eq!(rx.recv(), 1);
  assert_eq!(rx.recv_timeout(TEST_TIMEOUT), Some(2));
  handle.join().unwrap();
}

#[test]
fn send_timeout_returns_value_on_full_queue() {
  let (tx, _rx) = bounded::<u8>(1);
  tx.send(1);

  let start = Instant::now();
  match tx.send_timeout(2, Duration::from_millis(50)) {
    Err(SendTimeoutError::Timeout(v)) => assert_eq!(v, 2),
    other => panic!("expected timeout, got {:?}", other),
  }
  assert!(start.elapsed() >= Duration::from_millis(50));
  assert_eq!(tx.len(), 1);
}

#[test]
fn send_timeout_succeeds_with_room() {
  let (tx, rx) = bounded::<u8>(1);
  tx.send_timeout(7, TEST_TIMEOUT).unwrap();
  assert_eq!(rx.try_recv(), Some(7));
}

#[test]
fn recv_timeout_expires_on_empty_queue() {
  let (_tx, rx) = bounded::<u8>(1);

  let start = Instant::now();
  assert_eq!(rx.recv_timeout(Duration::from_millis(50)), None);
  assert!(start.elapsed() >= Duration::from_millis(50));
}

#[test]
fn recv_timeout_woken_by_late_send() {
  let (tx, rx) = bounded::<u8>(1);

  let handle = thread::spawn(move || {
    thread::sleep(Duration::from_millis(50));
    tx.send(9);
  });

  assert_eq!(rx.recv_timeout(TEST_TIMEOUT), Some(9));
  handle.join().unwrap();
}

#[test]
fn per_sender_order_is_fifo() {
  let (tx, rx) = bounded::<u32>(8);

  for i in 0..8 {
    tx.send(i);
  }
  for i in 0..8 {
    assert_eq!(rx.recv(), i);
  }
}

#[test]
#[should_panic(expected = "capacity must be greater than 0")]
fn zero_capacity_is_rejected() {
  let _ = bounded::<u8>(0);
}

#[test]
fn handles_are_send() {
  fn assert_send<T: Send>(_t: &T) {}
  let (tx, rx) = bounded::<String>(1);
  assert_send(&tx);
  assert_send(&rx);
}
