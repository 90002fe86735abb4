use super::*;
use crate::error::BroadcastError;

use std::thread;
use std::time::Duration;

#[test]
fn initial_value_is_the_first_update() {
  let (_tx, rx) = channel::<u8>(0);

  assert_eq!(rx.recv(), Some(0));
}

#[test]
fn broadcast_then_recv_then_closed() {
  let (tx, rx) = channel::<u8>(0);

  assert_eq!(rx.recv(), Some(0));

  tx.broadcast(7).unwrap();
  assert_eq!(rx.recv(), Some(7));

  drop(tx);
  assert_eq!(rx.recv(), None);
}

#[test]
fn borrow_reads_current_value_without_consuming() {
  let (tx, rx) = channel::<u8>(1);

  assert_eq!(*rx.borrow(), 1);
  tx.broadcast(2).unwrap();
  assert_eq!(*rx.borrow(), 2);

  // Borrowing did not mark anything seen.
  assert_eq!(rx.recv(), Some(2));
}

#[test]
fn updates_coalesce_to_the_newest_value() {
  let (tx, rx) = channel::<u8>(0);

  tx.broadcast(1).unwrap();
  tx.broadcast(2).unwrap();
  tx.broadcast(3).unwrap();

  // One recv for three broadcasts: only the latest survives.
  assert_eq!(rx.recv(), Some(3));
}

#[test]
fn pending_update_is_delivered_before_closure() {
  let (tx, rx) = channel::<u8>(0);

  tx.broadcast(5).unwrap();
  drop(tx);

  // The update outlives the sender; closure is reported afterwards.
  assert_eq!(rx.recv(), Some(5));
  assert_eq!(rx.recv(), None);
}

#[test]
fn dropping_all_receivers_closes_the_channel() {
  let (tx, rx) = channel::<u8>(0);

  assert!(!tx.is_closed());
  drop(rx);

  assert!(tx.is_closed());
  match tx.broadcast(9) {
    Err(BroadcastError::Closed(v)) => assert_eq!(v, 9),
    other => panic!("expected Closed, got {:?}", other),
  }
}

#[test]
fn any_surviving_receiver_keeps_the_channel_open() {
  let (tx, rx) = channel::<u8>(0);
  let rx2 = rx.clone();

  drop(rx);
  assert!(!tx.is_closed());
  tx.broadcast(3).unwrap();
  assert_eq!(rx2.recv(), Some(3));

  drop(rx2);
  assert!(tx.is_closed());
}

#[test]
fn cloned_receiver_inherits_seen_version() {
  let (tx, rx) = channel::<u8>(0);

  assert_eq!(rx.recv(), Some(0));

  // The clone starts where the parent left off: nothing new to see.
  let rx2 = rx.clone();
  assert!(!rx2.is_closed());

  tx.broadcast(4).unwrap();
  assert_eq!(rx2.recv(), Some(4));
  assert_eq!(rx.recv(), Some(4));
}

#[test]
fn recv_blocks_until_broadcast() {
  let (tx, rx) = channel::<u8>(0);
  assert_eq!(rx.recv(), Some(0));

  let receiver = thread::spawn(move || rx.recv());

  thread::sleep(Duration::from_millis(50));
  tx.broadcast(8).unwrap();

  assert_eq!(receiver.join().unwrap(), Some(8));
}

#[test]
fn recv_woken_by_sender_drop() {
  let (tx, rx) = channel::<u8>(0);
  assert_eq!(rx.recv(), Some(0));

  let receiver = thread::spawn(move || rx.recv());

  thread::sleep(Duration::from_millis(50));
  drop(tx);

  assert_eq!(receiver.join().unwrap(), None);
}

#[test]
fn sender_drop_wakes_every_blocked_receiver() {
  let (tx, rx) = channel::<u8>(0);
  assert_eq!(rx.recv(), Some(0));

  let mut receivers = Vec::new();
  for _ in 0..4 {
    let rx = rx.clone();
    receivers.push(thread::spawn(move || rx.recv()));
  }
  drop(rx);

  thread::sleep(Duration::from_millis(50));
  drop(tx);

  for handle in receivers {
    assert_eq!(handle.join().unwrap(), None);
  }
}

#[test]
fn outstanding_borrow_blocks_broadcast() {
  let (tx, rx) = channel::<u8>(0);

  let guard = rx.borrow();
  let sender = thread::spawn(move || {
    tx.broadcast(1).unwrap();
  });

  // The writer cannot make progress while the read guard is alive.
  thread::sleep(Duration::from_millis(50));
  assert_eq!(*guard, 0);
  drop(guard);

  sender.join().unwrap();
  assert_eq!(rx.recv(), Some(1));
}

#[test]
fn borrows_coexist() {
  let (_tx, rx) = channel::<u8>(3);
  let rx2 = rx.clone();

  let a = rx.borrow();
  let b = rx2.borrow();
  assert_eq!(*a, *b);
}
