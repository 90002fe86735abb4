// Threaded MPSC scenarios: per-sender FIFO, capacity bounds, timeouts.

mod common;
use common::*;

use strand::mpsc;

use std::collections::HashMap;
use std::thread;

// --- Helper Function for Threaded MPSC Tests ---
fn run_mpsc_fifo_test(num_producers: usize, items_per_producer: usize, channel_capacity: usize) {
  let (tx, rx) = mpsc::bounded::<(usize, usize)>(channel_capacity);
  let total_items = num_producers * items_per_producer;

  // --- Spawn Senders ---
  let mut producer_handles = Vec::new();
  for p_id in 0..num_producers {
    let tx_clone = tx.clone();
    producer_handles.push(thread::spawn(move || {
      for i in 0..items_per_producer {
        tx_clone.send((p_id, i));
      }
    }));
  }
  drop(tx); // Drop original handle

  // --- Consume and Assert Per-Sender Order ---
  let mut next_expected: HashMap<usize, usize> = HashMap::new();
  for _ in 0..total_items {
    let (p_id, seq) = rx
      .recv_timeout(LONG_TIMEOUT)
      .expect("consumer starved: producer items missing");
    let expected = next_expected.entry(p_id).or_insert(0);
    assert_eq!(
      seq, *expected,
      "sender {} items arrived out of submission order",
      p_id
    );
    *expected += 1;
    assert!(rx.len() <= channel_capacity, "queue grew past capacity");
  }

  // Every item accounted for, nothing extra.
  assert_eq!(rx.try_recv(), None);
  for handle in producer_handles {
    handle.join().expect("Sender thread panicked");
  }
}

// --- Threaded MPSC Test Cases ---

#[test]
fn sync_1p_1c_fifo() {
  run_mpsc_fifo_test(1, ITEMS_HIGH, 16);
}

#[test]
fn sync_mp_1c_fifo() {
  run_mpsc_fifo_test(4, ITEMS_MEDIUM, 16);
}

#[test]
fn sync_mp_1c_tiny_capacity_contention() {
  run_mpsc_fifo_test(4, ITEMS_MEDIUM, 1); // Every send contends for one slot
}

#[test]
fn sync_slow_consumer_applies_backpressure() {
  let (tx, rx) = mpsc::bounded::<usize>(4);

  let producer = thread::spawn(move || {
    for i in 0..ITEMS_LOW {
      tx.send(i);
    }
  });

  for i in 0..ITEMS_LOW {
    // Drain slowly; the producer must park rather than overfill.
    if i % 8 == 0 {
      thread::sleep(std::time::Duration::from_millis(1));
    }
    assert_eq!(rx.recv(), i);
    assert!(rx.len() <= 4);
  }

  producer.join().unwrap();
}

#[test]
fn sync_send_timeout_under_load_eventually_succeeds() {
  let (tx, rx) = mpsc::bounded::<usize>(1);
  tx.send(0);

  let consumer = thread::spawn(move || {
    thread::sleep(std::time::Duration::from_millis(50));
    let mut taken = Vec::new();
    taken.push(rx.recv());
    taken.push(rx.recv());
    taken
  });

  // Parked on a full queue until the consumer drains it.
  tx.send_timeout(1, SHORT_TIMEOUT).unwrap();

  assert_eq!(consumer.join().unwrap(), vec![0, 1]);
}

#[test]
fn sync_many_values_through_tiny_queue() {
  let (tx, rx) = mpsc::bounded::<usize>(2);

  let consumer = thread::spawn(move || {
    let mut sum = 0;
    for _ in 0..ITEMS_HIGH {
      sum += rx.recv();
    }
    sum
  });

  for i in 0..ITEMS_HIGH {
    tx.send(i);
  }

  let expected: usize = (0..ITEMS_HIGH).sum();
  assert_eq!(consumer.join().unwrap(), expected);
}
