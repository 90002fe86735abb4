// Basic usage of the bounded MPSC channel across threads.

use strand::mpsc;
use std::thread;

fn main() {
  let (tx, rx) = mpsc::bounded::<u8>(100);

  let value = 42u8;

  tx.send(value);
  println!("Sent value: {}", value);

  let received = rx.recv();
  println!("Received value: {}", received);

  // Two producers feeding one consumer.
  let (tx, rx) = mpsc::bounded::<usize>(8);
  let mut producers = Vec::new();
  for id in 0..2 {
    let tx = tx.clone();
    producers.push(thread::spawn(move || {
      for i in 0..5 {
        tx.send(id * 100 + i);
      }
    }));
  }
  drop(tx);

  for _ in 0..10 {
    println!("Consumer took: {}", rx.recv());
  }

  for p in producers {
    p.join().unwrap();
  }
}
