// Monitoring an object for changes from several threads with the watch
// channel.

use strand::watch;
use std::thread;

#[derive(Clone, Debug)]
struct SomeData {
  x: u32,
  y: u32,
}

fn main() {
  let (tx, rx) = watch::channel(SomeData { x: 1, y: 2 });

  let mut observers = Vec::new();
  for id in 0..3 {
    let rx = rx.clone();
    observers.push(thread::spawn(move || {
      while let Some(data) = rx.recv() {
        println!("observer {} saw x={} y={}", id, data.x, data.y);
      }
      println!("observer {} done: sender dropped", id);
    }));
  }
  drop(rx);

  for i in 2..5 {
    tx.broadcast(SomeData { x: i, y: i * 2 }).unwrap();
    thread::sleep(std::time::Duration::from_millis(10));
  }
  drop(tx);

  for o in observers {
    o.join().unwrap();
  }
}
