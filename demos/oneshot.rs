// Basic usage of the oneshot channel to pass a single message between
// threads.

use strand::oneshot;
use std::thread;

fn main() {
  let (tx, rx) = oneshot::channel::<u8>();

  let sender = thread::spawn(move || {
    let value = 42u8;
    match tx.send_async(value) {
      Ok(()) => println!("Sent value: {} with status: Success", value),
      Err(e) => println!("Sent value: {} with status: {}", value, e),
    }
  });

  let receiver = thread::spawn(move || match rx.recv() {
    Some(value) => println!("Received value: {}", value),
    None => println!("receiver.recv() returned nothing"),
  });

  sender.join().unwrap();
  receiver.join().unwrap();
}
