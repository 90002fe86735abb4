#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

//! Blocking channel primitives for coordinating OS threads.
//!
//! Strand provides three in-process channels, each split into a producing
//! and a consuming handle around a shared, reference-counted core:
//!
//! - [`mpsc`] — a bounded multi-producer, single-consumer FIFO queue.
//! - [`oneshot`] — a rendezvous channel that carries exactly one value.
//! - [`watch`] — a latest-value broadcast cell with versioned reads.
//!
//! Every blocking operation parks on a condition variable under a mutex;
//! there is no async runtime and no cross-process transport. Handles are
//! movable between threads, but a given handle belongs to one thread at
//! a time.

pub mod error;

// Channel type modules
pub mod mpsc;
pub mod oneshot;
pub mod watch;

pub mod telemetry;

// Public re-exports for convenience
pub use error::{BroadcastError, CloseError, SendError, SendTimeoutError, TrySendError};

// Helper function to check if a type is Send + Sync.
// Useful for static assertions in generic code.
#[allow(dead_code)]
fn assert_send_sync<T: Send + Sync>() {}
