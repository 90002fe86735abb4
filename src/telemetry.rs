// src/telemetry.rs

//! Optional instrumentation for the channel cores.
//!
//! With the `telemetry` feature enabled, the channels record park, wake,
//! and close transitions into a global in-memory collector that can be
//! printed with [`print_telemetry_report`]. Without the feature, every
//! entry point compiles to a no-op.

/// Collector implementation, compiled only with the `telemetry` feature.
#[cfg(feature = "telemetry")]
pub mod enabled {
  use std::collections::HashMap;
  use std::fmt;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Mutex;
  use std::thread::{self, ThreadId};
  use std::time::Instant;

  static NEXT_EVENT_SEQUENCE_ID: AtomicUsize = AtomicUsize::new(0);

  /// A single recorded channel event.
  #[derive(Clone)]
  pub struct TelemetryEvent {
    /// A global sequence number for all events.
    pub seq_id: usize,
    /// When the event was recorded.
    pub timestamp: Instant,
    /// The OS thread that recorded the event.
    pub os_thread_id: ThreadId,
    /// Code location (e.g. "mpsc", "oneshot").
    pub location: &'static str,
    /// Event type (e.g. "SendPark", "CloseWakeReceiver").
    pub event_type: &'static str,
    /// Optional human-readable details.
    pub message: Option<String>,
  }

  impl fmt::Debug for TelemetryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("TelemetryEvent")
        .field("seq", &self.seq_id)
        .field("os_tid", &self.os_thread_id)
        .field("loc", &self.location)
        .field("evt", &self.event_type)
        .field("msg", &self.message.as_deref().unwrap_or(""))
        .finish()
    }
  }

  type CounterKey = (&'static str, &'static str); // (location, counter_name)

  struct CollectorData {
    events: Vec<TelemetryEvent>,
    counters: HashMap<CounterKey, usize>,
    start_time: Instant,
  }

  impl CollectorData {
    fn new() -> Self {
      CollectorData {
        events: Vec::new(),
        counters: HashMap::new(),
        start_time: Instant::now(),
      }
    }
  }

  lazy_static::lazy_static! {
      static ref GLOBAL_COLLECTOR: Mutex<CollectorData> = Mutex::new(CollectorData::new());
  }

  /// Records a single event in the global collector.
  pub fn log_event_fn(location: &'static str, event_type: &'static str, message: Option<String>) {
    let event = TelemetryEvent {
      seq_id: NEXT_EVENT_SEQUENCE_ID.fetch_add(1, Ordering::Relaxed),
      timestamp: Instant::now(),
      os_thread_id: thread::current().id(),
      location,
      event_type,
      message,
    };

    if let Ok(mut collector) = GLOBAL_COLLECTOR.lock() {
      collector.events.push(event);
    } else {
      eprintln!("[TELEMETRY ERROR] Global collector mutex poisoned while recording event.");
    }
  }

  /// Increments a named counter in the global collector.
  pub fn increment_counter_fn(location: &'static str, counter_name: &'static str) {
    if let Ok(mut collector) = GLOBAL_COLLECTOR.lock() {
      *collector.counters.entry((location, counter_name)).or_insert(0) += 1;
    } else {
      eprintln!("[TELEMETRY ERROR] Global collector mutex poisoned while incrementing counter.");
    }
  }

  /// Prints every recorded event and counter to stdout.
  pub fn print_telemetry_report_fn() {
    if let Ok(collector) = GLOBAL_COLLECTOR.lock() {
      println!("\n--- Strand Telemetry Report (feature: telemetry) ---");

      if collector.events.is_empty() {
        println!("\n[Events] No events recorded.");
      } else {
        println!("\n[Events] Recorded Events ({}):", collector.events.len());
        let mut sorted_events = collector.events.clone();
        // Sort by sequence ID to keep chronological order when timestamps tie.
        sorted_events.sort_by_key(|e| e.seq_id);

        for event in sorted_events.iter() {
          let time_since_start = event.timestamp.duration_since(collector.start_time);
          println!(
            "  +{:<10.6}s [Seq:{:<5}] TID:{:<18} Loc:{:<10} Evt:{:<28} Msg: {}",
            time_since_start.as_secs_f64(),
            event.seq_id,
            format!("{:?}", event.os_thread_id),
            event.location,
            event.event_type,
            event.message.as_deref().unwrap_or("")
          );
        }
      }

      if collector.counters.is_empty() {
        println!("\n[Counters] No counters recorded.");
      } else {
        println!("\n[Counters] Recorded Counters ({}):", collector.counters.len());
        let mut sorted_counters: Vec<_> = collector.counters.iter().collect();
        sorted_counters.sort_by_key(|(k, _v)| *k);
        for ((loc, name), count) in sorted_counters {
          println!("  Loc:{:<10} Counter:{:<28} Value: {}", loc, name, count);
        }
      }
      println!("\n--- End of Telemetry Report ---");
    } else {
      eprintln!("[TELEMETRY ERROR] Global collector mutex poisoned, cannot print report.");
    }
  }

  /// Clears every recorded event and counter.
  pub fn clear_telemetry_fn() {
    if let Ok(mut collector) = GLOBAL_COLLECTOR.lock() {
      collector.events.clear();
      collector.counters.clear();
      collector.start_time = Instant::now();
    } else {
      eprintln!("[TELEMETRY ERROR] Global collector mutex poisoned, cannot clear data.");
    }
    NEXT_EVENT_SEQUENCE_ID.store(0, Ordering::Relaxed);
  }
}

/// No-op stubs, compiled when the `telemetry` feature is off.
#[cfg(not(feature = "telemetry"))]
pub mod disabled {
  /// Records a single event (no-op).
  #[inline(always)]
  pub fn log_event_fn(
    _location: &'static str,
    _event_type: &'static str,
    _message: Option<String>,
  ) {
  }
  /// Increments a named counter (no-op).
  #[inline(always)]
  pub fn increment_counter_fn(_location: &'static str, _counter_name: &'static str) {}
  /// Prints the collected report (no-op).
  #[inline(always)]
  pub fn print_telemetry_report_fn() {}
  /// Clears the collected data (no-op).
  #[inline(always)]
  pub fn clear_telemetry_fn() {}
}

// Re-export the correct set of functions based on the feature flag
#[cfg(feature = "telemetry")]
pub use enabled::{
  clear_telemetry_fn as clear_telemetry, increment_counter_fn as increment_counter,
  log_event_fn as log_event, print_telemetry_report_fn as print_telemetry_report,
};

#[cfg(not(feature = "telemetry"))]
pub use disabled::{
  clear_telemetry_fn as clear_telemetry, increment_counter_fn as increment_counter,
  log_event_fn as log_event, print_telemetry_report_fn as print_telemetry_report,
};
