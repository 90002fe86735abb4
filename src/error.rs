// src/error.rs

//! Error types returned by the channel operations.
//!
//! Send-side errors carry the undelivered value back to the caller;
//! receive-side absence is signaled with `Option` instead of an error.

use core::fmt;

// Implements `into_inner`, a payload-eliding `Debug`, `Display`, and
// `std::error::Error` for a value-carrying error enum.
macro_rules! impl_value_error {
    (
        $enum_name:ident < $generic_param:ident >,
        $($variant:ident ( $message:expr ) ),+
        $(,)?
    ) => {
        impl<$generic_param> $enum_name<$generic_param> {
            /// Consumes the error, returning the value that could not be
            /// delivered.
            #[inline]
            pub fn into_inner(self) -> $generic_param {
                match self {
                    $( $enum_name::$variant(v) => v, )+
                }
            }
        }

        impl<$generic_param> fmt::Debug for $enum_name<$generic_param> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(
                        $enum_name::$variant(_) => f.write_str(concat!(
                            stringify!($enum_name), "::", stringify!($variant), "(..)"
                        )),
                    )+
                }
            }
        }

        impl<$generic_param> fmt::Display for $enum_name<$generic_param> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $( $enum_name::$variant(_) => f.write_str($message), )+
                }
            }
        }

        impl<$generic_param> std::error::Error for $enum_name<$generic_param> {}
    };
}

/// Error returned by [`mpsc::Sender::try_send`](crate::mpsc::Sender::try_send)
/// when the operation could not be completed immediately. The item being
/// sent is returned.
#[derive(PartialEq, Eq, Clone)]
pub enum TrySendError<T> {
  /// The queue is at capacity and cannot accept more items at this time.
  Full(T),
}

impl_value_error!(TrySendError<T>, Full("channel full"));

/// Error returned by
/// [`mpsc::Sender::send_timeout`](crate::mpsc::Sender::send_timeout) when
/// the timeout elapsed before room became available. The item being sent
/// is returned.
#[derive(PartialEq, Eq, Clone)]
pub enum SendTimeoutError<T> {
  /// The timeout elapsed with the queue still at capacity.
  Timeout(T),
}

impl_value_error!(SendTimeoutError<T>, Timeout("send operation timed out"));

/// Error returned by the oneshot send operations. The undelivered value
/// is returned.
#[derive(PartialEq, Eq, Clone)]
pub enum SendError<T> {
  /// The channel is closed: one of the sides closed it explicitly or the
  /// peer handle was dropped before the value was consumed.
  Closed(T),
  /// A value has already been sent on this channel.
  Sent(T),
}

impl_value_error!(
  SendError<T>,
  Closed("channel closed"),
  Sent("channel already sent a value"),
);

/// Error returned by
/// [`watch::Sender::broadcast`](crate::watch::Sender::broadcast) when no
/// receiver handle remains. The item being sent is returned.
#[derive(PartialEq, Eq, Clone)]
pub enum BroadcastError<T> {
  /// Every receiver has been dropped; the update would never be observed.
  Closed(T),
}

impl_value_error!(BroadcastError<T>, Closed("channel closed"));

/// Error returned when attempting to close an already closed handle.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CloseError;
impl std::error::Error for CloseError {}
impl fmt::Display for CloseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "channel is already closed")
  }
}
