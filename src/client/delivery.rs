//! Outcome reporting for client operations.

use crate::frame::FrameError;

/// What happened to a request handed to the client.
///
/// None of these outcomes is an error from the caller's point of view; the
/// value exists for hosts and tests that want to observe delivery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// Written to the daemon socket.
    Sent,
    /// Queued in the backlog for a later attempt.
    Buffered,
    /// Discarded because the backlog was full.
    Dropped,
    /// Below the minimum level; nothing was serialised.
    Filtered,
    /// Refused before any I/O.
    Rejected(Rejection),
}

impl Delivery {
    /// `true` if the frame was written or is waiting in the backlog.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Delivery::Sent | Delivery::Buffered)
    }
}

/// Caller mistakes detected before serialisation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Neither the call nor the default name supplied a source name.
    EmptyName,
    /// Strict registration is enabled and the name was never registered.
    Unregistered(String),
    /// The request could not be encoded.
    Encoding(FrameError),
}
