//! Bounded FIFO of frames awaiting delivery.

use std::collections::VecDeque;

/// Serialised frames queued while the daemon is unreachable.
///
/// Once full, new frames are refused and the queued ones are kept.
#[derive(Debug)]
pub(crate) struct Backlog {
    frames: VecDeque<Vec<u8>>,
    capacity: usize,
}

impl Backlog {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            frames: VecDeque::new(),
            capacity,
        }
    }

    /// Queue `frame` at the back. Returns `false` if the backlog was full and
    /// the frame was discarded.
    pub(crate) fn push(&mut self, frame: Vec<u8>) -> bool {
        if self.frames.len() >= self.capacity {
            return false;
        }
        self.frames.push_back(frame);
        true
    }

    pub(crate) fn front(&self) -> Option<&[u8]> {
        self.frames.front().map(Vec::as_slice)
    }

    pub(crate) fn pop_front(&mut self) -> Option<Vec<u8>> {
        self.frames.pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }
}
